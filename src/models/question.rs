// src/models/question.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A multiple-choice question record in the bank.
///
/// Serialized camelCase to match the bundled dataset and the SPA client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,

    /// Course chapter (1-5) for bundled records. Generated records carry no
    /// chapter and are therefore excluded from chapter-filtered quizzes.
    #[serde(default)]
    pub chapter: Option<u32>,

    pub topic: String,

    /// The text content of the question.
    pub question: String,

    /// Exactly four answer options.
    pub options: Vec<String>,

    /// Index of the correct option. Invariant: `correct_answer < options.len()`.
    pub correct_answer: usize,

    /// Explanation shown after answering.
    pub explanation: String,

    /// Append time for generated records; absent for bundled ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// A freshly generated question as returned by the model backend:
/// a `Question` minus `id` and `chapter`, which the bank assigns on append.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    #[validate(length(min = 1, max = 1000))]
    pub question: String,
    #[validate(custom(function = validate_options))]
    pub options: Vec<String>,
    pub correct_answer: usize,
    #[validate(length(min = 1, max = 2000))]
    pub explanation: String,
    #[validate(length(min = 1, max = 200))]
    pub topic: String,
}

impl GeneratedQuestion {
    /// Shape check beyond the field validators: the answer index must point
    /// inside the option list.
    pub fn is_well_formed(&self) -> bool {
        self.validate().is_ok() && self.correct_answer < self.options.len()
    }
}

fn validate_options(options: &[String]) -> Result<(), validator::ValidationError> {
    if options.len() != 4 {
        return Err(validator::ValidationError::new("exactly_four_options_required"));
    }
    for opt in options {
        if opt.is_empty() || opt.len() > 500 {
            return Err(validator::ValidationError::new("option_length_invalid"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generated(options: Vec<&str>, correct_answer: usize) -> GeneratedQuestion {
        GeneratedQuestion {
            question: "What is the charge of a proton?".to_string(),
            options: options.into_iter().map(String::from).collect(),
            correct_answer,
            explanation: "Protons carry a single positive charge.".to_string(),
            topic: "Subatomic particles".to_string(),
        }
    }

    #[test]
    fn four_options_in_range_is_well_formed() {
        assert!(generated(vec!["+1", "0", "-1", "+2"], 0).is_well_formed());
    }

    #[test]
    fn wrong_option_count_is_rejected() {
        assert!(!generated(vec!["+1", "0", "-1"], 0).is_well_formed());
        assert!(!generated(vec!["+1", "0", "-1", "+2", "-2"], 0).is_well_formed());
    }

    #[test]
    fn out_of_range_answer_is_rejected() {
        assert!(!generated(vec!["+1", "0", "-1", "+2"], 4).is_well_formed());
    }

    #[test]
    fn empty_option_is_rejected() {
        assert!(!generated(vec!["+1", "", "-1", "+2"], 0).is_well_formed());
    }

    #[test]
    fn question_round_trips_through_camel_case_json() {
        let json = r#"{
            "id": 3,
            "chapter": 1,
            "topic": "Mass number (A)",
            "question": "An atom has A = 23 and Z = 11. How many neutrons does it contain?",
            "options": ["11", "23", "12", "34"],
            "correctAnswer": 2,
            "explanation": "Neutrons = Mass number (A) - Atomic number (Z) = 23 - 11 = 12."
        }"#;

        let q: Question = serde_json::from_str(json).expect("valid question json");
        assert_eq!(q.correct_answer, 2);
        assert_eq!(q.chapter, Some(1));
        assert!(q.created_at.is_none());

        let back = serde_json::to_value(&q).unwrap();
        assert_eq!(back["correctAnswer"], 2);
        // createdAt stays off the wire until the record is generated
        assert!(back.get("createdAt").is_none());
    }
}
