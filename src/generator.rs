// src/generator.rs

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::config::Config;
use crate::models::question::GeneratedQuestion;

/// Collaborator that synthesizes new question records on demand.
///
/// Contract: returns `0..=count` well-formed records and never errors to the
/// caller. Backend failures, empty responses and unparseable output all
/// collapse to an empty result; causes are logged only. The generator does
/// not touch the question bank - the caller appends and assigns ids.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(&self, count: usize) -> Vec<GeneratedQuestion>;
}

pub type DynGenerator = Arc<dyn QuestionGenerator>;

/// Course outline fed to the model; kept in step with the bundled dataset.
const PROMPT_TOPICS: &str = "\
Topics include:
CHAPTER 1: Atomic Structure (Subatomic particles, Atomic number, Mass number, Isotopes, Relative atomic mass, Ion formation, Ionisation Energy, Electronic configuration, Trends).
CHAPTER 2: Atoms, Molecules & Stoichiometry (Mole concept, Avogadro constant, n=m/Mr, Gas volume at r.t.p (24dm3), Concentration c=n/V, Limiting reagents, Percentage yield, Atom economy, Empirical/Molecular formulas, Titration calculations, Back titration, Hydrated salts).
CHAPTER 3: Chemical Bonding (Ionic, Covalent, Dative, Metallic bonding, Electronegativity, Bond polarity, Intermolecular forces, Hydrogen bonding, VSEPR shapes, Bond angles, Bond enthalpy calculations).
CHAPTER 4: States of Matter (Solid, liquid, gas properties, IMF, Boiling/Melting points, Vapor pressure, Gas laws: Boyle, Charles, Avogadro, Ideal gas equation PV=nRT, Maxwell-Boltzmann distribution, Activation energy, Ideal gas deviations).
CHAPTER 5: Periodicity (Atomic/Ionic radius, Ionisation energy, Electronegativity, Shielding, Nuclear charge, Trends across periods and down groups, Group 2 and Group 7 properties, Displacement reactions, Oxide nature).

Provide explanations in English.
Ensure the questions are challenging and suitable for AS Level.";

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiGenerator {
    http: reqwest::Client,
    api_key: Option<String>,
    api_url: String,
}

impl GeminiGenerator {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            api_key: config.gemini_api_key.clone(),
            api_url: config.gemini_api_url.clone(),
        }
    }
}

#[async_trait]
impl QuestionGenerator for GeminiGenerator {
    async fn generate(&self, count: usize) -> Vec<GeneratedQuestion> {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::warn!("GEMINI_API_KEY not configured, skipping question generation");
            return Vec::new();
        };

        let prompt = format!(
            "Generate {count} multiple choice questions for IGCSE|A/AS Chemistry.\n{PROMPT_TOPICS}"
        );

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "question": { "type": "STRING" },
                            "options": {
                                "type": "ARRAY",
                                "items": { "type": "STRING" },
                                "description": "Exactly 4 options"
                            },
                            "correctAnswer": {
                                "type": "INTEGER",
                                "description": "Index of the correct option (0-3)"
                            },
                            "explanation": { "type": "STRING" },
                            "topic": { "type": "STRING" }
                        },
                        "required": ["question", "options", "correctAnswer", "explanation", "topic"]
                    }
                }
            }
        });

        let response = self
            .http
            .post(&self.api_url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                tracing::error!("Question generation request failed: {}", e);
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            tracing::error!(
                "Question generation backend returned {}",
                response.status()
            );
            return Vec::new();
        }

        let payload: GenerateContentResponse = match response.json().await {
            Ok(p) => p,
            Err(e) => {
                tracing::error!("Failed to decode generation response: {}", e);
                return Vec::new();
            }
        };

        let Some(text) = payload.first_text() else {
            tracing::error!("Generation response contained no candidate text");
            return Vec::new();
        };

        parse_generated(&text, count)
    }
}

/// Parses the model's JSON text into records, dropping malformed entries
/// individually. Output is truncated to the requested count.
pub(crate) fn parse_generated(text: &str, count: usize) -> Vec<GeneratedQuestion> {
    let parsed: Vec<GeneratedQuestion> = match serde_json::from_str(text) {
        Ok(list) => list,
        Err(e) => {
            tracing::error!("Generated questions were not valid JSON: {}", e);
            return Vec::new();
        }
    };

    let mut valid: Vec<GeneratedQuestion> = parsed
        .into_iter()
        .filter(|q| {
            let ok = q.is_well_formed();
            if !ok {
                tracing::warn!("Dropping malformed generated question: {:?}", q.question);
            }
            ok
        })
        .collect();
    valid.truncate(count);
    valid
}

/// Minimal slice of the `generateContent` response shape.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn first_text(&self) -> Option<String> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .clone()
    }
}
