// src/bank.rs

use std::sync::{Arc, RwLock};

use crate::models::question::{GeneratedQuestion, Question};

/// Course dataset shipped with the binary; the bank starts from it on boot.
const BUNDLED_QUESTIONS: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/questions.json"));

/// The authoritative in-memory question sequence.
///
/// Cheap to clone; all handles share the same storage. Bundled records are
/// immutable, the only mutation is appending generator output. Nothing is
/// persisted, so enrichment is lost on restart.
#[derive(Clone)]
pub struct QuestionBank {
    inner: Arc<RwLock<Vec<Question>>>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(questions)),
        }
    }

    /// Loads the bundled course dataset.
    pub fn load_bundled() -> Result<Self, serde_json::Error> {
        let questions: Vec<Question> = serde_json::from_str(BUNDLED_QUESTIONS)?;
        Ok(Self::new(questions))
    }

    pub fn len(&self) -> usize {
        self.inner.read().expect("question bank lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the full sequence, in insertion order.
    pub fn all(&self) -> Vec<Question> {
        self.inner
            .read()
            .expect("question bank lock poisoned")
            .clone()
    }

    /// Filtered snapshot: optional chapter match plus case-insensitive
    /// substring search over question text and topic.
    pub fn search(&self, chapter: Option<u32>, term: Option<&str>) -> Vec<Question> {
        let needle = term.map(str::to_lowercase);
        self.inner
            .read()
            .expect("question bank lock poisoned")
            .iter()
            .filter(|q| chapter.is_none_or(|c| q.chapter == Some(c)))
            .filter(|q| {
                needle.as_deref().is_none_or(|n| {
                    q.question.to_lowercase().contains(n) || q.topic.to_lowercase().contains(n)
                })
            })
            .cloned()
            .collect()
    }

    /// Appends generator output, assigning fresh sequential ids derived from
    /// the current length and stamping the append time. Returns the records
    /// as stored. Appending an empty batch is a no-op.
    pub fn append_generated(&self, batch: Vec<GeneratedQuestion>) -> Vec<Question> {
        if batch.is_empty() {
            return Vec::new();
        }

        let mut questions = self.inner.write().expect("question bank lock poisoned");
        let now = chrono::Utc::now();

        let appended: Vec<Question> = batch
            .into_iter()
            .enumerate()
            .map(|(i, g)| Question {
                id: (questions.len() + i + 1) as i64,
                chapter: None,
                topic: g.topic,
                question: g.question,
                options: g.options,
                correct_answer: g.correct_answer,
                explanation: g.explanation,
                created_at: Some(now),
            })
            .collect();

        questions.extend(appended.iter().cloned());
        appended
    }
}
