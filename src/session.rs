// src/session.rs

use rand::Rng;
use rand::seq::SliceRandom;

use crate::models::question::Question;

/// Upper bound on questions drawn into one quiz session.
pub const SAMPLE_SIZE: usize = 30;

/// User-driven transitions of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizAction {
    /// Pick option `i` for the current question.
    Select(usize),
    /// Move to the next question, or finish on the last one.
    Advance,
}

/// One bounded quiz run over a sampled subset of the bank.
///
/// A session is a plain value driven by [`QuizSession::apply`]; there is no
/// interior mutability and no I/O, so transitions are deterministic given the
/// starting sample.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSession {
    questions: Vec<Question>,
    index: usize,
    score: u32,
    selected: Option<usize>,
    answered: bool,
    finished: bool,
}

impl QuizSession {
    /// Starts a session over `pool`, optionally restricted to one chapter,
    /// with a uniformly shuffled sample of at most [`SAMPLE_SIZE`] questions.
    ///
    /// An empty pool yields a session that is already finished with a final
    /// score of zero.
    pub fn start(pool: &[Question], chapter: Option<u32>, rng: &mut impl Rng) -> Self {
        let filtered: Vec<Question> = pool
            .iter()
            .filter(|q| chapter.is_none_or(|c| q.chapter == Some(c)))
            .cloned()
            .collect();

        let questions = sample_questions(filtered, rng);
        let finished = questions.is_empty();

        Self {
            questions,
            index: 0,
            score: 0,
            selected: None,
            answered: false,
            finished,
        }
    }

    /// Reducer-style transition: consumes the session and returns its
    /// successor. Actions that do not apply in the current state (selecting
    /// twice, advancing before answering, anything after the terminal state)
    /// leave the session unchanged.
    pub fn apply(mut self, action: QuizAction) -> Self {
        match action {
            QuizAction::Select(i) => self.select(i),
            QuizAction::Advance => self.advance(),
        }
        self
    }

    fn select(&mut self, choice: usize) {
        if self.finished || self.answered {
            return;
        }
        self.selected = Some(choice);
        self.answered = true;
        if self
            .current()
            .is_some_and(|q| choice == q.correct_answer)
        {
            self.score += 1;
        }
    }

    fn advance(&mut self) {
        if self.finished || !self.answered {
            return;
        }
        if self.index + 1 < self.questions.len() {
            self.index += 1;
            self.selected = None;
            self.answered = false;
        } else {
            self.finished = true;
        }
    }

    pub fn current(&self) -> Option<&Question> {
        if self.finished {
            return None;
        }
        self.questions.get(self.index)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn answered(&self) -> bool {
        self.answered
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Percentage score rounded to the nearest integer; zero for an empty
    /// sample rather than a division by zero.
    pub fn final_score(&self) -> u32 {
        if self.questions.is_empty() {
            return 0;
        }
        (self.score as f64 * 100.0 / self.questions.len() as f64).round() as u32
    }
}

/// Uniform random sample of at most [`SAMPLE_SIZE`] questions:
/// Fisher-Yates shuffle, then truncate.
pub fn sample_questions(mut pool: Vec<Question>, rng: &mut impl Rng) -> Vec<Question> {
    pool.shuffle(rng);
    pool.truncate(SAMPLE_SIZE);
    pool
}
