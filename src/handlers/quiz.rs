// src/handlers/quiz.rs

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{bank::QuestionBank, error::AppError, session};

/// Query parameters for drawing a quiz paper.
#[derive(Debug, Deserialize)]
pub struct PaperParams {
    pub chapter: Option<u32>,
}

/// Draws one random quiz paper: the bank (optionally chapter-filtered),
/// uniformly shuffled and truncated to the session sample size.
///
/// Answers and explanations ship with the paper; the client grades locally,
/// exactly like a session started from [`crate::session::QuizSession`].
pub async fn generate_paper(
    State(bank): State<QuestionBank>,
    Query(params): Query<PaperParams>,
) -> Result<impl IntoResponse, AppError> {
    let pool = bank.search(params.chapter, None);
    let paper = session::sample_questions(pool, &mut rand::thread_rng());

    Ok(Json(paper))
}
