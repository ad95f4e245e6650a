// src/handlers/questions.rs

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{bank::QuestionBank, error::AppError, generator::DynGenerator};

/// Query parameters for listing the question bank.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub chapter: Option<u32>,
    pub q: Option<String>,
}

/// How many questions one generation request asks the model for.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub count: Option<usize>,
}

const DEFAULT_GENERATE_COUNT: usize = 10;
const MAX_GENERATE_COUNT: usize = 20;

/// Lists the question bank, optionally filtered by chapter and by a search
/// keyword matched against question text and topic.
pub async fn list_questions(
    State(bank): State<QuestionBank>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let questions = bank.search(params.chapter, params.q.as_deref());
    Ok(Json(questions))
}

/// Asks the generator backend for new questions and appends the valid ones
/// to the bank.
///
/// Generation failure is not an error: the response is simply an empty array
/// and the bank is left untouched. The body is optional; a bare POST uses
/// the default count.
pub async fn generate_questions(
    State(bank): State<QuestionBank>,
    State(generator): State<DynGenerator>,
    body: Option<Json<GenerateRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let count = body
        .and_then(|Json(req)| req.count)
        .unwrap_or(DEFAULT_GENERATE_COUNT)
        .clamp(1, MAX_GENERATE_COUNT);

    let generated = generator.generate(count).await;
    let appended = bank.append_generated(generated);

    if appended.is_empty() {
        tracing::info!("Question generation produced no new records");
    } else {
        tracing::info!("Appended {} generated questions", appended.len());
    }

    Ok(Json(appended))
}
