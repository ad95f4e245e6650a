// src/handlers/chat.rs

use std::time::Duration;

use axum::{Json, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;

/// The chat widget has no model behind it; every message gets the same
/// canned hand-off reply after a fixed delay, mimicking a human-staffed
/// support channel.
const CANNED_REPLY: &str =
    "Thanks for your question! A teacher will follow up with you shortly.";

const REPLY_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Simulated assistant reply: one deferred canned response, no history,
/// no cancellation.
pub async fn chat_reply(Json(req): Json<ChatRequest>) -> impl IntoResponse {
    tracing::debug!("Chat message received ({} chars)", req.message.len());
    tokio::time::sleep(REPLY_DELAY).await;
    Json(json!({ "reply": CANNED_REPLY }))
}
