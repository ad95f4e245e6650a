// tests/common/mod.rs

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::{Value, json};

use chemquiz::bank::QuestionBank;
use chemquiz::config::Config;
use chemquiz::generator::{DynGenerator, QuestionGenerator};
use chemquiz::models::question::GeneratedQuestion;
use chemquiz::routes;
use chemquiz::state::AppState;

/// Test configuration: plain-HTTP deployment with dummy OAuth credentials.
/// Provider URLs point at an unroutable host unless a mock provider is wired
/// in with [`with_provider`].
pub fn test_config() -> Config {
    Config {
        oauth_app_id: Some("test-app-id".to_string()),
        oauth_app_secret: Some("test-app-secret".to_string()),
        app_url: "http://localhost:3000".to_string(),
        oauth_authorize_url: "https://oauth.zaloapp.com/v4/permission".to_string(),
        oauth_token_url: "http://127.0.0.1:1/access_token".to_string(),
        oauth_profile_url: "http://127.0.0.1:1/me".to_string(),
        gemini_api_key: None,
        gemini_api_url: "http://127.0.0.1:1/generate".to_string(),
        rust_log: "error".to_string(),
    }
}

/// Points the token-exchange and profile URLs at a spawned mock provider.
pub fn with_provider(mut config: Config, provider_base: &str) -> Config {
    config.oauth_token_url = format!("{provider_base}/access_token");
    config.oauth_profile_url = format!("{provider_base}/me?fields=id,name,picture");
    config
}

pub fn app_state(config: Config, bank: QuestionBank, generator: DynGenerator) -> AppState {
    AppState {
        config,
        bank,
        http: reqwest::Client::new(),
        generator,
    }
}

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
pub async fn spawn_app(state: AppState) -> String {
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

/// Generator stub that serves records from a fixed list, honoring `count`.
pub struct StaticGenerator(pub Vec<GeneratedQuestion>);

#[async_trait]
impl QuestionGenerator for StaticGenerator {
    async fn generate(&self, count: usize) -> Vec<GeneratedQuestion> {
        self.0.iter().take(count).cloned().collect()
    }
}

/// Generator stub standing in for a failing backend: always empty.
pub struct FailingGenerator;

#[async_trait]
impl QuestionGenerator for FailingGenerator {
    async fn generate(&self, _count: usize) -> Vec<GeneratedQuestion> {
        Vec::new()
    }
}

pub fn sample_generated(topic: &str) -> GeneratedQuestion {
    GeneratedQuestion {
        question: format!("Which statement about {topic} is correct?"),
        options: vec![
            "Statement A".to_string(),
            "Statement B".to_string(),
            "Statement C".to_string(),
            "Statement D".to_string(),
        ],
        correct_answer: 2,
        explanation: "Statement C follows from the definition.".to_string(),
        topic: topic.to_string(),
    }
}

/// In-process OAuth provider double.
///
/// Counts every request to the token and profile endpoints so tests can
/// assert that certain flows never go outbound.
#[derive(Clone)]
struct ProviderState {
    hits: Arc<AtomicUsize>,
    profile: Value,
    fail_token_exchange: bool,
}

async fn token_endpoint(State(state): State<ProviderState>) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    if state.fail_token_exchange {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "invalid code" })),
        )
            .into_response();
    }
    Json(json!({ "access_token": "test-access-token", "expires_in": 3600 })).into_response()
}

async fn profile_endpoint(State(state): State<ProviderState>) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    Json(state.profile.clone())
}

/// Spawns the mock provider; returns its base URL and the outbound-call
/// counter.
pub async fn spawn_mock_provider(profile: Value, fail_token_exchange: bool) -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let state = ProviderState {
        hits: hits.clone(),
        profile,
        fail_token_exchange,
    };

    let app = Router::new()
        .route("/access_token", post(token_endpoint))
        .route("/me", get(profile_endpoint))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock provider port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (address, hits)
}

/// A provider profile blob with nested and unknown fields, for round-trip
/// assertions.
pub fn sample_profile() -> Value {
    json!({
        "id": "3620915274",
        "name": "Mai Anh",
        "picture": { "data": { "url": "https://cdn.example/avatar.jpg" } },
        "error": 0,
        "message": "Success"
    })
}
