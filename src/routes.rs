// src/routes.rs

use std::sync::Arc;

use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::GlobalKeyExtractor,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::{
    handlers::{auth, chat, questions, quiz},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, questions, quiz, chat).
/// * Applies global middleware (Trace, CORS, cookie jar).
/// * Serves the bundled SPA for every non-API path.
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
        "http://localhost:5173".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .allow_credentials(true);

    // The generation endpoint proxies a metered model API, so it gets a
    // global rate limit the other routes do not need.
    let governor_conf = GovernorConfigBuilder::default()
        .key_extractor(GlobalKeyExtractor)
        .per_second(2)
        .burst_size(5)
        .finish()
        .unwrap();
    let governor_conf = Arc::new(governor_conf);

    let auth_routes = Router::new().route("/url", get(auth::auth_url));

    let question_routes = Router::new()
        .route("/", get(questions::list_questions))
        .merge(
            Router::new()
                .route("/generate", post(questions::generate_questions))
                .layer(GovernorLayer::new(governor_conf)),
        );

    let quiz_routes = Router::new().route("/paper", get(quiz::generate_paper));

    // Everything outside /api and the OAuth callback is the SPA.
    let spa = ServeDir::new("dist").not_found_service(ServeFile::new("dist/index.html"));

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/questions", question_routes)
        .nest("/api/quiz", quiz_routes)
        .route("/auth/callback", get(auth::callback))
        .route("/api/user", get(auth::current_user))
        .route("/api/logout", post(auth::logout))
        .route("/api/chat", post(chat::chat_reply))
        .fallback_service(spa)
        // Global Middleware (applied from outside in)
        .layer(tower_cookies::CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
