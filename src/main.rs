// src/main.rs

use std::net::SocketAddr;
use std::sync::Arc;

use chemquiz::bank::QuestionBank;
use chemquiz::config::Config;
use chemquiz::generator::GeminiGenerator;
use chemquiz::routes;
use chemquiz::state::AppState;
use dotenvy::dotenv;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Load the bundled question dataset
    let bank = QuestionBank::load_bundled().expect("Failed to parse bundled question data");
    tracing::info!("Question bank loaded with {} questions", bank.len());

    if config.oauth_app_id.is_none() || config.oauth_app_secret.is_none() {
        tracing::warn!("OAuth credentials not configured; login endpoints will return errors");
    }
    if config.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY not configured; question generation is disabled");
    }

    // Shared outbound HTTP client and generator backend
    let http = reqwest::Client::new();
    let generator = Arc::new(GeminiGenerator::new(http.clone(), &config));

    // Create AppState
    let state = AppState {
        config: config.clone(),
        bank,
        http,
        generator,
    };

    // Create the Axum application router
    let app = routes::create_router(state);

    // Bind to the listening address
    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    tracing::info!("chemquiz listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    // Start the server
    axum::serve(listener, app).await.unwrap();
}
