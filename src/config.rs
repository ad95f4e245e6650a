// src/config.rs

use dotenvy::dotenv;
use std::env;

/// Default OAuth provider endpoints. Overridable through the environment so
/// integration tests can point the handshake at a local mock provider.
const DEFAULT_AUTHORIZE_URL: &str = "https://oauth.zaloapp.com/v4/permission";
const DEFAULT_TOKEN_URL: &str = "https://oauth.zaloapp.com/v4/access_token";
const DEFAULT_PROFILE_URL: &str = "https://graph.zaloapp.com/v2.0/me?fields=id,name,picture";

const DEFAULT_GEMINI_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent";

#[derive(Debug, Clone)]
pub struct Config {
    /// OAuth client id. Missing id degrades the auth endpoints to 500s
    /// instead of aborting startup.
    pub oauth_app_id: Option<String>,
    /// OAuth client secret, sent in the `secret_key` header of the
    /// server-to-server token exchange. Never exposed to the browser.
    pub oauth_app_secret: Option<String>,
    /// Public deployment URL; the provider redirect URI is derived from it.
    pub app_url: String,
    pub oauth_authorize_url: String,
    pub oauth_token_url: String,
    pub oauth_profile_url: String,
    /// Generative-model API key. Missing key degrades generation to
    /// always-empty results.
    pub gemini_api_key: Option<String>,
    pub gemini_api_url: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let oauth_app_id = env::var("OAUTH_APP_ID").ok();
        let oauth_app_secret = env::var("OAUTH_APP_SECRET").ok();

        let app_url =
            env::var("APP_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

        let oauth_authorize_url = env::var("OAUTH_AUTHORIZE_URL")
            .unwrap_or_else(|_| DEFAULT_AUTHORIZE_URL.to_string());
        let oauth_token_url =
            env::var("OAUTH_TOKEN_URL").unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string());
        let oauth_profile_url =
            env::var("OAUTH_PROFILE_URL").unwrap_or_else(|_| DEFAULT_PROFILE_URL.to_string());

        let gemini_api_key = env::var("GEMINI_API_KEY").ok();
        let gemini_api_url =
            env::var("GEMINI_API_URL").unwrap_or_else(|_| DEFAULT_GEMINI_URL.to_string());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            oauth_app_id,
            oauth_app_secret,
            app_url,
            oauth_authorize_url,
            oauth_token_url,
            oauth_profile_url,
            gemini_api_key,
            gemini_api_url,
            rust_log,
        }
    }

    /// Redirect URI registered with the provider, fixed to this deployment.
    pub fn redirect_uri(&self) -> String {
        format!("{}/auth/callback", self.app_url)
    }

    /// Session cookies are only marked `Secure` (and cross-site sendable)
    /// when the deployment itself is served over HTTPS; a Secure cookie on a
    /// plain-HTTP dev deployment would never be sent back.
    pub fn serves_https(&self) -> bool {
        self.app_url.starts_with("https://")
    }
}
