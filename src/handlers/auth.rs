// src/handlers/auth.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use rand::{Rng, distributions::Alphanumeric};
use serde::Deserialize;
use serde_json::json;
use tower_cookies::{
    Cookie, Cookies,
    cookie::{SameSite, time::Duration},
};
use url::Url;

use crate::{
    config::Config, error::AppError, models::user::UserProfile, utils::html::auth_success_page,
};

/// Session cookie carrying the serialized provider profile; 24-hour TTL,
/// no server-side session storage.
pub const SESSION_COOKIE: &str = "session";

/// Shape of the provider's token-exchange response. The access token is used
/// once for the profile fetch and discarded; only the profile snapshot
/// persists in the cookie.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
}

/// Builds the provider authorization URL for the login popup.
///
/// The `state` token is generated fresh per request but is not validated on
/// callback; see DESIGN.md.
pub async fn auth_url(State(config): State<Config>) -> Result<impl IntoResponse, AppError> {
    let app_id = config
        .oauth_app_id
        .as_deref()
        .ok_or_else(|| AppError::ConfigError("OAUTH_APP_ID not configured".to_string()))?;

    let state_token: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();

    let url = Url::parse_with_params(
        &config.oauth_authorize_url,
        &[
            ("app_id", app_id),
            ("redirect_uri", config.redirect_uri().as_str()),
            ("state", state_token.as_str()),
        ],
    )
    .map_err(|e| AppError::InternalServerError(format!("Invalid authorize URL: {}", e)))?;

    Ok(Json(json!({ "url": url.as_str() })))
}

/// Exchanges the provider authorization code for a profile and establishes
/// the cookie session.
///
/// One-shot interactive flow: no retries, and any upstream failure collapses
/// to a 500 with the cause logged. The client secret only ever travels in
/// the server-to-server exchange.
pub async fn callback(
    State(config): State<Config>,
    State(http): State<reqwest::Client>,
    cookies: Cookies,
    Query(params): Query<CallbackParams>,
) -> Result<Response, AppError> {
    // No outbound call is made without a code.
    let Some(code) = params.code else {
        return Ok((StatusCode::BAD_REQUEST, "No code provided").into_response());
    };

    let app_id = config
        .oauth_app_id
        .as_deref()
        .ok_or_else(|| AppError::ConfigError("OAUTH_APP_ID not configured".to_string()))?;
    let secret = config
        .oauth_app_secret
        .as_deref()
        .ok_or_else(|| AppError::ConfigError("OAUTH_APP_SECRET not configured".to_string()))?;

    let token: TokenResponse = http
        .post(&config.oauth_token_url)
        .header("secret_key", secret)
        .form(&[
            ("code", code.as_str()),
            ("app_id", app_id),
            ("grant_type", "authorization_code"),
            ("code_verifier", ""),
        ])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let profile: UserProfile = http
        .get(&config.oauth_profile_url)
        .header("access_token", &token.access_token)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let user_json = serde_json::to_string(&profile)
        .map_err(|e| AppError::InternalServerError(format!("Profile serialization: {}", e)))?;

    // Cookie values cannot carry raw JSON (spaces, quotes, commas), so the
    // blob is percent-encoded on the way in and decoded on the way out.
    let cookie_value = urlencoding::encode(&user_json).into_owned();
    cookies.add(session_cookie(&config, cookie_value, Duration::hours(24)));

    Ok(Html(auth_success_page(&user_json)).into_response())
}

/// Returns the profile restored from the session cookie, or 401.
/// A cookie that fails to parse is treated the same as an absent one.
pub async fn current_user(cookies: Cookies) -> Result<impl IntoResponse, AppError> {
    let cookie = cookies
        .get(SESSION_COOKIE)
        .ok_or_else(|| AppError::AuthError("Not authenticated".to_string()))?;

    let profile: UserProfile = urlencoding::decode(cookie.value())
        .ok()
        .and_then(|json| serde_json::from_str(&json).ok())
        .ok_or_else(|| AppError::AuthError("Not authenticated".to_string()))?;

    Ok(Json(profile))
}

/// Clears the session cookie. Always succeeds, logged in or not.
pub async fn logout(State(config): State<Config>, cookies: Cookies) -> impl IntoResponse {
    cookies.add(session_cookie(&config, String::new(), Duration::ZERO));
    Json(json!({ "success": true }))
}

/// Session cookie with the attributes shared by set and clear: HttpOnly,
/// path `/`, and - on HTTPS deployments - Secure with `SameSite=None` so the
/// popup flow works cross-site. Plain-HTTP dev deployments fall back to Lax,
/// since browsers refuse `SameSite=None` without Secure.
fn session_cookie(config: &Config, value: String, max_age: Duration) -> Cookie<'static> {
    let secure = config.serves_https();
    let same_site = if secure { SameSite::None } else { SameSite::Lax };

    Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(same_site)
        .max_age(max_age)
        .build()
}
