//! HTTP route modules
//!
//! This module contains all HTTP route handlers organized by functionality.

pub mod account;
pub mod blueprints;
pub mod cli_auth;
pub mod health;
pub mod tokens;
pub mod user;

use crate::auth::AuthContext;
use crate::server::state::AppState;
use crate::storage::database::entities::user as user_entity;
use crate::utils::error::{ApiError, Result};
use actix_web::{HttpRequest, web};
use actix_web::http::header;

/// Standard API response structure
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T>
where
    T: serde::Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl<T> ApiResponse<T> {
    /// Create an error response for any type
    pub fn error_for_type(message: String) -> ApiResponse<T> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

impl ApiResponse<()> {
    /// Bare success with no payload
    pub fn ok() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }
}

/// Raw value of the `Authorization` header, if any
pub(crate) fn authorization_header(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}

/// Value of the session cookie, if any
pub(crate) fn session_cookie(state: &AppState, req: &HttpRequest) -> Option<String> {
    req.cookie(state.auth.sessions.cookie_name())
        .map(|c| c.value().to_string())
}

/// Authenticate a request through the façade, session first then bearer
///
/// Failures are 401. When the presented bearer token is specifically
/// expired, the error carries `expired_at` so clients can prompt for
/// regeneration instead of showing a generic failure.
pub(crate) async fn require_auth(state: &AppState, req: &HttpRequest) -> Result<AuthContext> {
    let cookie = session_cookie(state, req);
    let authorization = authorization_header(req);

    if let Some(ctx) = state
        .auth
        .facade
        .authenticate(cookie.as_deref(), authorization.as_deref())
        .await?
    {
        return Ok(ctx);
    }

    if let Some(status) = state
        .auth
        .tokens
        .check_expiration(authorization.as_deref())
        .await?
    {
        if status.is_expired {
            if let Some(expired_at) = status.expired_at {
                return Err(ApiError::token_expired(expired_at));
            }
        }
    }

    Err(ApiError::auth("Authentication required"))
}

/// Authenticate a request that only accepts a browser session
///
/// Token-management endpoints refuse bearer credentials outright; a token
/// must never be able to mint or revoke tokens.
pub(crate) async fn require_session(state: &AppState, req: &HttpRequest) -> Result<user_entity::Model> {
    let cookie = match session_cookie(state, req) {
        Some(cookie) => cookie,
        None => return Err(ApiError::session("Session required")),
    };
    match state.auth.sessions.validate_session(&cookie).await? {
        Some(user) => Ok(user),
        None => Err(ApiError::session("Session is invalid or expired")),
    }
}

/// Enforce the advisory rate limit for unauthenticated endpoints
pub(crate) fn enforce_rate_limit(state: &web::Data<AppState>, req: &HttpRequest) -> Result<()> {
    let client = crate::server::middleware::client_ip(req);
    state.rate_limiter.check(&client).map_err(|retry_secs| {
        ApiError::rate_limit(format!(
            "Too many requests, retry in {} seconds",
            retry_secs
        ))
    })
}
