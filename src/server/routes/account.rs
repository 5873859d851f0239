//! Account endpoints
//!
//! Registration, login and logout. Successful register and login set the
//! session cookie; logout clears it.

use crate::auth::RegisterOutcome;
use crate::core::models::user::UserSummary;
use crate::server::routes::{ApiResponse, enforce_rate_limit, session_cookie};
use crate::server::state::AppState;
use crate::utils::error::ApiError;
use actix_web::cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Configure account routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout)),
    );
}

/// Registration request
#[derive(Debug, Deserialize)]
struct RegisterRequest {
    email: String,
    name: String,
    password: String,
}

/// Login request
#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

/// Signed-in response body
#[derive(Debug, Serialize)]
struct SignedInResponse {
    user: UserSummary,
}

/// Build the session cookie attached to register and login responses
fn build_session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    Cookie::build(state.auth.sessions.cookie_name().to_string(), token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(!state.config.server().dev_mode)
        .max_age(CookieDuration::hours(
            state.config.auth().session_ttl_hours as i64,
        ))
        .finish()
}

/// Register a new account
async fn register(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    enforce_rate_limit(&state, &req)?;

    match state
        .auth
        .sessions
        .register(&body.email, &body.name, &body.password)
        .await?
    {
        RegisterOutcome::Registered {
            user,
            session_token,
        } => {
            let cookie = build_session_cookie(&state, session_token);
            Ok(HttpResponse::Ok().cookie(cookie).json(ApiResponse::success(
                SignedInResponse {
                    user: user.to_summary(),
                },
            )))
        }
        RegisterOutcome::EmailTaken => {
            Err(ApiError::conflict("An account with that email already exists"))
        }
    }
}

/// Sign in with email and password
async fn login(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    enforce_rate_limit(&state, &req)?;

    match state.auth.sessions.login(&body.email, &body.password).await? {
        Some((user, session_token)) => {
            let cookie = build_session_cookie(&state, session_token);
            Ok(HttpResponse::Ok().cookie(cookie).json(ApiResponse::success(
                SignedInResponse {
                    user: user.to_summary(),
                },
            )))
        }
        None => Err(ApiError::auth("Invalid email or password")),
    }
}

/// Sign out. Safe to call without a live session.
async fn logout(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse, ApiError> {
    if let Some(cookie_value) = session_cookie(&state, &req) {
        state.auth.sessions.logout(&cookie_value).await?;
        info!("User logged out");
    }

    let mut removal = Cookie::new(state.auth.sessions.cookie_name().to_string(), "");
    removal.set_path("/");
    removal.make_removal();

    Ok(HttpResponse::Ok().cookie(removal).json(ApiResponse::ok()))
}
