//! CLI device-pairing endpoints
//!
//! Three-legged handshake: the CLI calls `init`, the user's browser calls
//! `callback` after signing in, and the CLI polls until it receives its
//! token. `init` and `poll` are unauthenticated; the unguessable session
//! id is the capability.

use crate::auth::CallbackOutcome;
use crate::core::models::cli_session::PollOutcome;
use crate::core::models::user::UserSummary;
use crate::server::routes::{ApiResponse, enforce_rate_limit, require_session};
use crate::server::state::AppState;
use crate::utils::error::ApiError;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Configure CLI pairing routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/cli-auth").route("/init", web::post().to(init)));
    cfg.service(
        web::scope("/auth/cli")
            .route("/callback", web::post().to(callback))
            .route("/poll", web::get().to(poll)),
    );
}

/// Pairing callback request
#[derive(Debug, Deserialize)]
struct CallbackRequest {
    session_id: String,
}

/// Poll query parameters
#[derive(Debug, Deserialize)]
struct PollQuery {
    session: Option<String>,
}

/// Poll response body
#[derive(Debug, Serialize)]
struct PollResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<UserSummary>,
}

impl From<PollOutcome> for PollResponse {
    fn from(outcome: PollOutcome) -> Self {
        match outcome {
            PollOutcome::Pending => PollResponse {
                status: "pending",
                token: None,
                user: None,
            },
            PollOutcome::Completed { token, user } => PollResponse {
                status: "completed",
                token,
                user: Some(user),
            },
            PollOutcome::Expired => PollResponse {
                status: "expired",
                token: None,
                user: None,
            },
        }
    }
}

/// Start a pairing session
async fn init(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    enforce_rate_limit(&state, &req)?;

    let pairing = state.auth.pairing.init().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(pairing)))
}

/// Complete a pairing session from the signed-in browser
async fn callback(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<CallbackRequest>,
) -> Result<HttpResponse, ApiError> {
    let user = require_session(&state, &req).await?;

    let session_id = body.session_id.trim();
    if session_id.is_empty() {
        return Err(ApiError::bad_request("session_id must not be empty"));
    }

    match state.auth.pairing.complete(session_id, user.id).await? {
        CallbackOutcome::Completed => {
            info!("Pairing callback completed by user {}", user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::ok()))
        }
        CallbackOutcome::NotFound => Err(ApiError::not_found("Pairing session not found")),
        CallbackOutcome::Expired => Err(ApiError::gone("Pairing session has expired")),
        CallbackOutcome::AlreadyCompleted => {
            Err(ApiError::conflict("Pairing session already completed"))
        }
    }
}

/// Poll a pairing session for its outcome
async fn poll(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<PollQuery>,
) -> Result<HttpResponse, ApiError> {
    enforce_rate_limit(&state, &req)?;

    let session_id = match query.session.as_deref().map(str::trim) {
        Some(session_id) if !session_id.is_empty() => session_id,
        _ => return Err(ApiError::bad_request("Missing session parameter")),
    };

    let outcome = state.auth.pairing.poll(session_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(PollResponse::from(outcome))))
}
