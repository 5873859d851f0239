//! Token self-service endpoints
//!
//! Create, list and revoke API tokens. These endpoints accept browser
//! sessions only; a bearer token can never manage tokens.

use crate::auth::{CreateTokenOutcome, CreateTokenParams, RevokeOutcome};
use crate::auth::tokens::service::DEFAULT_TOKEN_EXPIRATION_DAYS;
use crate::core::models::api_token::{ApiTokenInfo, TokenRole};
use crate::server::routes::{ApiResponse, require_session};
use crate::server::state::AppState;
use crate::utils::error::ApiError;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Configure token self-service routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/user/api-tokens")
            .route("", web::post().to(create_token))
            .route("", web::get().to(list_tokens))
            .route("/{id}", web::delete().to(revoke_token)),
    );
}

/// Token creation request
#[derive(Debug, Deserialize)]
struct CreateTokenBody {
    name: String,
    role: String,
    expiration_days: Option<u32>,
}

/// Token creation response; the only place the raw token ever appears
#[derive(Debug, Serialize)]
struct CreatedTokenResponse {
    token: String,
    token_info: ApiTokenInfo,
}

/// Token list response
#[derive(Debug, Serialize)]
struct TokenListResponse {
    tokens: Vec<ApiTokenInfo>,
}

/// Create a new API token
async fn create_token(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<CreateTokenBody>,
) -> Result<HttpResponse, ApiError> {
    let user = require_session(&state, &req).await?;

    let role = TokenRole::from_str(&body.role)
        .map_err(|_| ApiError::validation(format!("Unknown token role: {}", body.role)))?;
    let params = CreateTokenParams {
        name: body.name.clone(),
        role,
        expiration_days: body.expiration_days.unwrap_or(DEFAULT_TOKEN_EXPIRATION_DAYS),
    };

    match state.auth.tokens.create_token(user.id, params).await? {
        CreateTokenOutcome::Created {
            token_info,
            raw_token,
        } => Ok(HttpResponse::Ok().json(ApiResponse::success(CreatedTokenResponse {
            token: raw_token,
            token_info,
        }))),
        CreateTokenOutcome::QuotaExceeded { active, limit } => {
            Err(ApiError::validation(format!(
                "Token quota exceeded: {} of {} tokens in use",
                active, limit
            )))
        }
    }
}

/// List the caller's tokens without secrets
async fn list_tokens(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let user = require_session(&state, &req).await?;

    let tokens = state.auth.tokens.list_tokens(user.id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(TokenListResponse { tokens })))
}

/// Revoke one of the caller's tokens
async fn revoke_token(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let user = require_session(&state, &req).await?;
    let token_id = path.into_inner();

    match state.auth.tokens.revoke_token(user.id, token_id).await? {
        RevokeOutcome::Revoked => Ok(HttpResponse::Ok().json(ApiResponse::ok())),
        RevokeOutcome::NotFound => Err(ApiError::not_found("Token not found")),
        RevokeOutcome::NotOwner => Err(ApiError::forbidden("Token belongs to another user")),
        RevokeOutcome::AlreadyRevoked => Err(ApiError::bad_request("Token is already revoked")),
    }
}
