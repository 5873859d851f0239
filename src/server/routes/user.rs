//! Current-user endpoint

use crate::core::models::api_token::TokenAction;
use crate::core::models::user::UserProfile;
use crate::server::routes::{ApiResponse, require_auth};
use crate::server::state::AppState;
use crate::utils::error::ApiError;
use actix_web::{HttpRequest, HttpResponse, web};

/// Configure user routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/v1/user", web::get().to(current_user));
}

/// Profile of the authenticated caller
///
/// Accepts either credential path. Token callers need `profile:read`, so a
/// blueprints-scoped token cannot read account details.
async fn current_user(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let ctx = require_auth(&state, &req).await?;

    if !ctx.can(TokenAction::ProfileRead) {
        return Err(ApiError::forbidden(
            "Token role does not permit profile access",
        ));
    }

    let blueprint_count = state
        .storage
        .db()
        .count_blueprints_for_user(ctx.user.id)
        .await?;
    let api_token_count = state
        .storage
        .db()
        .count_active_api_tokens(ctx.user.id)
        .await?;

    let profile = UserProfile {
        id: ctx.user.id,
        email: ctx.user.email.clone(),
        name: ctx.user.name.clone(),
        plan: ctx.user.plan(),
        created_at: ctx.user.created_at.with_timezone(&chrono::Utc),
        blueprint_count,
        api_token_count,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(profile)))
}
