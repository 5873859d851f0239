//! Blueprint endpoints
//!
//! A minimal surface over stored configuration blueprints. These routes
//! exist to exercise role-scoped tokens; rendering and search live
//! elsewhere.

use crate::core::models::api_token::TokenAction;
use crate::core::models::blueprint::{
    BlueprintDetail, BlueprintSummary, BlueprintVisibility, slugify,
};
use crate::server::routes::{ApiResponse, require_auth};
use crate::server::state::AppState;
use crate::utils::error::ApiError;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Maximum accepted blueprint body size, in bytes
const MAX_CONTENT_LEN: usize = 64 * 1024;

/// Configure blueprint routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1/blueprints")
            .route("", web::get().to(list_blueprints))
            .route("", web::post().to(create_blueprint))
            .route("/{id}", web::get().to(get_blueprint)),
    );
}

/// Blueprint creation request
#[derive(Debug, Deserialize)]
struct CreateBlueprintBody {
    name: String,
    description: Option<String>,
    content: String,
    visibility: Option<String>,
}

/// Blueprint list response
#[derive(Debug, Serialize)]
struct BlueprintListResponse {
    blueprints: Vec<BlueprintSummary>,
}

/// List the caller's own blueprints plus public ones
async fn list_blueprints(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let ctx = require_auth(&state, &req).await?;
    if !ctx.can(TokenAction::BlueprintsRead) {
        return Err(ApiError::forbidden(
            "Token role does not permit reading blueprints",
        ));
    }

    let blueprints = state
        .storage
        .db()
        .list_blueprints_visible_to(ctx.user.id)
        .await?;
    let blueprints = blueprints.iter().map(|b| b.to_summary()).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(BlueprintListResponse { blueprints })))
}

/// Create a blueprint
async fn create_blueprint(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<CreateBlueprintBody>,
) -> Result<HttpResponse, ApiError> {
    let ctx = require_auth(&state, &req).await?;
    if !ctx.can(TokenAction::BlueprintsWrite) {
        return Err(ApiError::forbidden(
            "Token role does not permit writing blueprints",
        ));
    }

    let name = body.name.trim();
    if name.is_empty() || name.len() > 100 {
        return Err(ApiError::validation(
            "Blueprint name must be between 1 and 100 characters",
        ));
    }
    if body.content.is_empty() || body.content.len() > MAX_CONTENT_LEN {
        return Err(ApiError::validation(format!(
            "Blueprint content must be between 1 and {} bytes",
            MAX_CONTENT_LEN
        )));
    }
    let visibility = match body.visibility.as_deref() {
        None => BlueprintVisibility::default(),
        Some(raw) => BlueprintVisibility::from_str(raw)
            .map_err(|_| ApiError::validation(format!("Unknown visibility: {}", raw)))?,
    };

    let slug = slugify(name);
    if slug.is_empty() {
        return Err(ApiError::validation(
            "Blueprint name must contain at least one alphanumeric character",
        ));
    }
    if state
        .storage
        .db()
        .find_blueprint_by_slug(ctx.user.id, &slug)
        .await?
        .is_some()
    {
        return Err(ApiError::conflict(format!(
            "A blueprint with slug '{}' already exists",
            slug
        )));
    }

    let model = state
        .storage
        .db()
        .insert_blueprint(
            ctx.user.id,
            name,
            &slug,
            body.description.as_deref(),
            &body.content,
            visibility,
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(model.to_detail())))
}

/// Fetch one blueprint
///
/// Private blueprints resolve only for their owner; everyone else sees
/// the same 404 as for an id that never existed.
async fn get_blueprint(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let ctx = require_auth(&state, &req).await?;
    if !ctx.can(TokenAction::BlueprintsRead) {
        return Err(ApiError::forbidden(
            "Token role does not permit reading blueprints",
        ));
    }

    let blueprint_id = path.into_inner();
    let blueprint = state
        .storage
        .db()
        .find_blueprint_by_id(blueprint_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Blueprint not found"))?;

    let visible = blueprint.visibility() == BlueprintVisibility::Public
        || blueprint.user_id == ctx.user.id;
    if !visible {
        return Err(ApiError::not_found("Blueprint not found"));
    }

    let detail: BlueprintDetail = blueprint.to_detail();
    Ok(HttpResponse::Ok().json(ApiResponse::success(detail)))
}
