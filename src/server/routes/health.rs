//! Health check endpoint

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use std::borrow::Cow;
use tracing::debug;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

/// Health check response body
#[derive(Debug, serde::Serialize)]
struct HealthStatus {
    status: Cow<'static, str>,
    database: Cow<'static, str>,
    timestamp: chrono::DateTime<chrono::Utc>,
    version: Cow<'static, str>,
}

/// Liveness plus database connectivity
///
/// Used by load balancers and by `lynx status`. Degrades to HTTP 503 when
/// the database check fails.
pub async fn health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Health check requested");

    let database_ok = state.storage.health_check().await.is_ok();
    let health_status = HealthStatus {
        status: Cow::Borrowed(if database_ok { "healthy" } else { "degraded" }),
        database: Cow::Borrowed(if database_ok { "up" } else { "down" }),
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
    };

    if database_ok {
        Ok(HttpResponse::Ok().json(ApiResponse::success(health_status)))
    } else {
        Ok(HttpResponse::ServiceUnavailable().json(ApiResponse::success(health_status)))
    }
}
