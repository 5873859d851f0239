//! HTTP server assembly
//!
//! Connects storage, runs migrations, wires the auth services and rate
//! limiter into [`AppState`], and serves the route tree.

use crate::config::{Config, CorsConfig, ServerConfig};
use crate::server::middleware::RequestIdMiddleware;
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{ApiError, Result};
use actix_cors::Cors;
use actix_web::{App, HttpServer as ActixHttpServer, middleware::DefaultHeaders, web};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

/// How often the background sweeper clears expired rows
const SWEEP_INTERVAL_SECS: u64 = 60;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

/// Translate the CORS section of the config into actix-cors middleware
fn build_cors(cors_config: &CorsConfig) -> Cors {
    let mut cors = Cors::default();
    if !cors_config.enabled {
        return cors;
    }

    if cors_config.allows_all_origins() {
        cors = cors.allow_any_origin();
        if let Err(e) = cors_config.validate() {
            warn!(error = %e, "CORS configuration warning");
        }
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    let methods: Vec<actix_web::http::Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    if !methods.is_empty() {
        cors = cors.allowed_methods(methods);
    }

    let headers: Vec<actix_web::http::header::HeaderName> = cors_config
        .allowed_headers
        .iter()
        .filter_map(|h| h.parse().ok())
        .collect();
    if !headers.is_empty() {
        cors = cors.allowed_headers(headers);
    }

    cors = cors.max_age(cors_config.max_age as usize);
    if cors_config.allow_credentials {
        // The browser session cookie crosses origins only with this set
        cors = cors.supports_credentials();
    }
    cors
}

impl HttpServer {
    /// Connect storage, migrate, and wire up the application state
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let storage = Arc::new(crate::storage::StorageLayer::new(config.storage()).await?);
        storage.migrate().await?;

        let auth = Arc::new(
            crate::auth::AuthSystem::new(config.auth(), config.pairing(), Arc::clone(&storage))
                .await?,
        );
        let rate_limiter = Arc::new(crate::server::middleware::RateLimiter::new(
            config.rate_limit(),
        ));

        let state = AppState::new(Arc::new(config.clone()), auth, storage, rate_limiter);

        Ok(Self {
            config: config.server().clone(),
            state,
        })
    }

    /// Build one actix App instance; called per worker
    fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let cors = build_cors(&state.config.server().cors);

        App::new()
            .app_data(state)
            .wrap(cors)
            .wrap(TracingLogger::default())
            .wrap(DefaultHeaders::new().add(("Server", "LynxPrompt")))
            .wrap(RequestIdMiddleware)
            .configure(routes::health::configure_routes)
            .configure(routes::account::configure_routes)
            .configure(routes::tokens::configure_routes)
            .configure(routes::cli_auth::configure_routes)
            .configure(routes::user::configure_routes)
            .configure(routes::blueprints::configure_routes)
    }

    /// Spawn the periodic cleanup of expired sessions and limiter entries
    fn spawn_sweeper(state: AppState) {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(SWEEP_INTERVAL_SECS));
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if let Err(e) = state.auth.pairing.sweep_expired().await {
                    warn!("Pairing sweep failed: {}", e);
                }
                if let Err(e) = state.auth.sessions.sweep_expired().await {
                    warn!("Session sweep failed: {}", e);
                }
                state.rate_limiter.cleanup_old_entries();
            }
        });
    }

    /// Bind and serve until shutdown
    pub async fn start(self) -> Result<()> {
        let bind_addr = format!("{}:{}", self.config.host, self.config.port);
        let port = self.config.port;

        Self::spawn_sweeper(self.state.clone());

        let state = web::Data::new(self.state);
        let server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .bind(&bind_addr)
            .map_err(|e| Self::format_bind_error(e, &bind_addr, port))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| ApiError::internal(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Server configuration in effect
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Shared application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
