//! Shared application state

use crate::config::Config;
use crate::server::middleware::RateLimiter;
use std::sync::Arc;

/// Resources every handler can reach through `web::Data`
///
/// Cloning is cheap; each worker holds the same Arcs.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth: Arc<crate::auth::AuthSystem>,
    pub storage: Arc<crate::storage::StorageLayer>,
    /// Sliding-window request limiter for unauthenticated endpoints
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        auth: Arc<crate::auth::AuthSystem>,
        storage: Arc<crate::storage::StorageLayer>,
        rate_limiter: Arc<RateLimiter>,
    ) -> Self {
        Self {
            config,
            auth,
            storage,
            rate_limiter,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
