//! Authentication and authorization system
//!
//! This module provides API tokens, browser sessions, CLI pairing and the
//! request authentication façade.

pub mod facade;
pub mod pairing;
pub mod session;
pub mod tokens;

// Re-export commonly used types
pub use facade::{AuthContext, AuthFacade, AuthSource};
pub use pairing::{CallbackOutcome, PairingService};
pub use session::{RegisterOutcome, SessionService};
pub use tokens::{ApiTokenService, CreateTokenOutcome, CreateTokenParams, RevokeOutcome};

use crate::config::{AuthConfig, PairingConfig};
use crate::storage::StorageLayer;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::info;

/// Main authentication system
#[derive(Debug, Clone)]
pub struct AuthSystem {
    /// API token service
    pub tokens: Arc<ApiTokenService>,
    /// CLI pairing service
    pub pairing: Arc<PairingService>,
    /// Browser session service
    pub sessions: Arc<SessionService>,
    /// Request authentication façade
    pub facade: Arc<AuthFacade>,
}

impl AuthSystem {
    /// Create a new authentication system
    pub async fn new(
        auth_config: &AuthConfig,
        pairing_config: &PairingConfig,
        storage: Arc<StorageLayer>,
    ) -> Result<Self> {
        info!("Initializing authentication system");

        let auth_config = Arc::new(auth_config.clone());
        let pairing_config = Arc::new(pairing_config.clone());

        let tokens = Arc::new(ApiTokenService::new(auth_config.clone(), storage.clone()));
        let sessions = Arc::new(SessionService::new(auth_config.clone(), storage.clone()));
        let pairing = Arc::new(PairingService::new(
            pairing_config,
            auth_config,
            tokens.clone(),
            storage,
        ));
        let facade = Arc::new(AuthFacade::new(sessions.clone(), tokens.clone()));

        info!("Authentication system initialized successfully");
        Ok(Self {
            tokens,
            pairing,
            sessions,
            facade,
        })
    }
}
