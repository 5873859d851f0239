//! Authentication façade
//!
//! One entry point normalizes the two credential paths: browser session
//! cookie first, bearer token second. Handlers receive a uniform context
//! regardless of how the caller authenticated.

use crate::auth::session::SessionService;
use crate::auth::tokens::ApiTokenService;
use crate::core::models::api_token::{TokenAction, TokenRole, has_permission};
use crate::storage::database::entities::user;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Which credential authenticated the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthSource {
    /// Browser session cookie
    Session,
    /// API token via Authorization header
    Token,
}

impl AuthSource {
    /// String form
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthSource::Session => "session",
            AuthSource::Token => "token",
        }
    }
}

/// Normalized result of request authentication
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// The authenticated user
    pub user: user::Model,
    /// Credential path that succeeded
    pub source: AuthSource,
    /// Token record ID when authenticated via bearer token
    pub token_id: Option<Uuid>,
    /// Token role when authenticated via bearer token
    pub role: Option<TokenRole>,
}

impl AuthContext {
    /// Whether this caller may perform the given action
    ///
    /// Session callers are full-powered. Token callers are gated by the
    /// role policy table, default-deny.
    pub fn can(&self, action: TokenAction) -> bool {
        match self.role {
            None => true,
            Some(role) => has_permission(role, action),
        }
    }
}

/// Authentication façade over sessions and tokens
#[derive(Debug, Clone)]
pub struct AuthFacade {
    /// Browser session service
    sessions: Arc<SessionService>,
    /// API token service
    tokens: Arc<ApiTokenService>,
}

impl AuthFacade {
    /// Create a new façade
    pub fn new(sessions: Arc<SessionService>, tokens: Arc<ApiTokenService>) -> Self {
        Self { sessions, tokens }
    }

    /// Authenticate a request from its credentials
    ///
    /// Tries the session cookie first (the cheap, common case), then falls
    /// back to the Authorization header. `None` when neither succeeds.
    pub async fn authenticate(
        &self,
        session_cookie: Option<&str>,
        authorization: Option<&str>,
    ) -> Result<Option<AuthContext>> {
        if let Some(cookie) = session_cookie {
            if let Some(user) = self.sessions.validate_session(cookie).await? {
                debug!("Request authenticated via session for user {}", user.id);
                return Ok(Some(AuthContext {
                    user,
                    source: AuthSource::Session,
                    token_id: None,
                    role: None,
                }));
            }
        }

        if let Some(auth) = self.tokens.validate_bearer(authorization).await? {
            debug!(
                "Request authenticated via token {} for user {}",
                auth.token_id, auth.user.id
            );
            return Ok(Some(AuthContext {
                user: auth.user,
                source: AuthSource::Token,
                token_id: Some(auth.token_id),
                role: Some(auth.role),
            }));
        }

        Ok(None)
    }
}
