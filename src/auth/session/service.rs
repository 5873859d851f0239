//! Account registration and browser sessions
//!
//! Browser sessions are opaque random tokens stored server-side; the cookie
//! value is the row key. No claims are embedded client-side.

use crate::config::AuthConfig;
use crate::core::models::user::Plan;
use crate::storage::StorageLayer;
use crate::storage::database::entities::user;
use crate::utils::crypto::password::{hash_password, verify_password};
use crate::utils::crypto::tokens::generate_browser_session_token;
use crate::utils::error::{ApiError, Result};
use crate::utils::is_valid_email;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Maximum length of a display name
pub const MAX_NAME_LEN: usize = 100;

/// Result of a registration attempt
#[derive(Debug, Clone)]
pub enum RegisterOutcome {
    /// Account created and signed in
    Registered {
        user: user::Model,
        session_token: String,
    },
    /// An account with that email already exists
    EmailTaken,
}

/// Browser session service
#[derive(Debug, Clone)]
pub struct SessionService {
    /// Authentication configuration
    config: Arc<AuthConfig>,
    /// Storage layer for persistence
    storage: Arc<StorageLayer>,
}

impl SessionService {
    /// Create a new session service
    pub fn new(config: Arc<AuthConfig>, storage: Arc<StorageLayer>) -> Self {
        Self { config, storage }
    }

    /// Name of the cookie carrying the session token
    pub fn cookie_name(&self) -> &str {
        &self.config.session_cookie_name
    }

    /// Register a new account on the FREE plan and sign it in
    pub async fn register(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<RegisterOutcome> {
        let email = email.trim().to_lowercase();
        if !is_valid_email(&email) {
            return Err(ApiError::validation("Invalid email address"));
        }
        let name = name.trim();
        if name.is_empty() || name.len() > MAX_NAME_LEN {
            return Err(ApiError::validation(format!(
                "Name must be between 1 and {} characters",
                MAX_NAME_LEN
            )));
        }
        if password.len() < self.config.min_password_len {
            return Err(ApiError::validation(format!(
                "Password must be at least {} characters",
                self.config.min_password_len
            )));
        }

        if self.storage.db().find_user_by_email(&email).await?.is_some() {
            debug!("Registration rejected, email already in use");
            return Ok(RegisterOutcome::EmailTaken);
        }

        let password_hash = hash_password(password)?;
        let user = self
            .storage
            .db()
            .create_user(&email, name, &password_hash, Plan::Free)
            .await?;
        let session_token = self.open_session(&user).await?;

        info!("User registered: {}", user.id);
        Ok(RegisterOutcome::Registered {
            user,
            session_token,
        })
    }

    /// Verify credentials and open a session
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<Option<(user::Model, String)>> {
        let email = email.trim().to_lowercase();
        let user = match self.storage.db().find_user_by_email(&email).await? {
            Some(user) => user,
            None => {
                debug!("Login failed, unknown email");
                return Ok(None);
            }
        };

        if !verify_password(password, &user.password_hash)? {
            debug!("Login failed, wrong password for user {}", user.id);
            return Ok(None);
        }

        let session_token = self.open_session(&user).await?;
        info!("User logged in: {}", user.id);
        Ok(Some((user, session_token)))
    }

    /// Delete a session. Idempotent; logging out twice is not an error.
    pub async fn logout(&self, session_token: &str) -> Result<()> {
        self.storage.db().delete_user_session(session_token).await?;
        debug!("Session deleted");
        Ok(())
    }

    /// Resolve a session token to its user
    ///
    /// Expired sessions are deleted on sight. A hit stamps
    /// `last_accessed_at` best-effort off the request path.
    pub async fn validate_session(&self, session_token: &str) -> Result<Option<user::Model>> {
        let session = match self.storage.db().find_user_session(session_token).await? {
            Some(session) => session,
            None => return Ok(None),
        };

        if session.is_expired(chrono::Utc::now()) {
            debug!("Session is expired, deleting");
            self.storage.db().delete_user_session(session_token).await?;
            return Ok(None);
        }

        let storage = self.storage.clone();
        let token = session_token.to_string();
        tokio::spawn(async move {
            if let Err(e) = storage.db().touch_user_session(&token).await {
                warn!("Failed to update last_accessed_at for session: {}", e);
            }
        });

        let user = match self.storage.db().find_user_by_id(session.user_id).await? {
            Some(user) => user,
            None => {
                warn!("Session references missing user {}", session.user_id);
                return Ok(None);
            }
        };
        Ok(Some(user))
    }

    /// Delete all browser sessions past their expiration
    pub async fn sweep_expired(&self) -> Result<u64> {
        let removed = self.storage.db().delete_expired_user_sessions().await?;
        if removed > 0 {
            debug!("Swept {} expired browser sessions", removed);
        }
        Ok(removed)
    }

    /// Insert a fresh session row for a user
    async fn open_session(&self, user: &user::Model) -> Result<String> {
        let session_token = generate_browser_session_token();
        let expires_at =
            chrono::Utc::now() + chrono::Duration::hours(self.config.session_ttl_hours as i64);
        self.storage
            .db()
            .insert_user_session(&session_token, user.id, expires_at)
            .await?;
        Ok(session_token)
    }
}
