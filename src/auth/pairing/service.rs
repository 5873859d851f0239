//! CLI device-pairing protocol
//!
//! A CLI obtains an API token by opening a browser to a hosted sign-in page
//! and polling an unauthenticated endpoint until the browser completes the
//! pairing. The session id is the only capability; it is unguessable.

use crate::auth::tokens::ApiTokenService;
use crate::config::{AuthConfig, PairingConfig};
use crate::core::models::api_token::TokenRole;
use crate::core::models::cli_session::{PairingInit, PairingStatus, PollOutcome};
use crate::storage::StorageLayer;
use crate::utils::crypto::tokens::generate_pairing_session_id;
use crate::utils::error::{ApiError, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Name recorded on tokens minted through the pairing flow
const CLI_TOKEN_NAME: &str = "CLI Token";

/// Result of a pairing callback attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// Pairing completed by this call
    Completed,
    /// No session with that id exists
    NotFound,
    /// The pairing window has closed
    Expired,
    /// Another callback already completed this session
    AlreadyCompleted,
}

/// CLI pairing service
#[derive(Debug, Clone)]
pub struct PairingService {
    /// Pairing configuration
    config: Arc<PairingConfig>,
    /// Authentication configuration, for the minted token's lifetime
    auth_config: Arc<AuthConfig>,
    /// Token service used to mint the CLI token
    tokens: Arc<ApiTokenService>,
    /// Storage layer for persistence
    storage: Arc<StorageLayer>,
}

impl PairingService {
    /// Create a new pairing service
    pub fn new(
        config: Arc<PairingConfig>,
        auth_config: Arc<AuthConfig>,
        tokens: Arc<ApiTokenService>,
        storage: Arc<StorageLayer>,
    ) -> Self {
        Self {
            config,
            auth_config,
            tokens,
            storage,
        }
    }

    /// Start a new pairing session
    ///
    /// No authentication; anyone may open a pairing window. The returned
    /// auth URL points the user's browser at the hosted sign-in page with
    /// the session id as a query parameter.
    pub async fn init(&self) -> Result<PairingInit> {
        let session_id = generate_pairing_session_id();
        let expires_at =
            chrono::Utc::now() + chrono::Duration::seconds(self.config.session_ttl_secs as i64);

        self.storage
            .db()
            .insert_cli_session(&session_id, expires_at)
            .await?;

        let mut auth_url = url::Url::parse(&self.config.auth_page_url)
            .map_err(|e| ApiError::internal(format!("Invalid auth page URL: {}", e)))?;
        auth_url
            .query_pairs_mut()
            .append_pair("session", &session_id);

        info!("CLI pairing session started");
        Ok(PairingInit {
            session_id,
            auth_url: auth_url.to_string(),
            expires_at,
        })
    }

    /// Complete a pairing session on behalf of an authenticated browser user
    ///
    /// Mints a `BLUEPRINTS_FULL` token and attaches it to the session in a
    /// conditional update. When two callbacks race, exactly one wins; the
    /// loser's freshly minted token is revoked again.
    pub async fn complete(&self, session_id: &str, user_id: Uuid) -> Result<CallbackOutcome> {
        let session = match self.storage.db().find_cli_session(session_id).await? {
            Some(session) => session,
            None => return Ok(CallbackOutcome::NotFound),
        };

        let now = chrono::Utc::now();
        if session.is_expired(now) {
            debug!("Pairing callback on expired session");
            self.storage.db().delete_cli_session(session_id).await?;
            return Ok(CallbackOutcome::Expired);
        }
        if session.status() == PairingStatus::Completed {
            return Ok(CallbackOutcome::AlreadyCompleted);
        }

        let (token, raw_token) = self
            .tokens
            .mint(
                user_id,
                CLI_TOKEN_NAME,
                TokenRole::BlueprintsFull,
                self.auth_config.cli_token_expiration_days,
            )
            .await?;

        let won = self
            .storage
            .db()
            .complete_cli_session(session_id, user_id, token.id, &raw_token)
            .await?;

        if !won {
            // Lost the race; do not leave an orphaned credential behind
            warn!("Pairing callback lost completion race, revoking minted token");
            self.storage.db().revoke_api_token(token.id).await?;
            return Ok(CallbackOutcome::AlreadyCompleted);
        }

        info!("CLI pairing session completed for user {}", user_id);
        Ok(CallbackOutcome::Completed)
    }

    /// Poll a pairing session
    ///
    /// Unknown and cleaned-up sessions are indistinguishable; both report
    /// `expired`. The first poll that observes COMPLETED receives the raw
    /// token; the stored copy is cleared immediately and the row is deleted
    /// after a grace window that tolerates duplicate polls.
    pub async fn poll(&self, session_id: &str) -> Result<PollOutcome> {
        let session = match self.storage.db().find_cli_session(session_id).await? {
            Some(session) => session,
            None => return Ok(PollOutcome::Expired),
        };

        let now = chrono::Utc::now();
        if session.is_expired(now) {
            debug!("Poll observed expired pairing session, deleting");
            self.storage.db().delete_cli_session(session_id).await?;
            return Ok(PollOutcome::Expired);
        }

        match session.status() {
            PairingStatus::Pending => Ok(PollOutcome::Pending),
            PairingStatus::Completed => {
                let user_id = match session.user_id {
                    Some(user_id) => user_id,
                    None => {
                        warn!("Completed pairing session has no user, treating as expired");
                        self.storage.db().delete_cli_session(session_id).await?;
                        return Ok(PollOutcome::Expired);
                    }
                };
                let user = match self.storage.db().find_user_by_id(user_id).await? {
                    Some(user) => user,
                    None => {
                        warn!("Completed pairing session references missing user");
                        self.storage.db().delete_cli_session(session_id).await?;
                        return Ok(PollOutcome::Expired);
                    }
                };

                let token = session.token.clone();
                if token.is_some() {
                    // First successful poll: clear the secret and schedule
                    // row deletion after the grace window
                    self.storage.db().clear_cli_session_token(session_id).await?;
                    self.schedule_deletion(session_id);
                }

                Ok(PollOutcome::Completed {
                    token,
                    user: user.to_summary(),
                })
            }
        }
    }

    /// Delete all pairing sessions past their expiration
    pub async fn sweep_expired(&self) -> Result<u64> {
        let removed = self.storage.db().delete_expired_cli_sessions().await?;
        if removed > 0 {
            debug!("Swept {} expired pairing sessions", removed);
        }
        Ok(removed)
    }

    /// Spawn a delayed deletion of a completed session row
    fn schedule_deletion(&self, session_id: &str) {
        let storage = self.storage.clone();
        let session_id = session_id.to_string();
        let grace = self.config.completed_grace_secs;
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(grace)).await;
            if let Err(e) = storage.db().delete_cli_session(&session_id).await {
                warn!("Failed to delete completed pairing session: {}", e);
            }
        });
    }
}
