//! API token issuance, verification and revocation
//!
//! Tokens are opaque bearer credentials. Only the SHA-256 hash is stored;
//! the raw value is returned exactly once at creation.

use crate::config::AuthConfig;
use crate::core::models::api_token::{ApiTokenInfo, TokenExpirationStatus, TokenRole};
use crate::storage::StorageLayer;
use crate::storage::database::entities::{api_token, user};
use crate::utils::crypto::tokens::{generate_api_token, hash_api_token, is_well_formed_token};
use crate::utils::error::{ApiError, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Expiration applied when a creation request does not specify one
pub const DEFAULT_TOKEN_EXPIRATION_DAYS: u32 = 30;

/// Maximum length of a token name
pub const MAX_TOKEN_NAME_LEN: usize = 100;

/// Validated token creation parameters
#[derive(Debug, Clone)]
pub struct CreateTokenParams {
    /// Human-readable label
    pub name: String,
    /// Permission role
    pub role: TokenRole,
    /// Days until expiry
    pub expiration_days: u32,
}

/// Result of a token creation attempt
#[derive(Debug, Clone)]
pub enum CreateTokenOutcome {
    /// Token created; the raw value appears here and nowhere else
    Created {
        token_info: ApiTokenInfo,
        raw_token: String,
    },
    /// The per-user quota of non-revoked tokens is already reached
    QuotaExceeded { active: u64, limit: usize },
}

/// Result of a revocation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevokeOutcome {
    /// Token revoked by this call
    Revoked,
    /// No token with that ID exists
    NotFound,
    /// Token exists but belongs to another user
    NotOwner,
    /// Token was already revoked
    AlreadyRevoked,
}

/// Successfully authenticated bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedToken {
    /// Owning user
    pub user: user::Model,
    /// Token record ID
    pub token_id: Uuid,
    /// Permission role carried by the token
    pub role: TokenRole,
}

/// API token service
#[derive(Debug, Clone)]
pub struct ApiTokenService {
    /// Authentication configuration
    config: Arc<AuthConfig>,
    /// Storage layer for persistence
    storage: Arc<StorageLayer>,
}

/// Extract the token from an `Authorization` header value
///
/// The header must be exactly `Bearer <token>`. No case folding and no
/// whitespace trimming is applied.
pub fn parse_bearer(header: &str) -> Option<&str> {
    let token = header.strip_prefix("Bearer ")?;
    if token.is_empty() { None } else { Some(token) }
}

impl ApiTokenService {
    /// Create a new API token service
    pub fn new(config: Arc<AuthConfig>, storage: Arc<StorageLayer>) -> Self {
        Self { config, storage }
    }

    /// Create a new API token for a user
    ///
    /// Counts non-revoked tokens at write time and rejects creation at the
    /// quota. The raw token in the outcome is shown once and never again.
    pub async fn create_token(
        &self,
        user_id: Uuid,
        params: CreateTokenParams,
    ) -> Result<CreateTokenOutcome> {
        let name = params.name.trim();
        if name.is_empty() {
            return Err(ApiError::validation("Token name must not be empty"));
        }
        if name.len() > MAX_TOKEN_NAME_LEN {
            return Err(ApiError::validation(format!(
                "Token name must be at most {} characters",
                MAX_TOKEN_NAME_LEN
            )));
        }
        if params.expiration_days == 0
            || i64::from(params.expiration_days) > self.config.max_token_expiration_days
        {
            return Err(ApiError::validation(format!(
                "Token expiration must be between 1 and {} days",
                self.config.max_token_expiration_days
            )));
        }

        let limit = self.config.max_tokens_per_user;
        let active = self.storage.db().count_active_api_tokens(user_id).await?;
        if active >= limit as u64 {
            debug!("Token quota reached for user {}: {}", user_id, active);
            return Ok(CreateTokenOutcome::QuotaExceeded { active, limit });
        }

        let (model, raw_token) = self
            .mint(user_id, name, params.role, i64::from(params.expiration_days))
            .await?;

        info!("API token created: {} for user {}", model.id, user_id);
        Ok(CreateTokenOutcome::Created {
            token_info: model.to_info(),
            raw_token,
        })
    }

    /// Mint a token row without quota checks
    ///
    /// Shared by self-service creation and the CLI pairing callback.
    pub(crate) async fn mint(
        &self,
        user_id: Uuid,
        name: &str,
        role: TokenRole,
        expiration_days: i64,
    ) -> Result<(api_token::Model, String)> {
        let generated = generate_api_token();
        let expires_at = chrono::Utc::now() + chrono::Duration::days(expiration_days);

        let model = self
            .storage
            .db()
            .insert_api_token(
                user_id,
                name,
                role,
                &generated.hash,
                &generated.last_four,
                expires_at,
            )
            .await?;

        Ok((model, generated.raw))
    }

    /// Validate an `Authorization` header and resolve its owner
    ///
    /// Checks run in a fixed order: header shape, token format, hash lookup,
    /// revocation, expiry. Every failure collapses to `None` so callers
    /// cannot distinguish why a credential was rejected.
    pub async fn validate_bearer(
        &self,
        authorization: Option<&str>,
    ) -> Result<Option<AuthenticatedToken>> {
        let raw = match authorization.and_then(parse_bearer) {
            Some(raw) => raw,
            None => {
                debug!("Missing or malformed Authorization header");
                return Ok(None);
            }
        };

        // Format check runs before any storage access
        if !is_well_formed_token(raw) {
            debug!("Bearer token failed format check");
            return Ok(None);
        }

        let hash = hash_api_token(raw);
        let token = match self.storage.db().find_api_token_by_hash(&hash).await? {
            Some(token) => token,
            None => {
                debug!("Bearer token not found");
                return Ok(None);
            }
        };

        if token.is_revoked() {
            debug!("Bearer token is revoked: {}", token.id);
            return Ok(None);
        }
        if token.is_expired(chrono::Utc::now()) {
            debug!("Bearer token is expired: {}", token.id);
            return Ok(None);
        }

        // Best-effort usage stamp, never awaited on the request path
        let storage = self.storage.clone();
        let token_id = token.id;
        tokio::spawn(async move {
            if let Err(e) = storage.db().touch_api_token_last_used(token_id).await {
                warn!("Failed to update last_used_at for token {}: {}", token_id, e);
            }
        });

        let user = match self.storage.db().find_user_by_id(token.user_id).await? {
            Some(user) => user,
            None => {
                warn!("Token {} references missing user {}", token.id, token.user_id);
                return Ok(None);
            }
        };

        Ok(Some(AuthenticatedToken {
            user,
            token_id: token.id,
            role: token.role(),
        }))
    }

    /// Report whether the presented token is expired
    ///
    /// `None` for absent, malformed or unknown tokens. Revoked tokens report
    /// `is_expired: false`; revocation is a distinct terminal state.
    pub async fn check_expiration(
        &self,
        authorization: Option<&str>,
    ) -> Result<Option<TokenExpirationStatus>> {
        let raw = match authorization.and_then(parse_bearer) {
            Some(raw) => raw,
            None => return Ok(None),
        };
        if !is_well_formed_token(raw) {
            return Ok(None);
        }

        let hash = hash_api_token(raw);
        let token = match self.storage.db().find_api_token_by_hash(&hash).await? {
            Some(token) => token,
            None => return Ok(None),
        };

        if token.is_revoked() {
            return Ok(Some(TokenExpirationStatus::not_expired()));
        }
        if token.is_expired(chrono::Utc::now()) {
            return Ok(Some(TokenExpirationStatus::expired(
                token.expires_at.with_timezone(&chrono::Utc),
            )));
        }
        Ok(Some(TokenExpirationStatus::not_expired()))
    }

    /// List a user's tokens, newest first, without secrets
    pub async fn list_tokens(&self, user_id: Uuid) -> Result<Vec<ApiTokenInfo>> {
        let tokens = self.storage.db().list_api_tokens_for_user(user_id).await?;
        Ok(tokens.iter().map(|t| t.to_info()).collect())
    }

    /// Revoke a token owned by the given user
    ///
    /// Revoking an already-revoked token is rejected so stale clients can
    /// detect that their view is out of date. There is no un-revoke.
    pub async fn revoke_token(&self, user_id: Uuid, token_id: Uuid) -> Result<RevokeOutcome> {
        let token = match self.storage.db().find_api_token_by_id(token_id).await? {
            Some(token) => token,
            None => return Ok(RevokeOutcome::NotFound),
        };
        if token.user_id != user_id {
            return Ok(RevokeOutcome::NotOwner);
        }
        if token.is_revoked() {
            return Ok(RevokeOutcome::AlreadyRevoked);
        }

        // Conditional update; a concurrent revoke can still win the race
        if self.storage.db().revoke_api_token(token_id).await? {
            info!("API token revoked: {}", token_id);
            Ok(RevokeOutcome::Revoked)
        } else {
            Ok(RevokeOutcome::AlreadyRevoked)
        }
    }
}
