//! API token models and the role permission table

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role scoped onto an API token at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenRole {
    /// Read and write blueprints
    BlueprintsFull,
    /// Read blueprints only
    BlueprintsReadonly,
    /// Read and write the owner's profile
    ProfileFull,
    /// Everything
    Full,
}

impl TokenRole {
    /// Storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenRole::BlueprintsFull => "BLUEPRINTS_FULL",
            TokenRole::BlueprintsReadonly => "BLUEPRINTS_READONLY",
            TokenRole::ProfileFull => "PROFILE_FULL",
            TokenRole::Full => "FULL",
        }
    }
}

impl std::fmt::Display for TokenRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TokenRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BLUEPRINTS_FULL" => Ok(TokenRole::BlueprintsFull),
            "BLUEPRINTS_READONLY" => Ok(TokenRole::BlueprintsReadonly),
            "PROFILE_FULL" => Ok(TokenRole::ProfileFull),
            "FULL" => Ok(TokenRole::Full),
            _ => Err(format!("Invalid token role: {}", s)),
        }
    }
}

/// Action a token-authenticated caller may attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenAction {
    /// Read blueprints
    BlueprintsRead,
    /// Create or modify blueprints
    BlueprintsWrite,
    /// Read the owner's profile
    ProfileRead,
    /// Modify the owner's profile
    ProfileWrite,
}

impl TokenAction {
    /// Wire representation, `scope:verb`
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenAction::BlueprintsRead => "blueprints:read",
            TokenAction::BlueprintsWrite => "blueprints:write",
            TokenAction::ProfileRead => "profile:read",
            TokenAction::ProfileWrite => "profile:write",
        }
    }
}

impl std::fmt::Display for TokenAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The role policy table. Anything not listed here is denied.
pub fn has_permission(role: TokenRole, action: TokenAction) -> bool {
    matches!(
        (role, action),
        (TokenRole::Full, _)
            | (
                TokenRole::BlueprintsFull,
                TokenAction::BlueprintsRead | TokenAction::BlueprintsWrite
            )
            | (TokenRole::BlueprintsReadonly, TokenAction::BlueprintsRead)
            | (
                TokenRole::ProfileFull,
                TokenAction::ProfileRead | TokenAction::ProfileWrite
            )
    )
}

/// Token metadata safe to show to the owner. Never carries the secret.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiTokenInfo {
    /// Token id
    pub id: Uuid,
    /// User-supplied label
    pub name: String,
    /// Scoped role
    pub role: TokenRole,
    /// Last 4 hex chars of the secret, for display
    pub last_four_chars: String,
    /// Expiry
    pub expires_at: DateTime<Utc>,
    /// Last successful use, if any
    pub last_used_at: Option<DateTime<Utc>>,
    /// Revocation time, if revoked
    pub revoked_at: Option<DateTime<Utc>>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// Result of probing a bearer header for expiry
///
/// Revoked tokens report `is_expired: false`; revocation is a distinct
/// terminal state and clients explain it differently.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenExpirationStatus {
    /// Whether the presented token exists but has expired
    pub is_expired: bool,
    /// When it expired, present only when `is_expired`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired_at: Option<DateTime<Utc>>,
}

impl TokenExpirationStatus {
    /// A token that is absent, malformed, unknown, revoked, or live
    pub fn not_expired() -> Self {
        Self {
            is_expired: false,
            expired_at: None,
        }
    }

    /// A known token past its expiry
    pub fn expired(at: DateTime<Utc>) -> Self {
        Self {
            is_expired: true,
            expired_at: Some(at),
        }
    }
}
