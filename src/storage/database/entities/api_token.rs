use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::models::api_token::{ApiTokenInfo, TokenRole};

/// API token database model
///
/// Only the SHA-256 hash of the token is stored. The raw token value is
/// returned to the caller exactly once at creation and never persisted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "api_tokens")]
pub struct Model {
    /// Token ID (UUID)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owning user ID
    pub user_id: Uuid,

    /// Human-readable label chosen by the user
    pub name: String,

    /// SHA-256 hex digest of the full prefixed token
    #[sea_orm(unique)]
    pub token_hash: String,

    /// Last four characters of the raw token, for display
    pub last_four_chars: String,

    /// Permission role
    pub role: String,

    /// Expiration timestamp
    pub expires_at: DateTimeWithTimeZone,

    /// Last successful use timestamp
    pub last_used_at: Option<DateTimeWithTimeZone>,

    /// Revocation timestamp (soft delete)
    pub revoked_at: Option<DateTimeWithTimeZone>,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,
}

/// API token entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Belongs to user relation
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Parsed permission role, defaulting to the most restrictive role
    /// for unknown stored values
    pub fn role(&self) -> TokenRole {
        TokenRole::from_str(&self.role).unwrap_or(TokenRole::BlueprintsReadonly)
    }

    /// Whether the token has been revoked
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Whether the token is past its expiration at the given instant
    pub fn is_expired(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.expires_at.with_timezone(&chrono::Utc) <= now
    }

    /// Whether the token can authenticate requests right now
    pub fn is_usable(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        !self.is_revoked() && !self.is_expired(now)
    }

    /// Convert to the domain token metadata (never includes the hash)
    pub fn to_info(&self) -> ApiTokenInfo {
        ApiTokenInfo {
            id: self.id,
            name: self.name.clone(),
            role: self.role(),
            last_four_chars: self.last_four_chars.clone(),
            expires_at: self.expires_at.with_timezone(&chrono::Utc),
            last_used_at: self.last_used_at.map(|t| t.with_timezone(&chrono::Utc)),
            revoked_at: self.revoked_at.map(|t| t.with_timezone(&chrono::Utc)),
            created_at: self.created_at.with_timezone(&chrono::Utc),
        }
    }
}
