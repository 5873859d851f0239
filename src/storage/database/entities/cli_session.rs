use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::models::cli_session::PairingStatus;

/// CLI pairing session database model
///
/// Rows are short-lived. The `token` column holds the raw API token only
/// between browser completion and the first successful poll, after which
/// it is cleared and the row is deleted once the grace window elapses.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "cli_sessions")]
pub struct Model {
    /// Row ID (UUID)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Opaque pairing session identifier handed to the CLI
    #[sea_orm(unique)]
    pub session_id: String,

    /// User who completed the pairing, if any
    pub user_id: Option<Uuid>,

    /// API token minted on completion, if any
    pub api_token_id: Option<Uuid>,

    /// Raw token held for one-time delivery to the CLI
    pub token: Option<String>,

    /// Pairing status
    pub status: String,

    /// Session expiration timestamp
    pub expires_at: DateTimeWithTimeZone,

    /// Session creation timestamp
    pub created_at: DateTimeWithTimeZone,
}

/// CLI session entity relations
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
    /// Parsed pairing status, defaulting to PENDING for unknown values
    pub fn status(&self) -> PairingStatus {
        PairingStatus::from_str(&self.status).unwrap_or(PairingStatus::Pending)
    }

    /// Whether the pairing window has closed at the given instant
    pub fn is_expired(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.expires_at.with_timezone(&chrono::Utc) <= now
    }
}
