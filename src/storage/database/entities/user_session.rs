use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Browser session database model
///
/// The primary key is the opaque session token stored in the cookie.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "user_sessions")]
pub struct Model {
    /// Session token (opaque random value, also the cookie value)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// User ID this session belongs to
    pub user_id: Uuid,

    /// Session expiration timestamp
    pub expires_at: DateTimeWithTimeZone,

    /// Session creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last access timestamp
    pub last_accessed_at: DateTimeWithTimeZone,
}

/// User session entity relations
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
    /// Whether the session is past its expiration at the given instant
    pub fn is_expired(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.expires_at.with_timezone(&chrono::Utc) <= now
    }
}
