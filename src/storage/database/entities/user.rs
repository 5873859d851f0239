use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::models::user::{Plan, UserSummary};

/// User database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// User ID (UUID)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Email address (unique)
    #[sea_orm(unique)]
    pub email: String,

    /// Display name
    pub name: String,

    /// Password hash (Argon2)
    pub password_hash: String,

    /// Subscription plan
    pub plan: String,

    /// Account creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

/// User entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Has many API tokens relation
    #[sea_orm(has_many = "super::api_token::Entity")]
    ApiToken,
    /// Has many browser sessions relation
    #[sea_orm(has_many = "super::user_session::Entity")]
    UserSession,
    /// Has many CLI pairing sessions relation
    #[sea_orm(has_many = "super::cli_session::Entity")]
    CliSession,
    /// Has many blueprints relation
    #[sea_orm(has_many = "super::blueprint::Entity")]
    Blueprint,
}

impl Related<super::api_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ApiToken.def()
    }
}

impl Related<super::user_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserSession.def()
    }
}

impl Related<super::cli_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CliSession.def()
    }
}

impl Related<super::blueprint::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Blueprint.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Parsed subscription plan, defaulting to FREE for unknown values
    pub fn plan(&self) -> Plan {
        Plan::from_str(&self.plan).unwrap_or_default()
    }

    /// Convert to the domain user summary
    pub fn to_summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            plan: self.plan(),
        }
    }
}
