use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::models::blueprint::{BlueprintDetail, BlueprintSummary, BlueprintVisibility};

/// Blueprint database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "blueprints")]
pub struct Model {
    /// Blueprint ID (UUID)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owning user ID
    pub user_id: Uuid,

    /// Display name
    pub name: String,

    /// URL-safe slug derived from the name
    pub slug: String,

    /// Optional description
    pub description: Option<String>,

    /// Configuration file body
    #[sea_orm(column_type = "Text")]
    pub content: String,

    /// Visibility setting
    pub visibility: String,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

/// Blueprint entity relations
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
    /// Parsed visibility, defaulting to PRIVATE for unknown values
    pub fn visibility(&self) -> BlueprintVisibility {
        BlueprintVisibility::from_str(&self.visibility).unwrap_or_default()
    }

    /// Convert to the domain summary (metadata only)
    pub fn to_summary(&self) -> BlueprintSummary {
        BlueprintSummary {
            id: self.id,
            user_id: self.user_id,
            name: self.name.clone(),
            slug: self.slug.clone(),
            description: self.description.clone(),
            visibility: self.visibility(),
            created_at: self.created_at.with_timezone(&chrono::Utc),
            updated_at: self.updated_at.with_timezone(&chrono::Utc),
        }
    }

    /// Convert to the domain detail including the config body
    pub fn to_detail(&self) -> BlueprintDetail {
        BlueprintDetail {
            summary: self.to_summary(),
            content: self.content.clone(),
        }
    }
}
