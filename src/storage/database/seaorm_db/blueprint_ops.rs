use crate::core::models::blueprint::BlueprintVisibility;
use crate::utils::error::{ApiError, Result};
use sea_orm::sea_query::Condition;
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, blueprint};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Insert a new blueprint
    pub async fn insert_blueprint(
        &self,
        user_id: uuid::Uuid,
        name: &str,
        slug: &str,
        description: Option<&str>,
        content: &str,
        visibility: BlueprintVisibility,
    ) -> Result<blueprint::Model> {
        debug!("Inserting blueprint for user: {}", user_id);

        let now = chrono::Utc::now();
        let active_model = blueprint::ActiveModel {
            id: Set(uuid::Uuid::new_v4()),
            user_id: Set(user_id),
            name: Set(name.to_string()),
            slug: Set(slug.to_string()),
            description: Set(description.map(|d| d.to_string())),
            content: Set(content.to_string()),
            visibility: Set(visibility.as_str().to_string()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        active_model.insert(&self.db).await.map_err(ApiError::Database)
    }

    /// Find a blueprint by ID
    pub async fn find_blueprint_by_id(
        &self,
        blueprint_id: uuid::Uuid,
    ) -> Result<Option<blueprint::Model>> {
        debug!("Finding blueprint by ID: {}", blueprint_id);

        entities::Blueprint::find_by_id(blueprint_id)
            .one(&self.db)
            .await
            .map_err(ApiError::Database)
    }

    /// Find a blueprint by owner and slug
    pub async fn find_blueprint_by_slug(
        &self,
        user_id: uuid::Uuid,
        slug: &str,
    ) -> Result<Option<blueprint::Model>> {
        debug!("Finding blueprint by slug for user: {}", user_id);

        entities::Blueprint::find()
            .filter(blueprint::Column::UserId.eq(user_id))
            .filter(blueprint::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(ApiError::Database)
    }

    /// List blueprints visible to a user: their own plus all public ones
    pub async fn list_blueprints_visible_to(
        &self,
        user_id: uuid::Uuid,
    ) -> Result<Vec<blueprint::Model>> {
        debug!("Listing blueprints visible to user: {}", user_id);

        entities::Blueprint::find()
            .filter(
                Condition::any()
                    .add(blueprint::Column::UserId.eq(user_id))
                    .add(blueprint::Column::Visibility.eq(BlueprintVisibility::Public.as_str())),
            )
            .order_by_desc(blueprint::Column::UpdatedAt)
            .all(&self.db)
            .await
            .map_err(ApiError::Database)
    }

    /// Count blueprints owned by a user
    pub async fn count_blueprints_for_user(&self, user_id: uuid::Uuid) -> Result<u64> {
        debug!("Counting blueprints for user: {}", user_id);

        entities::Blueprint::find()
            .filter(blueprint::Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(ApiError::Database)
    }
}
