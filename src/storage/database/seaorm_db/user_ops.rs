use crate::core::models::user::Plan;
use crate::utils::error::{ApiError, Result};
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, user};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Find user by ID
    pub async fn find_user_by_id(&self, user_id: uuid::Uuid) -> Result<Option<user::Model>> {
        debug!("Finding user by ID: {}", user_id);

        entities::User::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(ApiError::Database)
    }

    /// Find user by email
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<user::Model>> {
        debug!("Finding user by email");

        entities::User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(ApiError::Database)
    }

    /// Create a new user
    pub async fn create_user(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
        plan: Plan,
    ) -> Result<user::Model> {
        debug!("Creating user");

        let now = chrono::Utc::now();
        let active_model = user::ActiveModel {
            id: Set(uuid::Uuid::new_v4()),
            email: Set(email.to_string()),
            name: Set(name.to_string()),
            password_hash: Set(password_hash.to_string()),
            plan: Set(plan.as_str().to_string()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        active_model.insert(&self.db).await.map_err(ApiError::Database)
    }
}
