use crate::utils::error::{ApiError, Result};
use sea_orm::sea_query::Expr;
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, user_session};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Insert a new browser session
    ///
    /// `session_token` is the opaque cookie value and serves as the row key.
    pub async fn insert_user_session(
        &self,
        session_token: &str,
        user_id: uuid::Uuid,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<user_session::Model> {
        debug!("Inserting browser session for user: {}", user_id);

        let now = chrono::Utc::now();
        let active_model = user_session::ActiveModel {
            id: Set(session_token.to_string()),
            user_id: Set(user_id),
            expires_at: Set(expires_at.into()),
            created_at: Set(now.into()),
            last_accessed_at: Set(now.into()),
        };

        active_model.insert(&self.db).await.map_err(ApiError::Database)
    }

    /// Find a browser session by its token
    pub async fn find_user_session(
        &self,
        session_token: &str,
    ) -> Result<Option<user_session::Model>> {
        debug!("Finding browser session");

        entities::UserSession::find_by_id(session_token.to_string())
            .one(&self.db)
            .await
            .map_err(ApiError::Database)
    }

    /// Stamp `last_accessed_at` on a browser session
    pub async fn touch_user_session(&self, session_token: &str) -> Result<()> {
        debug!("Touching last_accessed_at for browser session");

        entities::UserSession::update_many()
            .col_expr(
                user_session::Column::LastAccessedAt,
                Expr::value(chrono::Utc::now()),
            )
            .filter(user_session::Column::Id.eq(session_token))
            .exec(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(())
    }

    /// Delete a browser session (logout)
    pub async fn delete_user_session(&self, session_token: &str) -> Result<()> {
        debug!("Deleting browser session");

        entities::UserSession::delete_many()
            .filter(user_session::Column::Id.eq(session_token))
            .exec(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(())
    }

    /// Delete all browser sessions past their expiration
    pub async fn delete_expired_user_sessions(&self) -> Result<u64> {
        debug!("Cleaning up expired browser sessions");

        let result = entities::UserSession::delete_many()
            .filter(user_session::Column::ExpiresAt.lt(chrono::Utc::now()))
            .exec(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(result.rows_affected)
    }
}
