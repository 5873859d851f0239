use crate::core::models::api_token::TokenRole;
use crate::utils::error::{ApiError, Result};
use sea_orm::sea_query::Expr;
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, api_token};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Insert a new API token record
    ///
    /// `token_hash` must be the SHA-256 digest of the full prefixed token.
    /// The raw token never reaches this layer.
    pub async fn insert_api_token(
        &self,
        user_id: uuid::Uuid,
        name: &str,
        role: TokenRole,
        token_hash: &str,
        last_four_chars: &str,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<api_token::Model> {
        debug!("Inserting API token for user: {}", user_id);

        let active_model = api_token::ActiveModel {
            id: Set(uuid::Uuid::new_v4()),
            user_id: Set(user_id),
            name: Set(name.to_string()),
            token_hash: Set(token_hash.to_string()),
            last_four_chars: Set(last_four_chars.to_string()),
            role: Set(role.as_str().to_string()),
            expires_at: Set(expires_at.into()),
            last_used_at: Set(None),
            revoked_at: Set(None),
            created_at: Set(chrono::Utc::now().into()),
        };

        active_model.insert(&self.db).await.map_err(ApiError::Database)
    }

    /// Find an API token by its hash
    pub async fn find_api_token_by_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<api_token::Model>> {
        debug!("Finding API token by hash");

        entities::ApiToken::find()
            .filter(api_token::Column::TokenHash.eq(token_hash))
            .one(&self.db)
            .await
            .map_err(ApiError::Database)
    }

    /// Find an API token by ID
    pub async fn find_api_token_by_id(
        &self,
        token_id: uuid::Uuid,
    ) -> Result<Option<api_token::Model>> {
        debug!("Finding API token by ID: {}", token_id);

        entities::ApiToken::find_by_id(token_id)
            .one(&self.db)
            .await
            .map_err(ApiError::Database)
    }

    /// List all tokens belonging to a user, newest first
    pub async fn list_api_tokens_for_user(
        &self,
        user_id: uuid::Uuid,
    ) -> Result<Vec<api_token::Model>> {
        debug!("Listing API tokens for user: {}", user_id);

        entities::ApiToken::find()
            .filter(api_token::Column::UserId.eq(user_id))
            .order_by_desc(api_token::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(ApiError::Database)
    }

    /// Count non-revoked tokens for a user
    ///
    /// Expired tokens still count toward the quota until revoked.
    pub async fn count_active_api_tokens(&self, user_id: uuid::Uuid) -> Result<u64> {
        debug!("Counting active API tokens for user: {}", user_id);

        entities::ApiToken::find()
            .filter(api_token::Column::UserId.eq(user_id))
            .filter(api_token::Column::RevokedAt.is_null())
            .count(&self.db)
            .await
            .map_err(ApiError::Database)
    }

    /// Revoke a token by stamping `revoked_at`
    ///
    /// Conditional on the token not already being revoked. Returns whether
    /// a row was updated, so concurrent revocations resolve to one winner.
    pub async fn revoke_api_token(&self, token_id: uuid::Uuid) -> Result<bool> {
        debug!("Revoking API token: {}", token_id);

        let result = entities::ApiToken::update_many()
            .col_expr(
                api_token::Column::RevokedAt,
                Expr::value(Some(chrono::Utc::now())),
            )
            .filter(api_token::Column::Id.eq(token_id))
            .filter(api_token::Column::RevokedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(result.rows_affected == 1)
    }

    /// Stamp `last_used_at` on a token
    pub async fn touch_api_token_last_used(&self, token_id: uuid::Uuid) -> Result<()> {
        debug!("Touching last_used_at for API token: {}", token_id);

        entities::ApiToken::update_many()
            .col_expr(
                api_token::Column::LastUsedAt,
                Expr::value(Some(chrono::Utc::now())),
            )
            .filter(api_token::Column::Id.eq(token_id))
            .exec(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(())
    }
}
