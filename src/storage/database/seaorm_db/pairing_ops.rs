use crate::core::models::cli_session::PairingStatus;
use crate::utils::error::{ApiError, Result};
use sea_orm::sea_query::Expr;
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, cli_session};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Insert a new pending CLI pairing session
    pub async fn insert_cli_session(
        &self,
        session_id: &str,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<cli_session::Model> {
        debug!("Inserting CLI pairing session");

        let active_model = cli_session::ActiveModel {
            id: Set(uuid::Uuid::new_v4()),
            session_id: Set(session_id.to_string()),
            user_id: Set(None),
            api_token_id: Set(None),
            token: Set(None),
            status: Set(PairingStatus::Pending.as_str().to_string()),
            expires_at: Set(expires_at.into()),
            created_at: Set(chrono::Utc::now().into()),
        };

        active_model.insert(&self.db).await.map_err(ApiError::Database)
    }

    /// Find a pairing session by its opaque session identifier
    pub async fn find_cli_session(&self, session_id: &str) -> Result<Option<cli_session::Model>> {
        debug!("Finding CLI pairing session");

        entities::CliSession::find()
            .filter(cli_session::Column::SessionId.eq(session_id))
            .one(&self.db)
            .await
            .map_err(ApiError::Database)
    }

    /// Transition a pairing session from PENDING to COMPLETED
    ///
    /// The update is conditional on the current status, so exactly one of
    /// any concurrent callback requests wins. Returns whether this call
    /// performed the transition.
    pub async fn complete_cli_session(
        &self,
        session_id: &str,
        user_id: uuid::Uuid,
        api_token_id: uuid::Uuid,
        raw_token: &str,
    ) -> Result<bool> {
        debug!("Completing CLI pairing session");

        let result = entities::CliSession::update_many()
            .col_expr(
                cli_session::Column::Status,
                Expr::value(PairingStatus::Completed.as_str()),
            )
            .col_expr(cli_session::Column::UserId, Expr::value(Some(user_id)))
            .col_expr(
                cli_session::Column::ApiTokenId,
                Expr::value(Some(api_token_id)),
            )
            .col_expr(
                cli_session::Column::Token,
                Expr::value(Some(raw_token.to_string())),
            )
            .filter(cli_session::Column::SessionId.eq(session_id))
            .filter(cli_session::Column::Status.eq(PairingStatus::Pending.as_str()))
            .exec(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(result.rows_affected == 1)
    }

    /// Clear the one-time token after it has been delivered to the CLI
    pub async fn clear_cli_session_token(&self, session_id: &str) -> Result<()> {
        debug!("Clearing delivered token from CLI pairing session");

        entities::CliSession::update_many()
            .col_expr(cli_session::Column::Token, Expr::value(None::<String>))
            .filter(cli_session::Column::SessionId.eq(session_id))
            .exec(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(())
    }

    /// Delete a pairing session row
    pub async fn delete_cli_session(&self, session_id: &str) -> Result<()> {
        debug!("Deleting CLI pairing session");

        entities::CliSession::delete_many()
            .filter(cli_session::Column::SessionId.eq(session_id))
            .exec(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(())
    }

    /// Delete all pairing sessions past their expiration
    pub async fn delete_expired_cli_sessions(&self) -> Result<u64> {
        debug!("Cleaning up expired CLI pairing sessions");

        let result = entities::CliSession::delete_many()
            .filter(cli_session::Column::ExpiresAt.lt(chrono::Utc::now()))
            .exec(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(result.rows_affected)
    }
}
