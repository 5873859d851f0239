//! Persistence for users, sessions, tokens and blueprints

pub mod database;

use crate::config::StorageConfig;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::info;

/// Owns the database connection; services share it behind an Arc
#[derive(Debug, Clone)]
pub struct StorageLayer {
    pub database: Arc<database::Database>,
}

impl StorageLayer {
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        info!("Initializing storage layer");
        let database = Arc::new(database::Database::new(&config.database).await?);
        Ok(Self { database })
    }

    pub fn db(&self) -> &database::Database {
        &self.database
    }

    /// Apply pending migrations
    pub async fn migrate(&self) -> Result<()> {
        self.database.migrate().await
    }

    pub async fn health_check(&self) -> Result<()> {
        self.database.health_check().await
    }
}
