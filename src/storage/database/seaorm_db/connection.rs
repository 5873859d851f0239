use crate::config::DatabaseConfig;
use crate::utils::error::{ApiError, Result};
use sea_orm::*;
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::super::entities;
use super::super::migration::Migrator;
use super::types::{DatabaseBackendType, SeaOrmDatabase};

/// Connection string used when the configured backend is unreachable
const SQLITE_FALLBACK_URL: &str = "sqlite://data/lynxprompt.db?mode=rwc";

impl SeaOrmDatabase {
    /// Connect to the configured database
    ///
    /// A failed PostgreSQL connection falls back to a local SQLite file so a
    /// development checkout runs without any infrastructure.
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let opened = Self::open(
            &config.url,
            config.max_connections,
            config.connection_timeout,
            config.sqlx_logging,
        )
        .await;

        match opened {
            Ok(db) => {
                let backend_type = Self::backend_for(&config.url);
                info!("Database connection established ({:?})", backend_type);
                Ok(Self { db, backend_type })
            }
            Err(e) if config.url.starts_with("postgres") => {
                warn!("PostgreSQL connection failed: {}. Falling back to SQLite", e);
                Self::fallback_to_sqlite(config).await
            }
            Err(e) => Err(e),
        }
    }

    fn backend_for(url: &str) -> DatabaseBackendType {
        if url.starts_with("sqlite") {
            DatabaseBackendType::SQLite
        } else {
            DatabaseBackendType::PostgreSQL
        }
    }

    async fn open(
        url: &str,
        max_connections: u32,
        connect_timeout_secs: u64,
        sqlx_logging: bool,
    ) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url.to_string());
        opt.max_connections(max_connections)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(3600))
            .sqlx_logging(sqlx_logging)
            .sqlx_logging_level(log::LevelFilter::Debug);

        Database::connect(opt).await.map_err(ApiError::Database)
    }

    async fn fallback_to_sqlite(config: &DatabaseConfig) -> Result<Self> {
        let data_dir = std::path::Path::new("data");
        if !data_dir.exists() {
            std::fs::create_dir_all(data_dir).map_err(|e| {
                ApiError::internal(format!("Failed to create data directory: {}", e))
            })?;
        }

        info!("Opening SQLite fallback at {}", SQLITE_FALLBACK_URL);
        let db = Self::open(SQLITE_FALLBACK_URL, 5, 5, config.sqlx_logging).await?;

        Ok(Self {
            db,
            backend_type: DatabaseBackendType::SQLite,
        })
    }

    /// Backend the connection actually landed on
    pub fn backend_type(&self) -> DatabaseBackendType {
        self.backend_type
    }

    /// Apply any pending migrations
    pub async fn migrate(&self) -> Result<()> {
        info!("Applying database migrations");
        Migrator::up(&self.db, None).await.map_err(|e| {
            warn!("Migration failed: {}", e);
            ApiError::Database(e)
        })?;
        info!("Database schema is up to date");
        Ok(())
    }

    /// Borrow the underlying connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Verify connectivity with a minimal query
    pub async fn health_check(&self) -> Result<()> {
        entities::User::find()
            .limit(1)
            .all(&self.db)
            .await
            .map_err(ApiError::Database)?;

        debug!("Database health check passed");
        Ok(())
    }
}
