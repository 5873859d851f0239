//! Test database utilities
//!
//! Provides in-memory SQLite storage for testing without external
//! dependencies. Each test gets an isolated database instance using SeaORM.

use lynxprompt_rs::auth::AuthSystem;
use lynxprompt_rs::config::{AuthConfig, DatabaseConfig, PairingConfig, StorageConfig};
use lynxprompt_rs::storage::StorageLayer;
use std::sync::Arc;

/// Test storage wrapper providing isolated in-memory SQLite instances
#[derive(Debug, Clone)]
pub struct TestDatabase {
    inner: Arc<StorageLayer>,
}

impl TestDatabase {
    /// Create a new in-memory test database using SeaORM
    ///
    /// Note: SQLite in-memory mode keeps all state on a single connection,
    /// so each call creates a completely isolated database instance.
    pub async fn new() -> Self {
        let storage = StorageLayer::new(&test_storage_config())
            .await
            .expect("Failed to create in-memory test storage");

        // Run migrations
        storage
            .migrate()
            .await
            .expect("Failed to run database migrations");

        Self {
            inner: Arc::new(storage),
        }
    }

    /// Get reference to the underlying storage layer
    pub fn storage(&self) -> &StorageLayer {
        &self.inner
    }

    /// Get Arc to the underlying storage layer
    pub fn storage_arc(&self) -> Arc<StorageLayer> {
        Arc::clone(&self.inner)
    }
}

/// Full authentication stack over an in-memory database
///
/// Bundles the storage layer with a wired [`AuthSystem`] so service-level
/// tests do not repeat the setup dance.
pub struct TestAuth {
    /// Backing storage, shared with the auth system
    pub storage: Arc<StorageLayer>,
    /// Token, pairing, session, and facade services
    pub auth: AuthSystem,
}

impl TestAuth {
    /// Create an auth stack with default configuration
    pub async fn new() -> Self {
        Self::with_configs(AuthConfig::default(), PairingConfig::default()).await
    }

    /// Create an auth stack with custom auth and pairing configuration
    pub async fn with_configs(auth_config: AuthConfig, pairing_config: PairingConfig) -> Self {
        let storage = TestDatabase::new().await.storage_arc();
        let auth = AuthSystem::new(&auth_config, &pairing_config, Arc::clone(&storage))
            .await
            .expect("Failed to build auth system");

        Self { storage, auth }
    }
}

/// Helper to create a simple test storage config
pub fn test_storage_config() -> StorageConfig {
    StorageConfig {
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1, // In-memory DB only supports 1 connection
            connection_timeout: 5,
            sqlx_logging: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_database_creation() {
        let db = TestDatabase::new().await;
        // Storage should be created and migrations run
        assert!(db.storage().health_check().await.is_ok());
    }

    #[tokio::test]
    async fn test_auth_stack_creation() {
        let harness = TestAuth::new().await;
        assert!(harness.storage.health_check().await.is_ok());
        assert!(harness.auth.tokens.list_tokens(uuid::Uuid::new_v4()).await.is_ok());
    }
}
