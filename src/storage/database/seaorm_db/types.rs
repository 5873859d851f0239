use sea_orm::DatabaseConnection;

/// Database handle plus the backend it actually connected to
#[derive(Debug)]
pub struct SeaOrmDatabase {
    pub(super) db: DatabaseConnection,
    pub(super) backend_type: DatabaseBackendType,
}

/// Which backend a connection landed on, fallback included
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackendType {
    PostgreSQL,
    SQLite,
}
