//! SeaORM-backed persistence
//!
//! Entities, migrations, and the typed per-aggregate operation modules.

pub mod entities;
pub mod migration;
pub mod seaorm_db;

pub use seaorm_db::DatabaseBackendType;
pub use seaorm_db::SeaOrmDatabase as Database;
