// Module declarations
mod types;
mod connection;
mod user_ops;
mod token_ops;
mod pairing_ops;
mod session_ops;
mod blueprint_ops;

// Re-export public types
pub use types::{DatabaseBackendType, SeaOrmDatabase};
