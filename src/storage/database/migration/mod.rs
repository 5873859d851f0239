use sea_orm_migration::prelude::*;

mod m20250101_000001_create_users_table;
mod m20250101_000002_create_api_tokens_table;
mod m20250101_000003_create_cli_sessions_table;
mod m20250101_000004_create_user_sessions_table;
mod m20250101_000005_create_blueprints_table;

/// Database migrator for SeaORM
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_users_table::Migration),
            Box::new(m20250101_000002_create_api_tokens_table::Migration),
            Box::new(m20250101_000003_create_cli_sessions_table::Migration),
            Box::new(m20250101_000004_create_user_sessions_table::Migration),
            Box::new(m20250101_000005_create_blueprints_table::Migration),
        ]
    }
}
