use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::config::LodgeConfig;

pub mod migrator;

/// Opens the configured database, creating the sqlite file when needed.
pub async fn open_or_create_db(config: &LodgeConfig) -> Result<DatabaseConnection, DbErr> {
    let connection_string = config.connection_string();

    let mut options = ConnectOptions::new(connection_string);
    options.connect_timeout(Duration::from_secs(5));

    let db = Database::connect(options).await?;
    info!(backend = ?db.get_database_backend(), "database connected");
    Ok(db)
}

pub async fn migrate_up(db: &DatabaseConnection) -> Result<(), DbErr> {
    migrator::Migrator::up(db, None).await?;
    info!("migrations applied");
    Ok(())
}
