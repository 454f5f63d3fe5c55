use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

use crate::config::DatabaseConfig;

pub async fn init_db(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.url.to_owned());

    // Set connection pool options
    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(config.sqlx_logging);

    let db = Database::connect(opt).await?;
    db.get_schema_registry("blog_server::entity::*")
        .sync(&db)
        .await?;

    tracing::info!(backend = ?db.get_database_backend(), "Database schema synced");

    Ok(db)
}
