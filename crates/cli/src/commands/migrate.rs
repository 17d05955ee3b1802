//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! arif-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `ARIF_DATABASE_URL` - `PostgreSQL` connection string
//!   (falls back to `DATABASE_URL`)

use arif_motor_web::config::{AppConfig, ConfigError};
use arif_motor_web::db;

/// Errors that can occur while migrating.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run the bundled migrations against the configured database.
///
/// # Errors
///
/// Returns `MigrationError` if configuration is missing or the database
/// cannot be reached.
pub async fn run() -> Result<(), MigrationError> {
    let config = AppConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../web/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
