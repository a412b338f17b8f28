//! Database migration command.
//!
//! # Environment Variables
//!
//! - `OCULOG_DATABASE_URL` - `PostgreSQL` connection string for the
//!   usage-log store

use sqlx::PgPool;
use thiserror::Error;

/// Errors that can occur while running migrations.
#[derive(Debug, Error)]
pub enum MigrateError {
    #[error("missing environment variable: {0}")]
    MissingEnvVar(&'static str),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Run the usage-log store migrations.
///
/// # Errors
///
/// Returns an error if the connection string is missing, the database is
/// unreachable, or a migration fails.
pub async fn run() -> Result<(), MigrateError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("OCULOG_DATABASE_URL")
        .map_err(|_| MigrateError::MissingEnvVar("OCULOG_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}
