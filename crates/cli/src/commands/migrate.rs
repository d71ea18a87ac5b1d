//! Database migration command.
//!
//! Migrations are never run automatically on server startup; this command
//! is the one place they are applied.

use tracing::info;

use vitrine_builder::db;

use super::CliError;

/// Run the builder database migrations.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or a migration fails to apply.
pub async fn run() -> Result<(), CliError> {
    let database_url = super::database_url()?;

    info!("Connecting to builder database...");
    let pool = db::create_pool(&database_url).await?;

    info!("Running builder migrations...");
    sqlx::migrate!("../builder/migrations").run(&pool).await?;

    info!("Builder migrations complete!");
    Ok(())
}
