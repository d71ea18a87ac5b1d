//! CLI subcommand implementations.

use secrecy::SecretString;
use thiserror::Error;

pub mod migrate;
pub mod seed;

/// Errors shared by the CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Settings error: {0}")]
    Settings(#[from] vitrine_builder::error::AppError),
}

/// Resolve the database URL from the environment.
///
/// Prefers `VITRINE_DATABASE_URL`, falling back to the generic
/// `DATABASE_URL` set by managed postgres attachments.
pub fn database_url() -> Result<SecretString, CliError> {
    dotenvy::dotenv().ok();

    std::env::var("VITRINE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CliError::MissingEnvVar("VITRINE_DATABASE_URL"))
}
