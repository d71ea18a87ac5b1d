//! Builder configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `VITRINE_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   the generic `DATABASE_URL` set by managed postgres attachments)
//!
//! ## Optional
//! - `VITRINE_HOST` - Bind address (default: 127.0.0.1)
//! - `VITRINE_PORT` - Listen port (default: 3000)
//! - `VITRINE_SETTINGS_CACHE_TTL_MS` - Read-cache TTL in milliseconds
//!   (default: 5000; 0 disables caching)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Builder application configuration.
#[derive(Debug, Clone)]
pub struct BuilderConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// TTL for the effective-settings read cache
    pub settings_cache_ttl: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl BuilderConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("VITRINE_DATABASE_URL")?;
        let host = get_env_or_default("VITRINE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("VITRINE_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("VITRINE_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("VITRINE_PORT".to_string(), e.to_string()))?;
        let settings_cache_ttl =
            parse_ttl_ms("VITRINE_SETTINGS_CACHE_TTL_MS", &get_env_or_default(
                "VITRINE_SETTINGS_CACHE_TTL_MS",
                "5000",
            ))?;

        Ok(Self {
            database_url,
            host,
            port,
            settings_cache_ttl,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a millisecond TTL value.
fn parse_ttl_ms(var_name: &str, value: &str) -> Result<Duration, ConfigError> {
    value
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ttl_ms() {
        assert_eq!(
            parse_ttl_ms("X", "5000").unwrap(),
            Duration::from_millis(5000)
        );
        assert_eq!(parse_ttl_ms("X", "0").unwrap(), Duration::ZERO);
        assert!(parse_ttl_ms("X", "soon").is_err());
        assert!(parse_ttl_ms("X", "-1").is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = BuilderConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            settings_cache_ttl: Duration::from_millis(5000),
            sentry_dsn: None,
            sentry_environment: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }
}
