//! Database operations for the builder's `PostgreSQL`.
//!
//! # Database: `vitrine_builder`
//!
//! ## Tables
//!
//! - `store_settings` - One row per tenant: scalar columns plus the JSON
//!   blobs (global settings, active-template extras, per-template snapshot
//!   map, per-template layout documents)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/builder/migrations/` and run via:
//! ```bash
//! cargo run -p vitrine-cli -- migrate
//! ```
//!
//! # Concurrency
//!
//! Concurrent updates to the same tenant are serialized by the database at
//! row granularity; the last writer wins. There is deliberately no
//! optimistic-lock column.

pub mod settings;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
