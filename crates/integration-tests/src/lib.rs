//! Integration tests for Vitrine.
//!
//! Most tests here drive the real `SettingsService` over the in-memory
//! store, exercising full editor flows (provision, update, switch, layout)
//! without a database. The `http_smoke` tests hit a running builder server
//! and are `#[ignore]`d by default.
//!
//! # Running Tests
//!
//! ```bash
//! # Service-level tests (no external dependencies)
//! cargo test -p vitrine-integration-tests
//!
//! # HTTP smoke tests against a running server
//! cargo run -p vitrine-cli -- migrate
//! cargo run -p vitrine-builder &
//! cargo test -p vitrine-integration-tests -- --ignored
//! ```

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value as JsonValue};

use vitrine_builder::cache::SettingsCache;
use vitrine_builder::services::SettingsService;
use vitrine_builder::store::{MemorySettingsStore, SettingsStore};

/// A settings service over an in-memory store, with the cache enabled at
/// the production default TTL.
#[must_use]
pub fn test_service() -> (SettingsService, Arc<MemorySettingsStore>) {
    let store = Arc::new(MemorySettingsStore::new());
    let service = SettingsService::new(
        Arc::clone(&store) as Arc<dyn SettingsStore>,
        SettingsCache::new(Duration::from_secs(60)),
    );
    (service, store)
}

/// Coerce a JSON literal into the update payload shape.
///
/// # Panics
///
/// Panics if `value` is not a JSON object.
#[must_use]
pub fn payload(value: JsonValue) -> Map<String, JsonValue> {
    value.as_object().cloned().expect("object payload")
}

/// Base URL for the builder API (configurable via environment).
#[must_use]
pub fn builder_base_url() -> String {
    std::env::var("BUILDER_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}
