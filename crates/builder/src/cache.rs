//! Short-TTL read cache for effective settings.
//!
//! An explicit cache object injected into the service - never ambient
//! module state - so tests get per-instance isolation. The TTL bounds how
//! long a read may lag a write from *another* process; writes through this
//! process invalidate synchronously, so a caller never observes its own
//! stale value post-commit.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use serde_json::{Map, Value as JsonValue};

use vitrine_core::TenantId;

/// Cached effective-settings objects, keyed by tenant.
#[derive(Debug, Clone)]
pub struct SettingsCache {
    inner: Option<Cache<TenantId, Arc<Map<String, JsonValue>>>>,
}

impl SettingsCache {
    const MAX_CAPACITY: u64 = 10_000;

    /// Create a cache with the given TTL. A zero TTL disables caching
    /// entirely (every read goes to storage).
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        let inner = (!ttl.is_zero()).then(|| {
            Cache::builder()
                .time_to_live(ttl)
                .max_capacity(Self::MAX_CAPACITY)
                .build()
        });
        Self { inner }
    }

    /// Look up a tenant's cached effective settings.
    #[must_use]
    pub fn get(&self, tenant_id: TenantId) -> Option<Arc<Map<String, JsonValue>>> {
        self.inner.as_ref()?.get(&tenant_id)
    }

    /// Store a tenant's effective settings.
    pub fn insert(&self, tenant_id: TenantId, settings: Arc<Map<String, JsonValue>>) {
        if let Some(cache) = &self.inner {
            cache.insert(tenant_id, settings);
        }
    }

    /// Drop a tenant's entry. Called synchronously on every successful
    /// write before the response is returned.
    pub fn invalidate(&self, tenant_id: TenantId) {
        if let Some(cache) = &self.inner {
            cache.invalidate(&tenant_id);
        }
    }
}
