//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::cache::SettingsCache;
use crate::config::BuilderConfig;
use crate::services::SettingsService;
use crate::store::{PgSettingsStore, SettingsStore};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: BuilderConfig,
    pool: PgPool,
    settings: SettingsService,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: BuilderConfig, pool: PgPool) -> Self {
        let store: Arc<dyn SettingsStore> = Arc::new(PgSettingsStore::new(pool.clone()));
        let cache = SettingsCache::new(config.settings_cache_ttl);
        let settings = SettingsService::new(store, cache);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                settings,
            }),
        }
    }

    /// Get a reference to the builder configuration.
    #[must_use]
    pub fn config(&self) -> &BuilderConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the settings service.
    #[must_use]
    pub fn settings(&self) -> &SettingsService {
        &self.inner.settings
    }
}
