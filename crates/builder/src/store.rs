//! Storage seam for settings rows.
//!
//! The service talks to a [`SettingsStore`] trait object so the same
//! orchestration runs against `PostgreSQL` in production and an in-memory
//! map in tests. The Postgres implementation wraps every call in the
//! transient-fault retry policy.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use vitrine_core::{SettingsRow, TenantId};

use crate::db;
use crate::retry::RetryPolicy;

/// Error type for settings storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Read/write access to settings rows.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Fetch a tenant's row, if one exists.
    async fn get(&self, tenant_id: TenantId) -> Result<Option<SettingsRow>, StorageError>;

    /// Insert or fully replace a tenant's row, atomically.
    async fn upsert(&self, row: &SettingsRow) -> Result<(), StorageError>;
}

/// `PostgreSQL`-backed store with transient-fault retries.
#[derive(Debug, Clone)]
pub struct PgSettingsStore {
    pool: PgPool,
    retry: RetryPolicy,
}

impl PgSettingsStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            retry: RetryPolicy::default(),
        }
    }
}

#[async_trait]
impl SettingsStore for PgSettingsStore {
    async fn get(&self, tenant_id: TenantId) -> Result<Option<SettingsRow>, StorageError> {
        let row = self
            .retry
            .run(|| db::settings::fetch_settings_row(&self.pool, tenant_id))
            .await?;
        Ok(row)
    }

    async fn upsert(&self, row: &SettingsRow) -> Result<(), StorageError> {
        self.retry
            .run(|| db::settings::upsert_settings_row(&self.pool, row))
            .await?;
        Ok(())
    }
}

/// In-memory store for tests and local experiments.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    rows: Mutex<HashMap<i32, SettingsRow>>,
}

impl MemorySettingsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently stored.
    ///
    /// # Panics
    ///
    /// Panics if the inner lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        #[allow(clippy::unwrap_used)]
        self.rows.lock().unwrap().len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get(&self, tenant_id: TenantId) -> Result<Option<SettingsRow>, StorageError> {
        #[allow(clippy::unwrap_used)]
        let rows = self.rows.lock().unwrap();
        Ok(rows.get(&tenant_id.as_i32()).cloned())
    }

    async fn upsert(&self, row: &SettingsRow) -> Result<(), StorageError> {
        #[allow(clippy::unwrap_used)]
        let mut rows = self.rows.lock().unwrap();
        rows.insert(row.tenant_id.as_i32(), row.clone());
        Ok(())
    }
}
