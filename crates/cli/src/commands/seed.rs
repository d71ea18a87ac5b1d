//! Seed command: provision a tenant row for local development.
//!
//! Goes through the same service path the builder uses, so a seeded row
//! looks exactly like one provisioned by the first editor read.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use vitrine_builder::cache::SettingsCache;
use vitrine_builder::db;
use vitrine_builder::services::SettingsService;
use vitrine_builder::store::{PgSettingsStore, SettingsStore};
use vitrine_core::TenantId;

use super::CliError;

/// Provision a settings row for `tenant_id` and set its store name.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or the settings update is rejected.
pub async fn run(tenant_id: i32, store_name: &str) -> Result<(), CliError> {
    let database_url = super::database_url()?;
    let pool = db::create_pool(&database_url).await?;

    let store: Arc<dyn SettingsStore> = Arc::new(PgSettingsStore::new(pool));
    let service = SettingsService::new(store, SettingsCache::new(Duration::ZERO));

    let tenant_id = TenantId::new(tenant_id);

    // First read provisions the row if it does not exist yet.
    service.get_effective_settings(tenant_id).await?;

    let mut payload = serde_json::Map::new();
    payload.insert(
        "store_name".to_string(),
        serde_json::Value::String(store_name.to_string()),
    );
    let settings = service.apply_settings_update(tenant_id, payload).await?;

    let slug = settings
        .get("slug")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .to_string();
    info!(tenant_id = tenant_id.as_i32(), slug, "Tenant seeded");

    Ok(())
}
