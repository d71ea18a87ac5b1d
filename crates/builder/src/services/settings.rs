//! Settings orchestration: reads, updates, switches, layouts.
//!
//! Every update is one logical all-or-nothing unit: read the row, compute
//! the merge/switch/migration purely in memory via `vitrine-core`, then
//! write the whole row back in a single upsert. Errors never mutate state.
//! The read cache is invalidated synchronously on every successful write,
//! before the response is returned.

use std::sync::Arc;

use rand::Rng;
use serde_json::{Map, Value as JsonValue, json};
use tracing::instrument;

use vitrine_core::migrate::{self, CURRENT_SCHEMA_VERSION};
use vitrine_core::switch::{self, SwitchDirective};
use vitrine_core::types::TemplateId;
use vitrine_core::{SettingsRow, TenantId, merge};

use crate::cache::SettingsCache;
use crate::error::Result;
use crate::store::SettingsStore;

/// The settings engine's service facade.
#[derive(Clone)]
pub struct SettingsService {
    store: Arc<dyn SettingsStore>,
    cache: SettingsCache,
}

impl SettingsService {
    #[must_use]
    pub fn new(store: Arc<dyn SettingsStore>, cache: SettingsCache) -> Self {
        Self { store, cache }
    }

    /// The merged view a storefront renders from.
    ///
    /// A tenant with no row yet gets one provisioned on first read (unique
    /// slug, default template); a second read returns the same row.
    ///
    /// # Errors
    ///
    /// Returns an error only for storage failures.
    #[instrument(skip(self))]
    pub async fn get_effective_settings(
        &self,
        tenant_id: TenantId,
    ) -> Result<Arc<Map<String, JsonValue>>> {
        if let Some(cached) = self.cache.get(tenant_id) {
            return Ok(cached);
        }

        let row = self.load_or_provision(tenant_id).await?;
        let effective = Arc::new(merge::effective_settings(&row));
        self.cache.insert(tenant_id, Arc::clone(&effective));
        Ok(effective)
    }

    /// Apply an update payload: ordinary field updates, or a template
    /// switch when the reserved `template` key is present.
    ///
    /// Returns the new effective settings.
    ///
    /// # Errors
    ///
    /// Validation and switch errors reject the whole payload; the stored
    /// row is untouched.
    #[instrument(skip(self, payload), fields(keys = payload.len()))]
    pub async fn apply_settings_update(
        &self,
        tenant_id: TenantId,
        payload: Map<String, JsonValue>,
    ) -> Result<Arc<Map<String, JsonValue>>> {
        let row = self.load_or_provision(tenant_id).await?;

        // Everything below is pure; nothing persists until the upsert.
        let outcome = merge::merge(&payload)?;
        let switched = match payload.get(merge::TEMPLATE_SWITCH_KEY) {
            Some(value) => {
                let directive = SwitchDirective::parse(value)?;
                tracing::info!(
                    from = %row.template,
                    to = %directive.to,
                    "Switching template"
                );
                switch::plan_switch(&row, &directive)?
            }
            None => row,
        };
        let mut next = merge::apply_merge(&switched, &outcome);
        let active = next.template_id();
        ensure_layout(&mut next, &active);

        self.store.upsert(&next).await?;
        self.cache.invalidate(tenant_id);
        Ok(Arc::new(merge::effective_settings(&next)))
    }

    /// The active template's layout document, migrated to the current
    /// schema version. A migrated document is persisted so the migration
    /// runs once per schema change, not once per read.
    ///
    /// # Errors
    ///
    /// Returns an error only for storage failures.
    #[instrument(skip(self))]
    pub async fn get_layout(&self, tenant_id: TenantId) -> Result<JsonValue> {
        let row = self.load_or_provision(tenant_id).await?;
        let active = row.template_id();
        let mut layouts = layouts_map(&row);
        let doc = layouts
            .get(active.as_str())
            .cloned()
            .unwrap_or_else(default_layout);

        let outcome = migrate::migrate(&doc);
        if outcome.migrated || !layouts.contains_key(active.as_str()) {
            tracing::info!(
                template = %active,
                from_version = outcome.from_version,
                "Persisting migrated layout document"
            );
            layouts.insert(active.as_str().to_string(), outcome.doc.clone());
            let mut next = row;
            next.layout_by_template = JsonValue::Object(layouts);
            self.store.upsert(&next).await?;
            self.cache.invalidate(tenant_id);
        }
        Ok(outcome.doc)
    }

    /// Save the active template's layout document. The document is
    /// migrated before it is stored; the stored form is returned.
    ///
    /// # Errors
    ///
    /// Returns an error only for storage failures.
    #[instrument(skip(self, doc))]
    pub async fn put_layout(&self, tenant_id: TenantId, doc: &JsonValue) -> Result<JsonValue> {
        let row = self.load_or_provision(tenant_id).await?;
        let active = row.template_id();
        let outcome = migrate::migrate(doc);

        let mut layouts = layouts_map(&row);
        layouts.insert(active.as_str().to_string(), outcome.doc.clone());
        let mut next = row;
        next.layout_by_template = JsonValue::Object(layouts);

        self.store.upsert(&next).await?;
        self.cache.invalidate(tenant_id);
        Ok(outcome.doc)
    }

    /// Fetch the tenant's row, provisioning a fresh one on first contact.
    async fn load_or_provision(&self, tenant_id: TenantId) -> Result<SettingsRow> {
        if let Some(row) = self.store.get(tenant_id).await? {
            return Ok(row);
        }

        let mut row = SettingsRow::provision(tenant_id, generate_slug(tenant_id));
        let active = row.template_id();
        ensure_layout(&mut row, &active);
        self.store.upsert(&row).await?;
        tracing::info!(slug = %row.slug, template = %row.template, "Provisioned tenant");
        Ok(row)
    }
}

/// The per-template layout map, degrading to empty on a corrupt blob.
fn layouts_map(row: &SettingsRow) -> Map<String, JsonValue> {
    row.layout_by_template
        .as_object()
        .cloned()
        .unwrap_or_default()
}

/// Create the template's layout document on first assignment.
fn ensure_layout(row: &mut SettingsRow, template: &TemplateId) {
    let mut layouts = layouts_map(row);
    if !layouts.contains_key(template.as_str()) {
        layouts.insert(template.as_str().to_string(), default_layout());
        row.layout_by_template = JsonValue::Object(layouts);
    }
}

/// The starting layout document every template begins from.
fn default_layout() -> JsonValue {
    json!({
        "version": CURRENT_SCHEMA_VERSION,
        "layout": {
            "header": { "showLogo": true },
            "hero": { "imageHeight": { "mobile": 320, "desktop": 480 } },
            "grid": { "columns": { "mobile": 2, "desktop": 4 } },
            "footer": { "showSocial": true }
        }
    })
}

/// Unique, URL-safe store handle for a fresh tenant.
fn generate_slug(tenant_id: TenantId) -> String {
    let suffix: u32 = rand::rng().random_range(0x1000..=0xffff);
    format!("store-{tenant_id}-{suffix:04x}")
}
