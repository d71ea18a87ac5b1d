//! Per-template configuration snapshots.
//!
//! When a tenant switches templates their customizations are not thrown
//! away: the scoped fields of the outgoing template are captured into a
//! snapshot keyed by template id, and restored verbatim if they ever switch
//! back. Snapshots for templates the tenant is not using are never touched
//! by writes to other templates (strict isolation).

use serde_json::{Map, Value as JsonValue};

use crate::row::SettingsRow;
use crate::types::TemplateId;

/// The fixed whitelist of fields tracked per-template.
///
/// Everything else on the row (store name, currency, logo, ...) is global
/// and shared across every template - never snapshotted.
pub const SCOPED_FIELDS: &[&str] = &[
    "hero_heading",
    "hero_subtitle",
    "hero_button_text",
    "accent_color",
    "hero_media",
    "gallery_images",
];

/// Whether a field is tracked per-template.
#[must_use]
pub fn is_scoped_field(name: &str) -> bool {
    SCOPED_FIELDS.contains(&name)
}

/// Capture the active template's current configuration.
///
/// Shallow-copies the row's `template_settings`, then overlays the scoped
/// columns: live columns win over any stale copy of a scoped field left in
/// the JSON blob. A scoped column that is NULL removes the key entirely.
#[must_use]
pub fn build_snapshot(row: &SettingsRow) -> Map<String, JsonValue> {
    let mut snapshot = row.template_settings_map();
    for &field in SCOPED_FIELDS {
        match row.column(field) {
            Some(value) => {
                snapshot.insert(field.to_string(), JsonValue::String(value.to_string()));
            }
            None => {
                snapshot.remove(field);
            }
        }
    }
    snapshot
}

/// Read the stored snapshot for a template, if one exists.
#[must_use]
pub fn read_snapshot(
    map: &Map<String, JsonValue>,
    template: &TemplateId,
) -> Option<Map<String, JsonValue>> {
    map.get(template.as_str())
        .and_then(JsonValue::as_object)
        .cloned()
}

/// Store a snapshot under a template id.
///
/// Returns a new map with only that key replaced; every other template's
/// entry is carried over untouched.
#[must_use]
pub fn write_snapshot(
    map: &Map<String, JsonValue>,
    template: &TemplateId,
    snapshot: Map<String, JsonValue>,
) -> Map<String, JsonValue> {
    let mut out = map.clone();
    out.insert(template.as_str().to_string(), JsonValue::Object(snapshot));
    out
}
