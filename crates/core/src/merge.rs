//! Payload classification, validation, and layered settings merging.
//!
//! An incoming settings payload is a flat JSON object from the editor UI.
//! Every key is classified exactly once against a static allowlist: it is
//! either a known scalar column, the reserved template-switch control key,
//! or an "extra" that folds into the active template's JSON blob. Extras
//! are never rejected - a newer front-end may send fields this server has
//! not heard of yet.
//!
//! Validation is atomic: if any scalar field fails its type/length rule the
//! whole payload is rejected and nothing is applied.

use std::collections::BTreeMap;

use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

use crate::row::SettingsRow;
use crate::snapshot;

/// Payload key that triggers a template switch instead of a field update.
pub const TEMPLATE_SWITCH_KEY: &str = "template";

/// Upper bound on payload keys; anything larger is rejected outright.
pub const MAX_PAYLOAD_KEYS: usize = 64;

/// Scalar columns updatable through the settings payload, with their
/// maximum accepted length.
const UPDATABLE_COLUMNS: &[(&str, usize)] = &[
    ("store_name", 120),
    ("currency", 3),
    ("logo_url", 2048),
    ("banner_url", 2048),
    ("hero_heading", 200),
    ("hero_subtitle", 300),
    ("hero_button_text", 40),
    ("accent_color", 7),
    ("hero_media", 2048),
    ("gallery_images", 2048),
];

/// How a payload key is handled, decided once from the static allowlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyClass {
    /// A known scalar column on the settings row.
    Column(&'static str),
    /// The reserved template-switch control key.
    TemplateSwitch,
    /// Unknown key; folds into the template's JSON blob.
    Extra,
}

/// Classify a payload key. Total: every string maps to exactly one class.
#[must_use]
pub fn classify(key: &str) -> KeyClass {
    if key == TEMPLATE_SWITCH_KEY {
        return KeyClass::TemplateSwitch;
    }
    UPDATABLE_COLUMNS
        .iter()
        .find(|(name, _)| *name == key)
        .map_or(KeyClass::Extra, |(name, _)| KeyClass::Column(name))
}

/// Validation failure for an update payload. The whole request is rejected;
/// no partial apply.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MergeError {
    #[error("invalid value for {field}: {reason}")]
    Validation { field: String, reason: String },
    #[error("too many fields: {count} (max {max})")]
    TooManyFields { count: usize, max: usize },
}

impl MergeError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// The computed effect of an update payload: which columns change and what
/// folds into the active template's JSON blob.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeOutcome {
    /// Column name -> new value (`None` clears to NULL).
    pub column_updates: BTreeMap<&'static str, Option<String>>,
    /// Extra keys destined for `template_settings`.
    pub json_updates: Map<String, JsonValue>,
}

impl MergeOutcome {
    /// Whether the payload had any effect at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.column_updates.is_empty() && self.json_updates.is_empty()
    }
}

/// Compute the effect of an ordinary (non-switch) update payload.
///
/// The reserved [`TEMPLATE_SWITCH_KEY`] is ignored here; callers route
/// switch payloads to the switch planner before merging.
///
/// # Errors
///
/// Returns [`MergeError`] if any scalar value fails its type/length rule or
/// the payload has too many keys. On error nothing is applied.
pub fn merge(payload: &Map<String, JsonValue>) -> Result<MergeOutcome, MergeError> {
    if payload.len() > MAX_PAYLOAD_KEYS {
        return Err(MergeError::TooManyFields {
            count: payload.len(),
            max: MAX_PAYLOAD_KEYS,
        });
    }

    let mut outcome = MergeOutcome::default();
    for (key, value) in payload {
        match classify(key) {
            KeyClass::Column(name) => {
                let validated = validate_column(name, value)?;
                outcome.column_updates.insert(name, validated);
            }
            KeyClass::TemplateSwitch => {}
            KeyClass::Extra => {
                outcome.json_updates.insert(key.clone(), value.clone());
            }
        }
    }
    Ok(outcome)
}

/// Apply a computed merge to a row, returning the new row.
///
/// Extras fold into `template_settings` (with any stray `template` key
/// dropped), and the snapshot-map entry for the active template is
/// refreshed so it stays consistent with the live columns.
#[must_use]
pub fn apply_merge(row: &SettingsRow, outcome: &MergeOutcome) -> SettingsRow {
    let mut next = row.clone();
    for (name, value) in &outcome.column_updates {
        next.set_column(name, value.clone());
    }

    let mut extras = next.template_settings_map();
    for (key, value) in &outcome.json_updates {
        extras.insert(key.clone(), value.clone());
    }
    extras.remove(TEMPLATE_SWITCH_KEY);
    next.template_settings = JsonValue::Object(extras);

    let refreshed = snapshot::build_snapshot(&next);
    next.template_settings_by_template = JsonValue::Object(snapshot::write_snapshot(
        &next.snapshot_map(),
        &next.template_id(),
        refreshed,
    ));
    next
}

/// Merge ordered layers into one object; later layers win per key.
///
/// Precedence is a property of the slice order handed in, never of
/// call-site spread order.
#[must_use]
pub fn merge_layers(layers: &[&Map<String, JsonValue>]) -> Map<String, JsonValue> {
    let mut out = Map::new();
    for layer in layers {
        for (key, value) in *layer {
            out.insert(key.clone(), value.clone());
        }
    }
    out
}

/// The merged view callers render from.
///
/// Precedence (lowest first): tenant-global `settings`, the active
/// template's `template_settings`, then the literal row columns. The
/// `template` column always overrides any stray `template` key found in
/// JSON, and `gallery_images` is exposed as an array.
#[must_use]
pub fn effective_settings(row: &SettingsRow) -> Map<String, JsonValue> {
    let global = row.settings.as_object().cloned().unwrap_or_default();
    let per_template = row.template_settings_map();

    let mut columns = Map::new();
    columns.insert("slug".to_string(), JsonValue::String(row.slug.clone()));
    for (name, _) in UPDATABLE_COLUMNS {
        if let Some(value) = row.column(name) {
            let exposed = if *name == "gallery_images" {
                split_image_list(value)
            } else {
                JsonValue::String(value.to_string())
            };
            columns.insert((*name).to_string(), exposed);
        }
    }

    let mut merged = merge_layers(&[&global, &per_template, &columns]);
    merged.insert(
        TEMPLATE_SWITCH_KEY.to_string(),
        JsonValue::String(row.template.clone()),
    );
    merged
}

// =============================================================================
// Validation & normalization
// =============================================================================

/// Validate one scalar column value. `null` clears the column.
fn validate_column(name: &'static str, value: &JsonValue) -> Result<Option<String>, MergeError> {
    if value.is_null() {
        return Ok(None);
    }
    if name == "gallery_images" {
        return normalize_image_list(value);
    }

    let Some(text) = value.as_str() else {
        return Err(MergeError::invalid(name, "expected a string or null"));
    };
    let max = UPDATABLE_COLUMNS
        .iter()
        .find(|(n, _)| *n == name)
        .map_or(0, |(_, max)| *max);
    if text.chars().count() > max {
        return Err(MergeError::invalid(name, format!("longer than {max} characters")));
    }

    match name {
        "accent_color" if !is_hex_color(text) => {
            Err(MergeError::invalid(name, "expected #rgb or #rrggbb"))
        }
        "currency" if !is_currency_code(text) => {
            Err(MergeError::invalid(name, "expected a 3-letter ISO 4217 code"))
        }
        _ => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                Ok(Some(trimmed.to_string()))
            }
        }
    }
}

/// Normalize a multi-value image list to its comma-joined column form.
///
/// Accepts an array of strings or a comma-joined string. Items are trimmed,
/// de-duplicated preserving first occurrence, and an empty result collapses
/// to NULL.
fn normalize_image_list(value: &JsonValue) -> Result<Option<String>, MergeError> {
    const FIELD: &str = "gallery_images";
    const MAX_ITEM_LEN: usize = 2048;

    let items: Vec<String> = match value {
        JsonValue::String(joined) => joined.split(',').map(str::to_string).collect(),
        JsonValue::Array(entries) => entries
            .iter()
            .map(|entry| {
                entry
                    .as_str()
                    .map(str::to_string)
                    .ok_or_else(|| MergeError::invalid(FIELD, "expected an array of strings"))
            })
            .collect::<Result<_, _>>()?,
        _ => {
            return Err(MergeError::invalid(
                FIELD,
                "expected an array of strings or a comma-joined string",
            ));
        }
    };

    let mut seen = Vec::new();
    for item in items {
        let trimmed = item.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.len() > MAX_ITEM_LEN {
            return Err(MergeError::invalid(
                FIELD,
                format!("image URL longer than {MAX_ITEM_LEN} characters"),
            ));
        }
        if !seen.iter().any(|existing: &String| existing == trimmed) {
            seen.push(trimmed.to_string());
        }
    }

    if seen.is_empty() {
        Ok(None)
    } else {
        Ok(Some(seen.join(",")))
    }
}

/// Split a stored comma-joined image list back into an array.
fn split_image_list(joined: &str) -> JsonValue {
    JsonValue::Array(
        joined
            .split(',')
            .filter(|item| !item.is_empty())
            .map(|item| JsonValue::String(item.to_string()))
            .collect(),
    )
}

fn is_hex_color(text: &str) -> bool {
    let Some(digits) = text.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

fn is_currency_code(text: &str) -> bool {
    text.len() == 3 && text.chars().all(|c| c.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::TenantId;

    fn payload(value: JsonValue) -> Map<String, JsonValue> {
        value.as_object().cloned().expect("object payload")
    }

    fn row() -> SettingsRow {
        SettingsRow::provision(TenantId::new(1), "acme".to_string())
    }

    #[test]
    fn test_classify_total() {
        assert_eq!(classify("hero_heading"), KeyClass::Column("hero_heading"));
        assert_eq!(classify("store_name"), KeyClass::Column("store_name"));
        assert_eq!(classify("template"), KeyClass::TemplateSwitch);
        assert_eq!(classify("foo_bar"), KeyClass::Extra);
        assert_eq!(classify(""), KeyClass::Extra);
    }

    #[test]
    fn test_unknown_keys_fold_into_json() {
        let outcome =
            merge(&payload(json!({ "foo_bar": 42, "hero_heading": "Sale" }))).expect("merge");
        assert_eq!(outcome.json_updates.get("foo_bar"), Some(&json!(42)));
        assert_eq!(
            outcome.column_updates.get("hero_heading"),
            Some(&Some("Sale".to_string()))
        );
    }

    #[test]
    fn test_validation_is_atomic() {
        // One bad field rejects the whole payload.
        let err = merge(&payload(json!({
            "hero_heading": "fine",
            "accent_color": "red"
        })))
        .expect_err("must reject");
        assert!(matches!(err, MergeError::Validation { ref field, .. } if field == "accent_color"));
    }

    #[test]
    fn test_too_many_fields() {
        let mut big = Map::new();
        for i in 0..=MAX_PAYLOAD_KEYS {
            big.insert(format!("key_{i}"), json!(1));
        }
        assert!(matches!(merge(&big), Err(MergeError::TooManyFields { .. })));
    }

    #[test]
    fn test_scalar_rules() {
        assert!(merge(&payload(json!({ "hero_heading": 42 }))).is_err());
        assert!(merge(&payload(json!({ "currency": "usd" }))).is_err());
        assert!(merge(&payload(json!({ "currency": "USD" }))).is_ok());
        assert!(merge(&payload(json!({ "accent_color": "#a1b2c3" }))).is_ok());
        assert!(merge(&payload(json!({ "accent_color": "#ab" }))).is_err());
        assert!(merge(&payload(json!({ "hero_button_text": "x".repeat(41) }))).is_err());
        // null clears
        let outcome = merge(&payload(json!({ "hero_heading": null }))).expect("merge");
        assert_eq!(outcome.column_updates.get("hero_heading"), Some(&None));
    }

    #[test]
    fn test_image_list_normalization() {
        let outcome = merge(&payload(json!({
            "gallery_images": [" a.jpg", "b.jpg ", "a.jpg", "  "]
        })))
        .expect("merge");
        assert_eq!(
            outcome.column_updates.get("gallery_images"),
            Some(&Some("a.jpg,b.jpg".to_string()))
        );

        let outcome =
            merge(&payload(json!({ "gallery_images": "c.jpg, ,c.jpg,d.jpg" }))).expect("merge");
        assert_eq!(
            outcome.column_updates.get("gallery_images"),
            Some(&Some("c.jpg,d.jpg".to_string()))
        );

        // All-empty collapses to NULL
        let outcome = merge(&payload(json!({ "gallery_images": [" ", ""] }))).expect("merge");
        assert_eq!(outcome.column_updates.get("gallery_images"), Some(&None));

        assert!(merge(&payload(json!({ "gallery_images": [1, 2] }))).is_err());
    }

    #[test]
    fn test_apply_merge_refreshes_snapshot_map() {
        let base = row();
        let outcome = merge(&payload(json!({
            "hero_heading": "Sale",
            "foo_bar": 42
        })))
        .expect("merge");
        let next = apply_merge(&base, &outcome);

        assert_eq!(next.hero_heading.as_deref(), Some("Sale"));
        assert_eq!(
            next.template_settings.get("foo_bar"),
            Some(&json!(42))
        );
        // Active template's snapshot tracks the live columns
        let map = next.snapshot_map();
        let entry = map.get("pro").and_then(JsonValue::as_object).expect("entry");
        assert_eq!(entry.get("hero_heading"), Some(&json!("Sale")));
    }

    #[test]
    fn test_apply_merge_never_stores_template_key_in_json() {
        let mut base = row();
        base.template_settings = json!({ "template": "smuggled" });
        let next = apply_merge(&base, &MergeOutcome::default());
        assert!(next.template_settings.get("template").is_none());
    }

    #[test]
    fn test_merge_layers_precedence_is_order() {
        let mut low = Map::new();
        low.insert("a".to_string(), json!(1));
        low.insert("b".to_string(), json!(1));
        let mut high = Map::new();
        high.insert("b".to_string(), json!(2));

        let merged = merge_layers(&[&low, &high]);
        assert_eq!(merged.get("a"), Some(&json!(1)));
        assert_eq!(merged.get("b"), Some(&json!(2)));

        let flipped = merge_layers(&[&high, &low]);
        assert_eq!(flipped.get("b"), Some(&json!(1)));
    }

    #[test]
    fn test_effective_settings_precedence() {
        let mut row = row();
        row.settings = json!({ "locale": "en", "hero_heading": "from-global" });
        row.template_settings = json!({ "hero_heading": "from-template", "font_scale": 1.1 });
        row.hero_heading = Some("from-column".to_string());
        row.gallery_images = Some("a.jpg,b.jpg".to_string());

        let effective = effective_settings(&row);
        assert_eq!(effective.get("locale"), Some(&json!("en")));
        assert_eq!(effective.get("hero_heading"), Some(&json!("from-column")));
        assert_eq!(effective.get("font_scale"), Some(&json!(1.1)));
        assert_eq!(
            effective.get("gallery_images"),
            Some(&json!(["a.jpg", "b.jpg"]))
        );
    }

    #[test]
    fn test_effective_settings_template_column_wins() {
        let mut row = row();
        row.template = "fashion".to_string();
        row.settings = json!({ "template": "stray-global" });
        row.template_settings = json!({ "template": "stray-template" });
        let effective = effective_settings(&row);
        assert_eq!(effective.get("template"), Some(&json!("fashion")));
    }
}
