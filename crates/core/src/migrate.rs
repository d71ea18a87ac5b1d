//! Lazy schema-version migration for layout documents.
//!
//! A `ConfigDocument` is the versioned JSON tree of layout nodes a tenant's
//! storefront renders from. Documents are migrated on read, never in bulk:
//! a tenant who has not loaded their store since a schema change simply
//! carries an old document until the next read.
//!
//! Migration is total by design - a corrupt or foreign document must not
//! break rendering, so non-object input passes through unchanged and
//! unknown fields written by newer producers survive untouched.

use serde_json::{Map, Value as JsonValue, json};

/// The schema version current documents carry.
pub const CURRENT_SCHEMA_VERSION: u64 = 2;

/// Result of migrating a document.
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationOutcome {
    /// The migrated document. Equal to the input when `migrated` is false.
    pub doc: JsonValue,
    /// Whether the document changed at all.
    pub migrated: bool,
    /// Version the document claimed before migration.
    pub from_version: u64,
    /// Always [`CURRENT_SCHEMA_VERSION`] for object documents.
    pub to_version: u64,
}

/// Migrate a layout document to the current schema version.
///
/// Steps are applied strictly in ascending order; each step is pure and
/// only touches the fields it names. The `version` field is stamped to
/// [`CURRENT_SCHEMA_VERSION`] unconditionally afterwards, which makes the
/// whole operation idempotent.
#[must_use]
pub fn migrate(doc: &JsonValue) -> MigrationOutcome {
    let Some(obj) = doc.as_object() else {
        return MigrationOutcome {
            doc: doc.clone(),
            migrated: false,
            from_version: CURRENT_SCHEMA_VERSION,
            to_version: CURRENT_SCHEMA_VERSION,
        };
    };

    let from_version = obj.get("version").and_then(JsonValue::as_u64).unwrap_or(1);

    let mut out = obj.clone();
    if from_version < 2 {
        migrate_v1_to_v2(&mut out);
    }
    out.insert("version".to_string(), json!(CURRENT_SCHEMA_VERSION));

    let out = JsonValue::Object(out);
    let migrated = out != *doc;
    MigrationOutcome {
        doc: out,
        migrated,
        from_version,
        to_version: CURRENT_SCHEMA_VERSION,
    }
}

/// Step 1 -> 2: collapse the old split hero image heights.
///
/// Where `layout.hero.imageHeight` and `layout.hero.imageHeightMd` are both
/// bare numbers, fold them into a responsive map
/// `imageHeight = {mobile, desktop}`. Anything else is left alone.
fn migrate_v1_to_v2(doc: &mut Map<String, JsonValue>) {
    let Some(hero) = doc
        .get_mut("layout")
        .and_then(|layout| layout.get_mut("hero"))
        .and_then(JsonValue::as_object_mut)
    else {
        return;
    };

    let both_numeric = hero.get("imageHeight").is_some_and(JsonValue::is_number)
        && hero.get("imageHeightMd").is_some_and(JsonValue::is_number);
    if !both_numeric {
        return;
    }

    // Checked numeric above.
    let mobile = hero.get("imageHeight").cloned().unwrap_or(JsonValue::Null);
    let Some(desktop) = hero.remove("imageHeightMd") else {
        return;
    };
    hero.insert(
        "imageHeight".to_string(),
        json!({ "mobile": mobile, "desktop": desktop }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_object_passes_through() {
        for doc in [json!(null), json!(42), json!("layout"), json!([1, 2])] {
            let outcome = migrate(&doc);
            assert_eq!(outcome.doc, doc);
            assert!(!outcome.migrated);
        }
    }

    #[test]
    fn test_v1_hero_heights_collapse() {
        let doc = json!({
            "version": 1,
            "layout": { "hero": { "imageHeight": 200, "imageHeightMd": 400 } }
        });
        let outcome = migrate(&doc);
        assert!(outcome.migrated);
        assert_eq!(outcome.from_version, 1);
        assert_eq!(outcome.to_version, 2);
        assert_eq!(
            outcome.doc,
            json!({
                "version": 2,
                "layout": { "hero": { "imageHeight": { "mobile": 200, "desktop": 400 } } }
            })
        );
    }

    #[test]
    fn test_missing_version_defaults_to_one() {
        let doc = json!({
            "layout": { "hero": { "imageHeight": 120, "imageHeightMd": 360 } }
        });
        let outcome = migrate(&doc);
        assert_eq!(outcome.from_version, 1);
        assert_eq!(
            outcome.doc.pointer("/layout/hero/imageHeight"),
            Some(&json!({ "mobile": 120, "desktop": 360 }))
        );
    }

    #[test]
    fn test_partial_hero_heights_untouched() {
        // Only one of the pair present, or non-numeric: nothing collapses.
        let doc = json!({
            "version": 1,
            "layout": { "hero": { "imageHeight": 200 } }
        });
        let outcome = migrate(&doc);
        assert_eq!(
            outcome.doc.pointer("/layout/hero/imageHeight"),
            Some(&json!(200))
        );

        let doc = json!({
            "version": 1,
            "layout": { "hero": { "imageHeight": "tall", "imageHeightMd": 400 } }
        });
        let outcome = migrate(&doc);
        assert_eq!(
            outcome.doc.pointer("/layout/hero/imageHeightMd"),
            Some(&json!(400))
        );
    }

    #[test]
    fn test_idempotent() {
        let docs = [
            json!({ "version": 1, "layout": { "hero": { "imageHeight": 200, "imageHeightMd": 400 } } }),
            json!({ "version": 1, "layout": { "grid": { "columns": 3 } } }),
            json!({}),
            json!("not a document"),
        ];
        for doc in docs {
            let once = migrate(&doc);
            let twice = migrate(&once.doc);
            assert_eq!(twice.doc, once.doc);
            assert!(!twice.migrated, "second migration must be a no-op");
        }
    }

    #[test]
    fn test_unknown_fields_survive() {
        let doc = json!({
            "version": 1,
            "layout": {
                "hero": { "imageHeight": 1, "imageHeightMd": 2, "futureKnob": true },
                "holograms": [{ "id": 9 }]
            },
            "producedBy": "vitrine-editor/9.9"
        });
        let outcome = migrate(&doc);
        assert_eq!(
            outcome.doc.pointer("/layout/hero/futureKnob"),
            Some(&json!(true))
        );
        assert_eq!(
            outcome.doc.pointer("/layout/holograms/0/id"),
            Some(&json!(9))
        );
        assert_eq!(
            outcome.doc.pointer("/producedBy"),
            Some(&json!("vitrine-editor/9.9"))
        );
    }

    #[test]
    fn test_newer_version_stamped_down() {
        // A doc from a newer producer is re-stamped but its content is kept.
        let doc = json!({ "version": 7, "layout": { "novel": true } });
        let outcome = migrate(&doc);
        assert_eq!(outcome.from_version, 7);
        assert_eq!(outcome.doc.pointer("/version"), Some(&json!(2)));
        assert_eq!(outcome.doc.pointer("/layout/novel"), Some(&json!(true)));
    }
}
