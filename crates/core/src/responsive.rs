//! Scalar-or-breakpoint-map value resolution.
//!
//! Layout documents store numeric style values either as a bare number
//! (the pre-responsive format, still accepted) or as a partial map
//! `{mobile?, tablet?, desktop?}`. Resolution is total: malformed input
//! yields `None` and the caller falls back to its default - a corrupt
//! tenant document must never break rendering.

use std::borrow::Cow;

use serde_json::{Map, Value as JsonValue};

use crate::types::Breakpoint;

/// Resolve a responsive value to a concrete number for a breakpoint.
///
/// Bare number: returned as-is. Object: the breakpoint's own key if
/// numeric, else `desktop` if numeric, else `None`. Anything else: `None`.
#[must_use]
pub fn resolve(value: &JsonValue, breakpoint: Breakpoint) -> Option<f64> {
    match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::Object(map) => map
            .get(breakpoint.key())
            .and_then(JsonValue::as_f64)
            .or_else(|| map.get(Breakpoint::Desktop.key()).and_then(JsonValue::as_f64)),
        _ => None,
    }
}

/// Resolve every key of a style object for a breakpoint.
///
/// Returns `Cow::Borrowed` when no key actually changed, so memoized
/// renderers comparing by reference see a stable value.
#[must_use]
pub fn resolve_style(style: &Map<String, JsonValue>, breakpoint: Breakpoint) -> Cow<'_, Map<String, JsonValue>> {
    let mut resolved: Option<Map<String, JsonValue>> = None;
    for (key, value) in style {
        // Bare numbers are already concrete; only breakpoint maps change.
        if !value.is_object() {
            continue;
        }
        let Some(number) = resolve(value, breakpoint) else {
            continue;
        };
        resolved
            .get_or_insert_with(|| style.clone())
            .insert(key.clone(), JsonValue::from(number));
    }
    match resolved {
        Some(map) => Cow::Owned(map),
        None => Cow::Borrowed(style),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_bare_number_backward_compatible() {
        assert_eq!(resolve(&json!(200), Breakpoint::Mobile), Some(200.0));
        assert_eq!(resolve(&json!(1.5), Breakpoint::Desktop), Some(1.5));
    }

    #[test]
    fn test_breakpoint_key_then_desktop_fallback() {
        let value = json!({ "mobile": 100, "desktop": 300 });
        assert_eq!(resolve(&value, Breakpoint::Mobile), Some(100.0));
        // tablet not set: fall through to desktop
        assert_eq!(resolve(&value, Breakpoint::Tablet), Some(300.0));
        assert_eq!(resolve(&value, Breakpoint::Desktop), Some(300.0));
    }

    #[test]
    fn test_totality_on_malformed_input() {
        let malformed = [
            json!(null),
            json!("tall"),
            json!(true),
            json!([1, 2, 3]),
            json!({}),
            json!({ "mobile": "short" }),
            json!({ "desktop": null }),
            json!({ "mobile": {"nested": 1} }),
        ];
        for value in &malformed {
            for bp in [Breakpoint::Mobile, Breakpoint::Tablet, Breakpoint::Desktop] {
                assert_eq!(resolve(value, bp), None, "value {value} must resolve to None");
            }
        }
        // Non-numeric breakpoint key but numeric desktop still resolves
        assert_eq!(
            resolve(&json!({ "mobile": "x", "desktop": 50 }), Breakpoint::Mobile),
            Some(50.0)
        );
    }

    #[test]
    fn test_resolve_style_changes_only_responsive_keys() {
        let style = json!({
            "imageHeight": { "mobile": 200, "desktop": 400 },
            "title": "Hello",
            "padding": 16
        });
        let style = style.as_object().cloned().expect("object");
        let resolved = resolve_style(&style, Breakpoint::Mobile);
        assert_eq!(resolved.get("imageHeight"), Some(&json!(200.0)));
        assert_eq!(resolved.get("title"), Some(&json!("Hello")));
        assert_eq!(resolved.get("padding"), Some(&json!(16)));
    }

    #[test]
    fn test_resolve_style_referential_stability() {
        // No responsive maps: the original reference comes back.
        let style = json!({ "title": "Hello", "padding": 16 });
        let style = style.as_object().cloned().expect("object");
        let resolved = resolve_style(&style, Breakpoint::Desktop);
        assert!(matches!(resolved, Cow::Borrowed(_)));

        let responsive = json!({ "height": { "mobile": 1, "desktop": 2 } });
        let responsive = responsive.as_object().cloned().expect("object");
        let resolved = resolve_style(&responsive, Breakpoint::Mobile);
        assert!(matches!(resolved, Cow::Owned(_)));
    }
}
