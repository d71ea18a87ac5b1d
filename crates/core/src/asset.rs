//! Symbolic asset key resolution with placeholder fallback.
//!
//! Layout documents reference media by absolute URL, root-relative path,
//! or symbolic key (looked up in the tenant's asset catalog). Resolution
//! is total: for any string input and any override/catalog maps - empty
//! ones included - it yields a non-empty displayable URL.

use serde_json::{Map, Value as JsonValue};

/// Served locally; substituted for anything that cannot be displayed.
pub const LOCAL_PLACEHOLDER: &str = "/assets/placeholder.svg";

/// Hosts whose URLs are sample data, not real tenant media. Seeded demo
/// stores carry these; production rendering swaps them for the local
/// placeholder rather than hotlink a sample CDN.
const PLACEHOLDER_HOSTS: &[&str] = &[
    "placehold.co",
    "via.placeholder.com",
    "picsum.photos",
    "sample-cdn.vitrine.dev",
];

/// Resolve an asset reference to a displayable URL.
///
/// Order: a non-empty override wins; an absolute http(s) URL or
/// root-relative path is returned unchanged; otherwise the catalog entry's
/// `url`, defaulting to `/assets/{key}`. URLs on a known placeholder host
/// are substituted with [`LOCAL_PLACEHOLDER`].
#[must_use]
pub fn resolve(
    asset_key: &str,
    overrides: &Map<String, JsonValue>,
    assets: &Map<String, JsonValue>,
) -> String {
    let resolved = resolve_raw(asset_key, overrides, assets);
    if is_placeholder_url(&resolved) {
        LOCAL_PLACEHOLDER.to_string()
    } else {
        resolved
    }
}

fn resolve_raw(
    asset_key: &str,
    overrides: &Map<String, JsonValue>,
    assets: &Map<String, JsonValue>,
) -> String {
    if let Some(override_url) = overrides
        .get(asset_key)
        .and_then(JsonValue::as_str)
        .filter(|url| !url.trim().is_empty())
    {
        return override_url.to_string();
    }

    if is_direct_url(asset_key) {
        return asset_key.to_string();
    }

    if asset_key.is_empty() {
        return LOCAL_PLACEHOLDER.to_string();
    }

    assets
        .get(asset_key)
        .and_then(|entry| entry.get("url"))
        .and_then(JsonValue::as_str)
        .filter(|url| !url.is_empty())
        .map_or_else(|| format!("/assets/{asset_key}"), str::to_string)
}

/// Whether the key is already a displayable URL rather than a symbolic key.
fn is_direct_url(key: &str) -> bool {
    key.starts_with("http://") || key.starts_with("https://") || key.starts_with('/')
}

/// Whether a resolved URL points at a known placeholder/sample-CDN host.
fn is_placeholder_url(url: &str) -> bool {
    let Some(rest) = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
    else {
        return false;
    };
    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = host.split('@').next_back().unwrap_or_default();
    let host = host.split(':').next().unwrap_or_default();
    PLACEHOLDER_HOSTS
        .iter()
        .any(|candidate| host == *candidate || host.ends_with(&format!(".{candidate}")))
}
