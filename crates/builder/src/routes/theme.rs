//! Render-facing theme resolution.
//!
//! Returns the hero style with responsive values resolved for the caller's
//! container width, plus displayable URLs for the row's media fields. This
//! is the endpoint embedded previews poll on resize, so it must stay total:
//! corrupt documents degrade to defaults, never to errors.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue, json};
use tracing::instrument;

use vitrine_core::types::Breakpoint;
use vitrine_core::{TenantId, asset, responsive};

use crate::error::Result;
use crate::state::AppState;

/// Width defaults to a desktop container when the preview doesn't send one.
const DEFAULT_CONTAINER_WIDTH: u32 = 1280;

#[derive(Debug, Deserialize)]
pub struct ThemeQuery {
    /// Rendered container width in CSS pixels (not the viewport).
    pub width: Option<u32>,
}

/// Resolve the tenant's theme for one container width.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(tenant_id): Path<i32>,
    Query(query): Query<ThemeQuery>,
) -> Result<Json<JsonValue>> {
    let tenant_id = TenantId::new(tenant_id);
    let breakpoint = Breakpoint::from_width(query.width.unwrap_or(DEFAULT_CONTAINER_WIDTH));

    let settings = state.settings().get_effective_settings(tenant_id).await?;
    let layout = state.settings().get_layout(tenant_id).await?;

    let hero = layout
        .pointer("/layout/hero")
        .and_then(JsonValue::as_object)
        .map_or_else(Map::new, |style| {
            responsive::resolve_style(style, breakpoint).into_owned()
        });

    let overrides = object_field(&settings, "asset_overrides");
    let assets = object_field(&settings, "assets");
    let media = json!({
        "logo": resolve_media(&settings, "logo_url", "logo", &overrides, &assets),
        "banner": resolve_media(&settings, "banner_url", "banner", &overrides, &assets),
        "hero": resolve_media(&settings, "hero_media", "hero", &overrides, &assets),
    });

    Ok(Json(json!({
        "breakpoint": breakpoint,
        "hero": hero,
        "media": media,
    })))
}

/// Resolve one media field: the stored reference if set, else the
/// symbolic default key.
fn resolve_media(
    settings: &Map<String, JsonValue>,
    field: &str,
    default_key: &str,
    overrides: &Map<String, JsonValue>,
    assets: &Map<String, JsonValue>,
) -> String {
    let key = settings
        .get(field)
        .and_then(JsonValue::as_str)
        .unwrap_or(default_key);
    asset::resolve(key, overrides, assets)
}

fn object_field(settings: &Map<String, JsonValue>, field: &str) -> Map<String, JsonValue> {
    settings
        .get(field)
        .and_then(JsonValue::as_object)
        .cloned()
        .unwrap_or_default()
}
