//! Settings route handlers.
//!
//! One endpoint pair drives the whole editor: reads return the effective
//! (merged) settings, writes accept ordinary field updates or the reserved
//! template-switch payload. Error responses carry a stable `code`; a
//! rejected write leaves the row untouched.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Map, Value as JsonValue};
use tracing::instrument;

use vitrine_core::TenantId;

use crate::error::Result;
use crate::state::AppState;

/// Get a tenant's effective settings.
///
/// A tenant seen for the first time gets a row provisioned on this read.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(tenant_id): Path<i32>,
) -> Result<Json<JsonValue>> {
    let settings = state
        .settings()
        .get_effective_settings(TenantId::new(tenant_id))
        .await?;
    Ok(Json(JsonValue::Object(settings.as_ref().clone())))
}

/// Apply a settings update payload; returns the new effective settings.
#[instrument(skip(state, payload), fields(keys = payload.len()))]
pub async fn update(
    State(state): State<AppState>,
    Path(tenant_id): Path<i32>,
    Json(payload): Json<Map<String, JsonValue>>,
) -> Result<Json<JsonValue>> {
    let settings = state
        .settings()
        .apply_settings_update(TenantId::new(tenant_id), payload)
        .await?;
    Ok(Json(JsonValue::Object(settings.as_ref().clone())))
}
