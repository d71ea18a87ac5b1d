//! Layout document route handlers.
//!
//! Documents are migrated to the current schema version on both paths:
//! reads migrate lazily (persisting the result), saves migrate before the
//! document is stored.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::Value as JsonValue;
use tracing::instrument;

use vitrine_core::TenantId;

use crate::error::Result;
use crate::state::AppState;

/// Get the active template's layout document.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(tenant_id): Path<i32>,
) -> Result<Json<JsonValue>> {
    let doc = state.settings().get_layout(TenantId::new(tenant_id)).await?;
    Ok(Json(doc))
}

/// Save the active template's layout document; returns the stored form.
#[instrument(skip(state, doc))]
pub async fn save(
    State(state): State<AppState>,
    Path(tenant_id): Path<i32>,
    Json(doc): Json<JsonValue>,
) -> Result<Json<JsonValue>> {
    let stored = state
        .settings()
        .put_layout(TenantId::new(tenant_id), &doc)
        .await?;
    Ok(Json(stored))
}
