//! HTTP route handlers for the builder API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                              - Liveness check
//! GET  /health/ready                        - Readiness check (hits the DB)
//!
//! # Settings
//! GET   /stores/{tenant_id}/settings        - Effective (merged) settings
//! PATCH /stores/{tenant_id}/settings        - Field updates or template switch
//!
//! # Layout
//! GET  /stores/{tenant_id}/layout           - Active template's layout document
//! PUT  /stores/{tenant_id}/layout           - Save the layout document
//!
//! # Theme (render-facing)
//! GET  /stores/{tenant_id}/theme?width=...  - Resolved hero style + asset URLs
//! ```

pub mod layout;
pub mod settings;
pub mod theme;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::state::AppState;

/// Create all routes for the builder API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/stores/{tenant_id}/settings",
            patch(settings::update).get(settings::show),
        )
        .route(
            "/stores/{tenant_id}/layout",
            get(layout::show).put(layout::save),
        )
        .route("/stores/{tenant_id}/theme", get(theme::show))
}
