//! Vitrine Core - Template configuration snapshot & resolution engine.
//!
//! This crate contains the pure heart of the storefront builder: how a
//! tenant's per-template customizations are merged, snapshotted, migrated
//! across schema versions, and resolved at render time.
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. Everything here is deterministic and
//! safe to call from any context. The `builder` crate wires these functions
//! to storage and HTTP.
//!
//! # Modules
//!
//! - [`types`] - Tenant IDs, template IDs, breakpoints
//! - [`row`] - The per-tenant settings row as the engine sees it
//! - [`migrate`] - Lazy schema-version migration for layout documents
//! - [`snapshot`] - Per-template configuration snapshots
//! - [`merge`] - Payload classification, validation, and layered merging
//! - [`switch`] - Template-switch planning (defaults / import modes)
//! - [`responsive`] - Scalar-or-breakpoint-map value resolution
//! - [`asset`] - Symbolic asset key resolution with placeholder fallback

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod asset;
pub mod merge;
pub mod migrate;
pub mod responsive;
pub mod row;
pub mod snapshot;
pub mod switch;
pub mod types;

pub use row::SettingsRow;
pub use types::*;
