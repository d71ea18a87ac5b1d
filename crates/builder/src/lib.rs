//! Vitrine Builder library.
//!
//! This crate provides the settings service as a library, allowing it to
//! be tested and reused without a running HTTP server.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod retry;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
