//! Business-logic services.

pub mod settings;

pub use settings::SettingsService;
