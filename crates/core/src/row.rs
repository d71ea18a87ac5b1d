//! The per-tenant settings row as the engine sees it.
//!
//! One row per tenant: scalar columns for typed fields, plus three JSON
//! blobs - the tenant-global `settings`, the active template's extra
//! `template_settings`, and the per-template snapshot map. The engine
//! computes everything over this struct in memory; the `builder` crate
//! owns reading and writing it.

use serde_json::{Map, Value as JsonValue};

use crate::types::{TemplateId, TenantId, template::DEFAULT_TEMPLATE};

/// A tenant's settings row.
///
/// Invariants maintained by the engine:
/// - `template_settings` never contains the key `template`.
/// - After every successful write, `template_settings_by_template` holds an
///   entry for the active template consistent with the live columns.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct SettingsRow {
    pub tenant_id: TenantId,
    /// Unique, URL-safe store handle.
    pub slug: String,
    pub store_name: Option<String>,
    /// ISO 4217 code, e.g. `USD`.
    pub currency: Option<String>,
    pub logo_url: Option<String>,
    pub banner_url: Option<String>,
    /// Active template id (normalized).
    pub template: String,
    pub hero_heading: Option<String>,
    pub hero_subtitle: Option<String>,
    pub hero_button_text: Option<String>,
    pub accent_color: Option<String>,
    pub hero_media: Option<String>,
    /// Comma-joined image list; normalized on write.
    pub gallery_images: Option<String>,
    /// Tenant-global JSON settings (lowest merge precedence).
    pub settings: JsonValue,
    /// Extra JSON settings for the *active* template only.
    pub template_settings: JsonValue,
    /// Map: normalized template id -> full snapshot of scoped fields.
    pub template_settings_by_template: JsonValue,
    /// Map: normalized template id -> layout `ConfigDocument`.
    pub layout_by_template: JsonValue,
}

impl SettingsRow {
    /// A freshly provisioned row: default template, empty blobs.
    #[must_use]
    pub fn provision(tenant_id: TenantId, slug: String) -> Self {
        Self {
            tenant_id,
            slug,
            store_name: None,
            currency: None,
            logo_url: None,
            banner_url: None,
            template: DEFAULT_TEMPLATE.to_string(),
            hero_heading: None,
            hero_subtitle: None,
            hero_button_text: None,
            accent_color: None,
            hero_media: None,
            gallery_images: None,
            settings: JsonValue::Object(Map::new()),
            template_settings: JsonValue::Object(Map::new()),
            template_settings_by_template: JsonValue::Object(Map::new()),
            layout_by_template: JsonValue::Object(Map::new()),
        }
    }

    /// The active template as a normalized [`TemplateId`].
    #[must_use]
    pub fn template_id(&self) -> TemplateId {
        TemplateId::new(&self.template)
    }

    /// Read a scalar column by name. Unknown names yield `None`.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&str> {
        let value = match name {
            "store_name" => &self.store_name,
            "currency" => &self.currency,
            "logo_url" => &self.logo_url,
            "banner_url" => &self.banner_url,
            "hero_heading" => &self.hero_heading,
            "hero_subtitle" => &self.hero_subtitle,
            "hero_button_text" => &self.hero_button_text,
            "accent_color" => &self.accent_color,
            "hero_media" => &self.hero_media,
            "gallery_images" => &self.gallery_images,
            _ => return None,
        };
        value.as_deref()
    }

    /// Write a scalar column by name. Unknown names are ignored.
    pub fn set_column(&mut self, name: &str, value: Option<String>) {
        match name {
            "store_name" => self.store_name = value,
            "currency" => self.currency = value,
            "logo_url" => self.logo_url = value,
            "banner_url" => self.banner_url = value,
            "hero_heading" => self.hero_heading = value,
            "hero_subtitle" => self.hero_subtitle = value,
            "hero_button_text" => self.hero_button_text = value,
            "accent_color" => self.accent_color = value,
            "hero_media" => self.hero_media = value,
            "gallery_images" => self.gallery_images = value,
            _ => {}
        }
    }

    /// The active template's extra settings as an object map.
    ///
    /// A non-object blob (corrupt row) degrades to an empty map rather than
    /// erroring; rendering must never break on a bad document.
    #[must_use]
    pub fn template_settings_map(&self) -> Map<String, JsonValue> {
        self.template_settings
            .as_object()
            .cloned()
            .unwrap_or_default()
    }

    /// The snapshot map as an object map, degrading like
    /// [`Self::template_settings_map`].
    #[must_use]
    pub fn snapshot_map(&self) -> Map<String, JsonValue> {
        self.template_settings_by_template
            .as_object()
            .cloned()
            .unwrap_or_default()
    }
}
