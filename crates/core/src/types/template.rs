//! Template identifiers, legacy-alias normalization, and the enabled set.
//!
//! Tenants historically stored template ids in several spellings (a
//! deprecated `gold-` product line and a handful of renamed templates).
//! All comparisons in the engine happen on *normalized* ids, so the alias
//! table is consulted exactly once, at construction time.

use serde::{Deserialize, Serialize};

/// Legacy alias table: old spelling -> current template id.
///
/// Consulted once during [`TemplateId::normalize`]; nothing else in the
/// engine is allowed to string-match template names.
const TEMPLATE_ALIASES: &[(&str, &str)] = &[
    ("shiro-hana", "pro"),
    ("babyos", "kids"),
    ("baby", "kids"),
];

/// Templates tenants may switch to.
///
/// A tenant already *on* a template that has since been removed from this
/// list may keep re-saving it; only switches to new targets are checked.
pub const ENABLED_TEMPLATES: &[&str] = &["pro", "fashion", "beauty", "kids", "minimal"];

/// The template assigned to freshly provisioned tenants.
pub const DEFAULT_TEMPLATE: &str = "pro";

/// A normalized template identifier.
///
/// Construction always normalizes, so two `TemplateId`s compare equal iff
/// they refer to the same template regardless of legacy spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(String);

impl TemplateId {
    /// Create a template id, applying legacy normalization.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(Self::normalize(raw))
    }

    /// Normalize a raw template id.
    ///
    /// Strips the deprecated `gold-` prefix / `-gold` suffix, lowercases,
    /// and maps historical aliases to their current names.
    #[must_use]
    pub fn normalize(raw: &str) -> String {
        let trimmed = raw.trim().to_lowercase();
        let stripped = trimmed
            .strip_prefix("gold-")
            .or_else(|| trimmed.strip_suffix("-gold"))
            .unwrap_or(&trimmed);

        TEMPLATE_ALIASES
            .iter()
            .find(|(alias, _)| *alias == stripped)
            .map_or_else(|| stripped.to_string(), |(_, current)| (*current).to_string())
    }

    /// Get the normalized id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this template is in the enabled set.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        ENABLED_TEMPLATES.contains(&self.0.as_str())
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TemplateId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}
