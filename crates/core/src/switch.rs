//! Template-switch planning.
//!
//! Switching templates is the one operation that touches snapshots for two
//! templates at once: the outgoing template's customizations are captured
//! under its own id, and the target template resumes from its own stored
//! snapshot - optionally with a caller-selected subset of the old
//! template's values carried over (`import` mode).
//!
//! The planner is pure: given the current row and a directive it computes
//! the complete post-switch row. Persistence and layout provisioning live
//! in the builder's service layer.

use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

use crate::merge::TEMPLATE_SWITCH_KEY;
use crate::row::SettingsRow;
use crate::snapshot::{self, SCOPED_FIELDS};
use crate::types::TemplateId;

/// How the target template's starting values are chosen.
///
/// Both modes start from the target's own stored snapshot (or a clean
/// slate if it was never configured) - switching away and back restores
/// what the tenant had. `Import` additionally carries over a caller-listed
/// subset of the outgoing template's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwitchMode {
    /// Nothing carries over from the outgoing template.
    #[default]
    Defaults,
    /// Selected keys are imported from the outgoing template.
    Import,
}

/// A parsed template-switch request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchDirective {
    pub to: TemplateId,
    pub mode: SwitchMode,
    /// Keys carried over from the old snapshot in `Import` mode.
    pub import_keys: Vec<String>,
}

/// Why a switch was rejected. The row is untouched in every case.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SwitchError {
    #[error("template not allowed: {template}")]
    TemplateNotAllowed { template: String },
    #[error("invalid switch directive: {0}")]
    InvalidDirective(String),
}

impl SwitchDirective {
    /// Parse the value of the reserved `template` payload key.
    ///
    /// A bare string switches with `defaults` mode; an object selects the
    /// mode and import keys. Both snake_case and the editor's camelCase
    /// spellings are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`SwitchError::InvalidDirective`] for anything else.
    pub fn parse(value: &JsonValue) -> Result<Self, SwitchError> {
        match value {
            JsonValue::String(to) => Ok(Self {
                to: TemplateId::new(to),
                mode: SwitchMode::Defaults,
                import_keys: Vec::new(),
            }),
            JsonValue::Object(obj) => {
                let to = obj
                    .get("to")
                    .or_else(|| obj.get("toTemplate"))
                    .and_then(JsonValue::as_str)
                    .ok_or_else(|| {
                        SwitchError::InvalidDirective("missing target template".to_string())
                    })?;
                let mode = match obj.get("mode").and_then(JsonValue::as_str) {
                    None | Some("defaults") => SwitchMode::Defaults,
                    Some("import") => SwitchMode::Import,
                    Some(other) => {
                        return Err(SwitchError::InvalidDirective(format!(
                            "unknown mode: {other}"
                        )));
                    }
                };
                let import_keys = obj
                    .get("import_keys")
                    .or_else(|| obj.get("importKeys"))
                    .and_then(JsonValue::as_array)
                    .map(|keys| {
                        keys.iter()
                            .filter_map(JsonValue::as_str)
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default();
                Ok(Self {
                    to: TemplateId::new(to),
                    mode,
                    import_keys,
                })
            }
            _ => Err(SwitchError::InvalidDirective(
                "expected a template id or a switch object".to_string(),
            )),
        }
    }
}

/// Compute the post-switch row.
///
/// 1. The outgoing template's snapshot is captured under its own id.
/// 2. The target's base starts from its own stored snapshot (empty if
///    never configured); `import` mode overlays the listed keys from the
///    outgoing snapshot on top.
/// 3. Scoped columns are set from the base or cleared to NULL - values
///    from the previous template never leak through.
/// 4. The base (minus scoped-column duplicates and any `template` key)
///    becomes the new `template_settings`, and is stored under the target
///    id in the snapshot map.
///
/// # Errors
///
/// Returns [`SwitchError::TemplateNotAllowed`] if the target is outside the
/// enabled set - unless it equals the tenant's current template, so that
/// re-saving the active template never fails on allowlist drift.
pub fn plan_switch(
    row: &SettingsRow,
    directive: &SwitchDirective,
) -> Result<SettingsRow, SwitchError> {
    let current = row.template_id();
    if !directive.to.is_enabled() && directive.to != current {
        return Err(SwitchError::TemplateNotAllowed {
            template: directive.to.as_str().to_string(),
        });
    }

    let old_snapshot = snapshot::build_snapshot(row);
    let map = snapshot::write_snapshot(&row.snapshot_map(), &current, old_snapshot.clone());

    let mut base = snapshot::read_snapshot(&map, &directive.to).unwrap_or_default();
    if directive.mode == SwitchMode::Import {
        // Selective carry-over: only listed keys move, and only if the
        // outgoing template actually had them.
        for key in &directive.import_keys {
            if let Some(value) = old_snapshot.get(key) {
                base.insert(key.clone(), value.clone());
            }
        }
    }

    let mut next = row.clone();
    next.template = directive.to.as_str().to_string();
    for &field in SCOPED_FIELDS {
        let value = base.get(field).and_then(JsonValue::as_str).map(str::to_string);
        next.set_column(field, value);
    }

    let mut extras = base.clone();
    for &field in SCOPED_FIELDS {
        extras.remove(field);
    }
    extras.remove(TEMPLATE_SWITCH_KEY);
    next.template_settings = JsonValue::Object(extras);

    next.template_settings_by_template =
        JsonValue::Object(snapshot::write_snapshot(&map, &directive.to, base));
    Ok(next)
}
