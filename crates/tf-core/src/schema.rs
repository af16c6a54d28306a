//! Field schemas: which fields a tool page has, their kinds, and their defaults.

use crate::catalog::OptionCatalog;
use crate::form::{FieldValue, FormState};
use serde::Serialize;
use std::collections::BTreeMap;

/// Page category shown by the presentation shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Business,
    Education,
    Productivity,
    Legal,
    Media,
    Data,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Business => write!(f, "Business"),
            Self::Education => write!(f, "Education"),
            Self::Productivity => write!(f, "Productivity"),
            Self::Legal => write!(f, "Legal"),
            Self::Media => write!(f, "Media"),
            Self::Data => write!(f, "Data"),
        }
    }
}

/// The kind of a form field and its initial value.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// Free text. Never validated; may be empty.
    Text {
        default: &'static str,
        placeholder: &'static str,
    },
    /// Single-select tile group backed by a catalog.
    Choice { catalog: &'static OptionCatalog },
    /// Checkbox.
    Toggle { default: bool },
    /// Multi-select chips backed by a catalog. Defaults are in click order.
    MultiChoice {
        catalog: &'static OptionCatalog,
        defaults: &'static [&'static str],
    },
}

impl FieldKind {
    pub fn initial_value(&self) -> FieldValue {
        match self {
            Self::Text { default, .. } => FieldValue::Str((*default).to_string()),
            Self::Choice { catalog } => FieldValue::Str(catalog.default_id.to_string()),
            Self::Toggle { default } => FieldValue::Flag(*default),
            Self::MultiChoice { defaults, .. } => {
                FieldValue::List(defaults.iter().map(|s| (*s).to_string()).collect())
            }
        }
    }

    pub fn catalog(&self) -> Option<&'static OptionCatalog> {
        match self {
            Self::Choice { catalog } | Self::MultiChoice { catalog, .. } => Some(catalog),
            Self::Text { .. } | Self::Toggle { .. } => None,
        }
    }

    /// Short name used in error messages and `describe` output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Choice { .. } => "choice",
            Self::Toggle { .. } => "toggle",
            Self::MultiChoice { .. } => "multi",
        }
    }
}

/// One configurable field on a tool page.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn text(name: &'static str, label: &'static str, placeholder: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Text {
                default: "",
                placeholder,
            },
        }
    }

    pub const fn choice(
        name: &'static str,
        label: &'static str,
        catalog: &'static OptionCatalog,
    ) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Choice { catalog },
        }
    }

    pub const fn toggle(name: &'static str, label: &'static str, default: bool) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Toggle { default },
        }
    }

    pub const fn multi(
        name: &'static str,
        label: &'static str,
        catalog: &'static OptionCatalog,
        defaults: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::MultiChoice { catalog, defaults },
        }
    }
}

/// Static description of one tool page: shell metadata plus its field schema.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ToolSchema {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: Category,
    /// Fixed fake latency before the result is shown.
    pub latency_ms: u64,
    pub fields: &'static [FieldSpec],
}

impl ToolSchema {
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Default value for every field, keyed by field name.
    pub fn initial_values(&self) -> BTreeMap<String, FieldValue> {
        self.fields
            .iter()
            .map(|f| (f.name.to_string(), f.kind.initial_value()))
            .collect()
    }

    /// A fresh form with every field at its default.
    pub fn initial_state(&'static self) -> FormState {
        FormState::new(self)
    }

    /// Check schema invariants: unique field names, valid catalogs, known multi defaults.
    pub fn validate(&self) -> Result<(), String> {
        for (i, field) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(format!(
                    "tool '{}' declares field '{}' twice",
                    self.id, field.name
                ));
            }
            if let Some(catalog) = field.kind.catalog() {
                catalog
                    .validate()
                    .map_err(|e| format!("tool '{}' field '{}': {}", self.id, field.name, e))?;
            }
            if let FieldKind::MultiChoice { catalog, defaults } = field.kind
                && let Some(bad) = defaults.iter().find(|d| !catalog.contains(d))
            {
                return Err(format!(
                    "tool '{}' field '{}' defaults to unknown id '{}'",
                    self.id, field.name, bad
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;

    static TONES: OptionCatalog = OptionCatalog::new(
        "tone",
        &[
            CatalogEntry::new("calm", "Calm", ""),
            CatalogEntry::new("bold", "Bold", ""),
        ],
        "calm",
    );

    static SCHEMA: ToolSchema = ToolSchema {
        id: "demo",
        title: "Demo",
        description: "Demo tool",
        category: Category::Media,
        latency_ms: 100,
        fields: &[
            FieldSpec::text("text", "Text", "Say something"),
            FieldSpec::choice("tone", "Tone", &TONES),
            FieldSpec::toggle("loud", "Loud", true),
            FieldSpec::multi("extras", "Extras", &TONES, &["bold"]),
        ],
    };

    #[test]
    fn test_initial_state_uses_defaults() {
        let form = SCHEMA.initial_state();
        assert_eq!(form.tool(), "demo");
        assert_eq!(SCHEMA.initial_values().len(), 4);
        assert_eq!(form.text("text"), "");
        assert_eq!(form.choice("tone"), "calm");
        assert!(form.flag("loud"));
        assert_eq!(form.multi("extras"), ["bold".to_string()]);
    }

    #[test]
    fn test_field_lookup() {
        assert_eq!(SCHEMA.field("tone").unwrap().kind.name(), "choice");
        assert!(SCHEMA.field("volume").is_none());
        assert!(SCHEMA.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_multi_default() {
        static BAD: ToolSchema = ToolSchema {
            id: "bad",
            title: "Bad",
            description: "",
            category: Category::Data,
            latency_ms: 0,
            fields: &[FieldSpec::multi("extras", "Extras", &TONES, &["shouty"])],
        };
        assert!(BAD.validate().unwrap_err().contains("shouty"));
    }
}
