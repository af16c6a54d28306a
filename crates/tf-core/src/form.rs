//! Form state holder: the live values of every field on one tool page.

use crate::request::GenerationRequest;
use crate::schema::{FieldKind, ToolSchema};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A field value. Single-select ids and free text are both strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    List(Vec<String>),
    Str(String),
}

impl FieldValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Flag(_) => "toggle",
            Self::List(_) => "multi",
            Self::Str(_) => "text",
        }
    }

    fn fits(&self, kind: &FieldKind) -> bool {
        matches!(
            (self, kind),
            (Self::Str(_), FieldKind::Text { .. } | FieldKind::Choice { .. })
                | (Self::Flag(_), FieldKind::Toggle { .. })
                | (Self::List(_), FieldKind::MultiChoice { .. })
        )
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(v: Vec<&str>) -> Self {
        Self::List(v.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(v: Vec<String>) -> Self {
        Self::List(v)
    }
}

/// Errors from mutating a form. These are caller bugs, not user input errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("tool '{tool}' has no field '{field}'")]
    UnknownField { tool: String, field: String },
    #[error("field '{field}' expects a {expected} value, got {found}")]
    KindMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("request targets tool '{found}', expected '{expected}'")]
    ToolMismatch { expected: String, found: String },
    #[error("field '{field}' cannot parse '{value}' as a {expected} value")]
    InvalidValue {
        field: String,
        value: String,
        expected: &'static str,
    },
}

/// Current values of every field for one tool instance.
///
/// Created from the schema's defaults and only changed through
/// [`FormState::set_field`] and [`FormState::toggle_option`].
#[derive(Debug, Clone)]
pub struct FormState {
    schema: &'static ToolSchema,
    values: BTreeMap<String, FieldValue>,
}

impl FormState {
    pub fn new(schema: &'static ToolSchema) -> Self {
        Self {
            schema,
            values: schema.initial_values(),
        }
    }

    /// Rebuild a form from a request snapshot. Fields missing from the request
    /// keep their defaults.
    pub fn from_request(
        schema: &'static ToolSchema,
        request: &GenerationRequest,
    ) -> Result<Self, FormError> {
        if request.tool != schema.id {
            return Err(FormError::ToolMismatch {
                expected: schema.id.to_string(),
                found: request.tool.clone(),
            });
        }
        let mut form = Self::new(schema);
        for (name, value) in &request.fields {
            form.set_field(name, value.clone())?;
        }
        Ok(form)
    }

    pub fn tool(&self) -> &'static str {
        self.schema.id
    }

    pub fn schema(&self) -> &'static ToolSchema {
        self.schema
    }

    /// Replace a field's value. Multi-select lists are de-duplicated, keeping
    /// the first occurrence of each id.
    pub fn set_field(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<(), FormError> {
        let spec = self
            .schema
            .field(name)
            .ok_or_else(|| FormError::UnknownField {
                tool: self.schema.id.to_string(),
                field: name.to_string(),
            })?;
        let value = value.into();
        if !value.fits(&spec.kind) {
            return Err(FormError::KindMismatch {
                field: name.to_string(),
                expected: spec.kind.name(),
                found: value.kind_name(),
            });
        }
        let value = match value {
            FieldValue::List(ids) => FieldValue::List(dedup_in_order(ids)),
            other => other,
        };
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Flip membership of `id` in a multi-select field. Returns whether `id` is
    /// now selected. New ids are appended, so click order is preserved.
    pub fn toggle_option(&mut self, name: &str, id: &str) -> Result<bool, FormError> {
        let spec = self
            .schema
            .field(name)
            .ok_or_else(|| FormError::UnknownField {
                tool: self.schema.id.to_string(),
                field: name.to_string(),
            })?;
        if !matches!(spec.kind, FieldKind::MultiChoice { .. }) {
            return Err(FormError::KindMismatch {
                field: name.to_string(),
                expected: spec.kind.name(),
                found: "multi",
            });
        }
        let entry = self
            .values
            .entry(name.to_string())
            .or_insert_with(|| FieldValue::List(Vec::new()));
        let FieldValue::List(ids) = entry else {
            *entry = FieldValue::List(vec![id.to_string()]);
            return Ok(true);
        };
        if let Some(pos) = ids.iter().position(|x| x == id) {
            ids.remove(pos);
            Ok(false)
        } else {
            ids.push(id.to_string());
            Ok(true)
        }
    }

    /// Set a field from text: comma-separated ids for multi-select, a boolean
    /// word (`true`/`false`, `yes`/`no`, `on`/`off`, `1`/`0`) for toggles, the raw
    /// string for text and single-select fields.
    pub fn set_from_str(&mut self, name: &str, raw: &str) -> Result<(), FormError> {
        let spec = self
            .schema
            .field(name)
            .ok_or_else(|| FormError::UnknownField {
                tool: self.schema.id.to_string(),
                field: name.to_string(),
            })?;
        let value = match spec.kind {
            FieldKind::Text { .. } | FieldKind::Choice { .. } => FieldValue::Str(raw.to_string()),
            FieldKind::Toggle { .. } => FieldValue::Flag(parse_flag(raw).ok_or_else(|| {
                FormError::InvalidValue {
                    field: name.to_string(),
                    value: raw.to_string(),
                    expected: "toggle",
                }
            })?),
            FieldKind::MultiChoice { .. } => FieldValue::List(
                raw.split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
        };
        self.set_field(name, value)
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Free text or single-select id. Empty when the field is absent.
    pub fn text(&self, name: &str) -> &str {
        match self.values.get(name) {
            Some(FieldValue::Str(s)) => s,
            _ => "",
        }
    }

    /// Single-select id; same storage as [`FormState::text`].
    pub fn choice(&self, name: &str) -> &str {
        self.text(name)
    }

    pub fn flag(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(FieldValue::Flag(true)))
    }

    pub fn multi(&self, name: &str) -> &[String] {
        match self.values.get(name) {
            Some(FieldValue::List(ids)) => ids,
            _ => &[],
        }
    }

    /// Freeze the current values into an immutable request.
    pub fn snapshot(&self, seed: Option<u64>) -> GenerationRequest {
        GenerationRequest::new(self.schema.id, self.values.clone(), seed)
    }
}

/// Boolean words accepted from the command line and the environment.
pub(crate) fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn dedup_in_order(ids: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}
