//! Generation request snapshots and their JSON files.

use crate::form::FieldValue;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const CURRENT_VERSION: &str = "1.0.0";

/// Immutable snapshot of a form at the moment Generate was invoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub version: String,
    pub tool: String,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
    /// Seed for decorative numbers. `None` draws from entropy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl GenerationRequest {
    pub fn new(
        tool: impl Into<String>,
        fields: BTreeMap<String, FieldValue>,
        seed: Option<u64>,
    ) -> Self {
        Self {
            version: CURRENT_VERSION.to_string(),
            tool: tool.into(),
            fields,
            seed,
        }
    }
}

/// Validate a request's schema version.
pub fn validate_version(request: &GenerationRequest) -> Result<()> {
    if request.version != CURRENT_VERSION {
        anyhow::bail!(
            "request version mismatch: expected {}, found {}",
            CURRENT_VERSION,
            request.version
        );
    }
    Ok(())
}

/// Serialize a request to a pretty-printed JSON string.
pub fn to_json(request: &GenerationRequest) -> Result<String> {
    serde_json::to_string_pretty(request).context("failed to serialize request to JSON")
}

/// Deserialize a request from a JSON string.
pub fn from_json(json: &str) -> Result<GenerationRequest> {
    let request: GenerationRequest =
        serde_json::from_str(json).context("failed to deserialize request from JSON")?;
    validate_version(&request)?;
    Ok(request)
}

/// Load a request file from disk.
pub fn load(path: &Path) -> Result<GenerationRequest> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read request from {}", path.display()))?;
    from_json(&json)
}

/// Save a request file, creating parent directories if needed.
pub fn save(path: &Path, request: &GenerationRequest) -> Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
    }
    let json = to_json(request)?;
    fs::write(path, json)
        .with_context(|| format!("failed to write request to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let mut fields = BTreeMap::new();
        fields.insert("difficulty".to_string(), FieldValue::from("hard"));
        fields.insert("includeAnswers".to_string(), FieldValue::from(true));
        fields.insert(
            "questionTypes".to_string(),
            FieldValue::from(vec!["multiple-choice", "true-false"]),
        );
        let request = GenerationRequest::new("quiz-generator", fields, Some(42));

        let value: serde_json::Value = serde_json::from_str(&to_json(&request).unwrap()).unwrap();
        assert_eq!(value["tool"], "quiz-generator");
        assert_eq!(value["fields"]["difficulty"], "hard");
        assert_eq!(value["fields"]["includeAnswers"], true);
        assert_eq!(value["fields"]["questionTypes"][1], "true-false");
        assert_eq!(value["seed"], 42);
    }

    #[test]
    fn test_from_json_rejects_version_mismatch() {
        let json = r#"{"version":"0.1.0","tool":"quiz-generator","fields":{}}"#;
        let err = from_json(json).unwrap_err();
        assert!(err.to_string().contains("version mismatch"));
    }

    #[test]
    fn test_from_json_without_seed_or_fields() {
        let json = r#"{"version":"1.0.0","tool":"voice-synthesizer"}"#;
        let request = from_json(json).unwrap();
        assert!(request.fields.is_empty());
        assert_eq!(request.seed, None);
    }
}
