//! Configuration for generation latency, seeding and output.
//!
//! Load order: `.toolforge/config.toml` → environment variables → defaults.

use crate::form::parse_flag;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Top-level toolforge configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolforgeConfig {
    pub generation: GenerationConfig,
    pub output: OutputConfig,
}

/// Fake-latency and flavor settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Multiplier applied to every tool's latency. 0.0 behaves like `skip_latency`.
    pub latency_scale: f64,
    /// Complete generation on the next scheduler turn instead of waiting.
    pub skip_latency: bool,
    /// Fixed seed for decorative numbers. Unset draws from entropy.
    pub seed: Option<u64>,
    /// Tool id -> latency in milliseconds, replacing the tool's built-in value.
    ///
    /// Example:
    /// [generation.latency_ms]
    /// quiz-generator = 500
    pub latency_ms: BTreeMap<String, u64>,
}

/// Output settings for the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Print title, category and description above the result.
    pub show_header: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            latency_scale: 1.0,
            skip_latency: false,
            seed: None,
            latency_ms: BTreeMap::new(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { show_header: true }
    }
}

/// Helper to parse an env var and apply it to a config field.
fn env_override<T: std::str::FromStr>(value: Option<String>, target: &mut T) {
    if let Some(v) = value
        && let Ok(n) = v.trim().parse()
    {
        *target = n;
    }
}

impl ToolforgeConfig {
    /// Load config from `.toolforge/config.toml` in the project root, with env var overrides.
    /// Falls back to defaults if no config file exists.
    pub fn load(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join(".toolforge").join("config.toml");

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };

        // Tool ids are lowercase kebab-case; accept any casing in the file.
        let normalized = std::mem::take(&mut config.generation.latency_ms)
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();
        config.generation.latency_ms = normalized;

        config.apply_env(|var| std::env::var(var).ok());

        config.validate()?;
        Ok(config)
    }

    /// Apply `TOOLFORGE_*` overrides read through `var`. Unparsable values are ignored.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        env_override(
            var("TOOLFORGE_LATENCY_SCALE"),
            &mut self.generation.latency_scale,
        );
        if let Some(skip) = var("TOOLFORGE_SKIP_LATENCY").as_deref().and_then(parse_flag) {
            self.generation.skip_latency = skip;
        }
        if let Some(seed) = var("TOOLFORGE_SEED").and_then(|v| v.trim().parse().ok()) {
            self.generation.seed = Some(seed);
        }
    }

    pub fn validate(&self) -> Result<()> {
        let scale = self.generation.latency_scale;
        if !scale.is_finite() || scale < 0.0 {
            anyhow::bail!("latency_scale ({}) must be a finite, non-negative number", scale);
        }
        Ok(())
    }

    /// Latency to use for a tool, given the tool's built-in value.
    pub fn effective_latency(&self, tool_id: &str, builtin_ms: u64) -> Duration {
        if self.generation.skip_latency {
            return Duration::ZERO;
        }
        let base = self
            .generation
            .latency_ms
            .get(tool_id)
            .copied()
            .unwrap_or(builtin_ms);
        Duration::from_millis((base as f64 * self.generation.latency_scale).round() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ToolforgeConfig::default();
        assert_eq!(config.generation.latency_scale, 1.0);
        assert!(!config.generation.skip_latency);
        assert_eq!(config.generation.seed, None);
        assert!(config.generation.latency_ms.is_empty());
        assert!(config.output.show_header);
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
[generation]
latency_scale = 0.5
seed = 99

[generation.latency_ms]
quiz-generator = 1200

[output]
show_header = false
"#;
        let config: ToolforgeConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.generation.latency_scale, 0.5);
        assert_eq!(config.generation.seed, Some(99));
        assert_eq!(config.generation.latency_ms.get("quiz-generator"), Some(&1200));
        assert!(!config.output.show_header);
        // Defaults for unspecified fields
        assert!(!config.generation.skip_latency);
    }

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn test_env_overrides_apply() {
        let mut config = ToolforgeConfig::default();
        config.apply_env(env_of(&[
            ("TOOLFORGE_LATENCY_SCALE", "0.25"),
            ("TOOLFORGE_SEED", " 7 "),
        ]));
        assert_eq!(config.generation.latency_scale, 0.25);
        assert_eq!(config.generation.seed, Some(7));
        assert_eq!(
            config.effective_latency("quiz-generator", 3000),
            Duration::from_millis(750)
        );
    }

    #[test]
    fn test_env_skip_latency_accepts_flag_words() {
        for word in ["true", "1", "yes", "ON"] {
            let mut config = ToolforgeConfig::default();
            config.apply_env(env_of(&[("TOOLFORGE_SKIP_LATENCY", word)]));
            assert!(config.generation.skip_latency, "{word}");
            assert_eq!(config.effective_latency("quiz-generator", 3000), Duration::ZERO);
        }

        let mut config = ToolforgeConfig::default();
        config.generation.skip_latency = true;
        config.apply_env(env_of(&[("TOOLFORGE_SKIP_LATENCY", "0")]));
        assert!(!config.generation.skip_latency);
    }

    #[test]
    fn test_env_ignores_unparsable_values() {
        let mut config = ToolforgeConfig::default();
        config.generation.seed = Some(3);
        config.apply_env(env_of(&[
            ("TOOLFORGE_LATENCY_SCALE", "fast"),
            ("TOOLFORGE_SKIP_LATENCY", "sometimes"),
            ("TOOLFORGE_SEED", "-1"),
        ]));
        assert_eq!(config.generation.latency_scale, 1.0);
        assert!(!config.generation.skip_latency);
        assert_eq!(config.generation.seed, Some(3));
    }

    #[test]
    fn test_config_load_nonexistent() {
        let config = ToolforgeConfig::load(Path::new("/nonexistent/path")).unwrap();
        assert!(config.output.show_header);
    }

    #[test]
    fn test_load_normalizes_latency_keys_to_lowercase() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join(".toolforge");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("config.toml"),
            r#"
[generation.latency_ms]
Quiz-Generator = 250
"#,
        )
        .unwrap();

        let config = ToolforgeConfig::load(tmp.path()).unwrap();
        assert_eq!(config.generation.latency_ms.get("quiz-generator"), Some(&250));
    }

    #[test]
    fn test_load_rejects_negative_scale() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join(".toolforge");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("config.toml"),
            "[generation]\nlatency_scale = -2.0\n",
        )
        .unwrap();

        let err = ToolforgeConfig::load(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("latency_scale"));
    }

    #[test]
    fn test_effective_latency() {
        let mut config = ToolforgeConfig::default();
        assert_eq!(
            config.effective_latency("quiz-generator", 3000),
            Duration::from_millis(3000)
        );

        config.generation.latency_scale = 0.25;
        config
            .generation
            .latency_ms
            .insert("quiz-generator".to_string(), 1000);
        assert_eq!(
            config.effective_latency("quiz-generator", 3000),
            Duration::from_millis(250)
        );
        assert_eq!(
            config.effective_latency("voice-synthesizer", 4000),
            Duration::from_millis(1000)
        );

        config.generation.skip_latency = true;
        assert_eq!(config.effective_latency("quiz-generator", 3000), Duration::ZERO);
    }
}
