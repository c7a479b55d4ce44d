use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Tuning constants for classification, routing, and execution gating.
/// The numeric defaults are carried-over behavior, not derived values;
/// changing them changes which messages auto-execute.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Minimum confidence before the executor is allowed to mutate state.
    pub execution_threshold: f32,
    /// Constant confidence assigned to any regex pattern match.
    pub regex_confidence: f32,
    /// Keyword fallback scoring: `base + step * matches`, capped.
    pub keyword_base: f32,
    pub keyword_step: f32,
    pub keyword_cap: f32,
    /// Router confidence when no persona keyword matched at all.
    pub router_fallback_confidence: f32,
    /// Name the assistant answers to; used by owner extraction.
    pub assistant_name: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            execution_threshold: 0.7,
            regex_confidence: 0.9,
            keyword_base: 0.5,
            keyword_step: 0.15,
            keyword_cap: 0.75,
            router_fallback_confidence: 0.5,
            assistant_name: "cofounder".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl EngineConfig {
    /// Defaults, patched by an optional TOML file, patched by `COFOUNDER_*`
    /// environment variables, then validated.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.filter(|path| path.exists()) {
            let patch = read_patch(path)?;
            config.apply_patch(patch);
        }

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(execution_threshold) = patch.execution_threshold {
            self.execution_threshold = execution_threshold;
        }
        if let Some(regex_confidence) = patch.regex_confidence {
            self.regex_confidence = regex_confidence;
        }
        if let Some(keyword_base) = patch.keyword_base {
            self.keyword_base = keyword_base;
        }
        if let Some(keyword_step) = patch.keyword_step {
            self.keyword_step = keyword_step;
        }
        if let Some(keyword_cap) = patch.keyword_cap {
            self.keyword_cap = keyword_cap;
        }
        if let Some(router_fallback_confidence) = patch.router_fallback_confidence {
            self.router_fallback_confidence = router_fallback_confidence;
        }
        if let Some(assistant_name) = patch.assistant_name {
            self.assistant_name = assistant_name;
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("COFOUNDER_EXECUTION_THRESHOLD") {
            self.execution_threshold = parse_f32("COFOUNDER_EXECUTION_THRESHOLD", &value)?;
        }
        if let Some(value) = read_env("COFOUNDER_REGEX_CONFIDENCE") {
            self.regex_confidence = parse_f32("COFOUNDER_REGEX_CONFIDENCE", &value)?;
        }
        if let Some(value) = read_env("COFOUNDER_KEYWORD_BASE") {
            self.keyword_base = parse_f32("COFOUNDER_KEYWORD_BASE", &value)?;
        }
        if let Some(value) = read_env("COFOUNDER_KEYWORD_STEP") {
            self.keyword_step = parse_f32("COFOUNDER_KEYWORD_STEP", &value)?;
        }
        if let Some(value) = read_env("COFOUNDER_KEYWORD_CAP") {
            self.keyword_cap = parse_f32("COFOUNDER_KEYWORD_CAP", &value)?;
        }
        if let Some(value) = read_env("COFOUNDER_ROUTER_FALLBACK_CONFIDENCE") {
            self.router_fallback_confidence =
                parse_f32("COFOUNDER_ROUTER_FALLBACK_CONFIDENCE", &value)?;
        }
        if let Some(value) = read_env("COFOUNDER_ASSISTANT_NAME") {
            self.assistant_name = value;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("execution_threshold", self.execution_threshold),
            ("regex_confidence", self.regex_confidence),
            ("keyword_base", self.keyword_base),
            ("keyword_step", self.keyword_step),
            ("keyword_cap", self.keyword_cap),
            ("router_fallback_confidence", self.router_fallback_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Validation(format!(
                    "{name} must be in range 0.0..=1.0, got {value}"
                )));
            }
        }

        if self.keyword_cap < self.keyword_base {
            return Err(ConfigError::Validation(
                "keyword_cap must not be below keyword_base".to_string(),
            ));
        }

        if self.assistant_name.trim().is_empty() {
            return Err(ConfigError::Validation("assistant_name must not be empty".to_string()));
        }

        Ok(())
    }
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;
    toml::from_str::<ConfigPatch>(&raw)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_f32(key: &str, value: &str) -> Result<f32, ConfigError> {
    value.parse::<f32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    execution_threshold: Option<f32>,
    regex_confidence: Option<f32>,
    keyword_base: Option<f32>,
    keyword_step: Option<f32>,
    keyword_cap: Option<f32>,
    router_fallback_confidence: Option<f32>,
    assistant_name: Option<String>,
}
