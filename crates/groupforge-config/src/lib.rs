//! Configuration system for GroupForge.
//!
//! Load editor configuration from TOML or YAML files to control drop
//! strictness, preview debouncing, undo depth, and evaluation options
//! without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use groupforge_config::{EditMode, EditorConfig};
//! use std::time::Duration;
//!
//! let config = EditorConfig::from_toml_str(r#"
//!     mode = "strict"
//!
//!     [preview]
//!     debounce_ms = 150
//!
//!     [history]
//!     max_depth = 50
//! "#).unwrap();
//!
//! assert_eq!(config.mode, EditMode::Strict);
//! assert_eq!(config.preview.debounce(), Duration::from_millis(150));
//! assert_eq!(config.history.max_depth, Some(50));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use groupforge_config::EditorConfig;
//!
//! let config = EditorConfig::load("editor.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default preview debounce in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 120;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main editor configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EditorConfig {
    /// How strictly drops are checked.
    #[serde(default)]
    pub mode: EditMode,

    /// Hover preview configuration.
    #[serde(default)]
    pub preview: PreviewConfig,

    /// Undo/redo configuration.
    #[serde(default)]
    pub history: HistoryConfig,

    /// Compliance evaluation configuration.
    #[serde(default)]
    pub evaluation: EvaluationConfig,
}

impl EditorConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history.max_depth == Some(0) {
            return Err(ConfigError::Invalid(
                "history.max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Sets the edit mode.
    pub fn with_mode(mut self, mode: EditMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the preview debounce in milliseconds.
    pub fn with_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.preview.debounce_ms = debounce_ms;
        self
    }

    /// Limits the number of undo snapshots kept.
    pub fn with_history_depth(mut self, max_depth: usize) -> Self {
        self.history.max_depth = Some(max_depth);
        self
    }

    /// Enables deduplication of assignments before evaluation.
    pub fn with_dedupe_assignments(mut self, dedupe: bool) -> Self {
        self.evaluation.dedupe_assignments = dedupe;
        self
    }
}

/// How strictly the editor checks manual drops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    /// Capacity and immovable violations block the drop.
    Strict,

    /// Violations are allowed and reported as warnings.
    #[default]
    Warn,

    /// Violations are allowed.
    Free,
}

impl EditMode {
    /// Returns true if soft checks should block a drop.
    pub fn is_strict(self) -> bool {
        self == EditMode::Strict
    }
}

/// Hover preview configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PreviewConfig {
    /// Minimum quiet period after a hover before scoring is requested.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl PreviewConfig {
    /// Returns the debounce as a Duration.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

/// Undo/redo configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HistoryConfig {
    /// Maximum undo snapshots kept; `None` keeps all.
    pub max_depth: Option<usize>,
}

/// Compliance evaluation configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EvaluationConfig {
    /// Keep only the last assignment per person and session before indexing.
    #[serde(default)]
    pub dedupe_assignments: bool,
}

#[cfg(test)]
mod tests;
