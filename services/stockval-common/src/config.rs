//! Configuration management for the stockval tools.
//!
//! Configuration lives in a single JSON file at `~/.stockval/config.json`.
//! A missing file is not an error: every field has a default.
//!
//! # Configuration Priority
//!
//! 1. Command-line flags (applied by the caller)
//! 2. Environment variables (STOCKVAL_* prefix)
//! 3. Config file values
//! 4. Default values
//!
//! # Environment Variable Mapping
//!
//! - `STOCKVAL_PER_TOLERANCE` → analysis.per_tolerance
//! - `STOCKVAL_PBV_TOLERANCE` → analysis.pbv_tolerance
//! - `STOCKVAL_LOG_LEVEL` → observability.log_level
//! - `STOCKVAL_LOG_FORMAT` → observability.log_format
//!
//! # Example
//!
//! ```json
//! {
//!   "analysis": { "per_tolerance": 0.10, "pbv_tolerance": 0.25 },
//!   "observability": { "log_level": "debug", "log_format": "json" }
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use stockval_core::AnalyzerConfig;

/// Get the configuration directory path.
pub fn config_dir() -> PathBuf {
    directories::UserDirs::new().map_or_else(
        || PathBuf::from(".stockval"),
        |dirs| dirs.home_dir().join(".stockval"),
    )
}

/// Get the configuration file path.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

// ============================================================================
// Sections
// ============================================================================

/// Observability configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level", alias = "level")]
    pub log_level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format", alias = "format")]
    pub log_format: String,
}

/// Log level used when none is configured or the configured one is unknown.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.into()
}

fn default_log_format() -> String {
    "pretty".into()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Evaluator tolerances
    #[serde(default)]
    pub analysis: AnalyzerConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ============================================================================
// Loading
// ============================================================================

impl Config {
    /// Load configuration from the default path, falling back to defaults
    /// when the file does not exist.
    pub fn load() -> Result<Self> {
        let path = config_path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Load from `path` (or the default location) and apply environment
    /// overrides.
    pub fn load_with_env(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable source.
    ///
    /// Unparseable tolerance values are ignored with a warning; range checks
    /// are left to [`Validate`](crate::validation::Validate).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("STOCKVAL_PER_TOLERANCE") {
            match value.trim().parse() {
                Ok(tolerance) => self.analysis.per_tolerance = tolerance,
                Err(_) => tracing::warn!(value = %value, "Ignoring invalid STOCKVAL_PER_TOLERANCE"),
            }
        }
        if let Some(value) = lookup("STOCKVAL_PBV_TOLERANCE") {
            match value.trim().parse() {
                Ok(tolerance) => self.analysis.pbv_tolerance = tolerance,
                Err(_) => tracing::warn!(value = %value, "Ignoring invalid STOCKVAL_PBV_TOLERANCE"),
            }
        }

        if let Some(level) = lookup("STOCKVAL_LOG_LEVEL") {
            self.observability.log_level = level;
        }
        if let Some(format) = lookup("STOCKVAL_LOG_FORMAT") {
            self.observability.log_format = format;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.analysis.per_tolerance, 0.15);
        assert_eq!(config.analysis.pbv_tolerance, 0.20);
        assert_eq!(config.observability.log_level, "warn");
        assert_eq!(config.observability.log_format, "pretty");
    }

    #[test]
    fn test_config_path_is_under_config_dir() {
        assert!(config_path().starts_with(config_dir()));
        assert!(config_path().ends_with("config.json"));
    }

    #[test]
    fn test_load_from_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"analysis": {{"pbv_tolerance": 0.3}}, "observability": {{"level": "debug"}}}}"#)
            .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.analysis.per_tolerance, 0.15);
        assert_eq!(config.analysis.pbv_tolerance, 0.3);
        assert_eq!(config.observability.log_level, "debug");
        assert_eq!(config.observability.log_format, "pretty");
    }

    #[test]
    fn test_load_from_empty_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{}").unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }

    #[test]
    fn test_load_from_malformed_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_overrides_apply() {
        let env = vars(&[
            ("STOCKVAL_PER_TOLERANCE", "0.1"),
            ("STOCKVAL_PBV_TOLERANCE", " 0.25 "),
            ("STOCKVAL_LOG_LEVEL", "trace"),
            ("STOCKVAL_LOG_FORMAT", "json"),
        ]);
        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).cloned());

        assert_eq!(config.analysis.per_tolerance, 0.1);
        assert_eq!(config.analysis.pbv_tolerance, 0.25);
        assert_eq!(config.observability.log_level, "trace");
        assert_eq!(config.observability.log_format, "json");
    }

    #[test]
    fn test_unparseable_override_is_ignored() {
        let env = vars(&[("STOCKVAL_PER_TOLERANCE", "fifteen percent")]);
        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).cloned());

        assert_eq!(config.analysis.per_tolerance, 0.15);
    }
}
