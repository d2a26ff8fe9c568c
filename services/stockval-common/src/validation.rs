//! Configuration validation.
//!
//! Catches out-of-range values before they reach the analyzer or the
//! logging setup.

use thiserror::Error;

use crate::config::{AnalyzerConfig, Config, ObservabilityConfig};

/// Accepted log levels, compared case-insensitively.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Accepted log formats.
pub const LOG_FORMATS: &[&str] = &["json", "pretty"];

/// Configuration validation error.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Multiple validation errors: {0:?}")]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Trait for validatable configuration sections.
pub trait Validate {
    /// Validate this configuration section.
    fn validate(&self) -> ValidationResult<()>;
}

impl Validate for Config {
    fn validate(&self) -> ValidationResult<()> {
        let mut errors: Vec<ValidationError> = [
            Validate::validate(&self.analysis),
            self.observability.validate(),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect();

        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(ValidationError::Multiple(errors)),
        }
    }
}

impl Validate for AnalyzerConfig {
    fn validate(&self) -> ValidationResult<()> {
        check_tolerance("analysis.per_tolerance", self.per_tolerance)?;
        check_tolerance("analysis.pbv_tolerance", self.pbv_tolerance)
    }
}

fn check_tolerance(field: &str, value: f64) -> ValidationResult<()> {
    if value.is_finite() && value > 0.0 && value < 1.0 {
        return Ok(());
    }
    Err(ValidationError::InvalidValue {
        field: field.into(),
        reason: format!("must be a fraction between 0 and 1 (exclusive), got {value}"),
    })
}

impl Validate for ObservabilityConfig {
    fn validate(&self) -> ValidationResult<()> {
        if !LOG_LEVELS.contains(&self.log_level.trim().to_lowercase().as_str()) {
            return Err(ValidationError::InvalidValue {
                field: "observability.log_level".into(),
                reason: format!("must be one of: {}", LOG_LEVELS.join(", ")),
            });
        }

        if !LOG_FORMATS.contains(&self.log_format.trim().to_lowercase().as_str()) {
            return Err(ValidationError::InvalidValue {
                field: "observability.log_format".into(),
                reason: format!("must be one of: {}", LOG_FORMATS.join(", ")),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test_case(0.0 ; "zero")]
    #[test_case(1.0 ; "one")]
    #[test_case(15.0 ; "percent instead of fraction")]
    #[test_case(-0.2 ; "negative")]
    #[test_case(f64::INFINITY ; "infinite")]
    fn test_rejects_bad_tolerance(value: f64) {
        let mut config = Config::default();
        config.analysis.pbv_tolerance = value;

        match config.validate() {
            Err(ValidationError::InvalidValue { field, .. }) => {
                assert_eq!(field, "analysis.pbv_tolerance")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test_case("TRACE", "json" ; "uppercase level")]
    #[test_case("warn", "Pretty" ; "mixed case format")]
    #[test_case("off", "json" ; "logging off")]
    fn test_accepts_log_settings(level: &str, format: &str) {
        let observability = ObservabilityConfig {
            log_level: level.into(),
            log_format: format.into(),
        };
        assert!(observability.validate().is_ok());
    }

    #[test_case("warning" ; "alias")]
    #[test_case("chatty" ; "unknown")]
    fn test_rejects_unknown_log_level(level: &str) {
        let observability = ObservabilityConfig {
            log_level: level.into(),
            log_format: "pretty".into(),
        };
        let err = observability.validate().unwrap_err();
        assert!(err.to_string().contains("observability.log_level"));
    }

    #[test]
    fn test_rejects_unknown_log_format() {
        let observability = ObservabilityConfig {
            log_level: "info".into(),
            log_format: "xml".into(),
        };
        let err = observability.validate().unwrap_err();
        assert!(err.to_string().contains("observability.log_format"));
    }

    #[test]
    fn test_collects_multiple_errors() {
        let mut config = Config::default();
        config.analysis.per_tolerance = 2.0;
        config.observability.log_level = "loud".into();

        match config.validate() {
            Err(ValidationError::Multiple(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
