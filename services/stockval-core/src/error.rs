//! Error types for the valuation engine.

use thiserror::Error;

/// Result type alias using the engine error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the valuation engine.
///
/// An `Undetermined` metric is not an error: it is a status carried by the
/// judgment itself. Errors are reserved for inputs the engine cannot work with.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A raw input failed validation while building an input record.
    #[error("Invalid input: {field} = {value}: {reason}")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: String,
    },

    /// No judgment was able to vote on the overall verdict.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Analyzer configuration is out of range.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn invalid_input(field: &'static str, value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            value,
            reason: reason.into(),
        }
    }

    /// Check if this is an input validation error.
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    /// Check if this is an insufficient data error.
    pub const fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData(_))
    }

    /// Check if this is a configuration error.
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Name of the offending input field, if this is a validation error.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidInput { field, .. } => Some(*field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_predicates() {
        let err = Error::invalid_input("current_price", 0.0, "must be greater than zero");
        assert!(err.is_invalid_input());
        assert!(!err.is_config());
        assert_eq!(err.field(), Some("current_price"));

        assert!(Error::InsufficientData("none".into()).is_insufficient_data());
        assert!(Error::Config("bad".into()).is_config());
        assert_eq!(Error::Config("bad".into()).field(), None);
    }

    #[test]
    fn test_error_messages_name_field_and_value() {
        let err = Error::invalid_input("bvps", -2.5, "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "Invalid input: bvps = -2.5: must be greater than zero"
        );
    }
}
