//! Stockval Common - configuration, validation, and logging shared by the
//! stockval tools.
//!
//! This crate provides:
//! - Configuration types and loading (`~/.stockval/config.json`)
//! - Configuration validation
//! - Logging setup

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod config;
pub mod logging;
pub mod validation;

pub use config::{AnalyzerConfig, Config, ObservabilityConfig};
pub use validation::{Validate, ValidationError, ValidationResult};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::logging::init_logging;
    pub use crate::validation::{Validate, ValidationError};
}
