//! Logging setup for the stockval tools.
//!
//! Events go to stderr so that reports written to stdout stay clean.
//! `RUST_LOG`, when set, takes precedence over the configured level.

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::DEFAULT_LOG_LEVEL;
use crate::validation::LOG_LEVELS;

/// Build the filter directives for a base level.
///
/// Accepts the same levels as config validation; anything else falls back
/// to the default level.
pub fn filter_directives(log_level: &str) -> String {
    let level = log_level.trim().to_lowercase();
    if LOG_LEVELS.contains(&level.as_str()) {
        level
    } else {
        DEFAULT_LOG_LEVEL.into()
    }
}

fn build_filter(log_level: &str) -> EnvFilter {
    // Environment variable wins when present
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(filter_directives(log_level))
}

/// Initialize logging with the given configuration.
///
/// # Arguments
///
/// * `log_level` - Base log level (trace, debug, info, warn, error, off)
/// * `log_format` - Output format: "json" for structured JSON, anything else for human-readable
///
/// Calling this more than once is harmless; later calls leave the first
/// subscriber in place.
pub fn init_logging(log_level: &str, log_format: &str) {
    let filter = build_filter(log_level);
    let subscriber = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_span_events(FmtSpan::CLOSE)
            .with_current_span(true)
            .with_target(true)
            .with_file(true)
            .with_line_number(true);
        let _ = subscriber.with(fmt_layer).try_init();
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(true)
            .with_file(false)
            .with_line_number(false);
        let _ = subscriber.with(fmt_layer).try_init();
    }

    tracing::debug!(
        log_level = %log_level,
        log_format = %log_format,
        "Logging initialized"
    );
}
