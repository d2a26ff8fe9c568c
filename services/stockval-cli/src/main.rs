//! `stockval` binary entry point.

use anyhow::{Context, Result};
use clap::Parser;
use stockval_cli::{execute, resolve_config, Cli};
use stockval_common::prelude::init_logging;
use stockval_core::ValuationAnalyzer;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = resolve_config(&cli)?;

    // Initialize logging
    init_logging(
        &config.observability.log_level,
        &config.observability.log_format,
    );

    tracing::debug!(
        per_tolerance = config.analysis.per_tolerance,
        pbv_tolerance = config.analysis.pbv_tolerance,
        "Stockval v{}",
        env!("CARGO_PKG_VERSION")
    );

    let analyzer =
        ValuationAnalyzer::new(config.analysis).context("Invalid analyzer configuration")?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    execute(&cli.command, &analyzer, cli.json, &mut stdin.lock(), &mut stdout.lock())
}
