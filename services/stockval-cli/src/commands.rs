//! Command-line surface and command dispatch.

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use stockval_common::prelude::{Config, Validate};
use stockval_core::{AnalysisBundle, InputRecord, Metric, StockInputs, ValuationAnalyzer};

use crate::prompt;
use crate::report;
use crate::samples::SampleProfile;

/// `stockval` - judge whether a stock is undervalued, fairly valued, or overvalued.
#[derive(Parser, Debug)]
#[command(name = "stockval")]
#[command(version)]
#[command(
    about = "Stock valuation from P/E, P/B and PEG ratios.",
    long_about = None
)]
pub struct Cli {
    /// Config file (default: ~/.stockval/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// P/E tolerance band as a fraction (e.g. 0.15)
    #[arg(long, global = true)]
    pub per_tolerance: Option<f64>,

    /// P/B tolerance band as a fraction (e.g. 0.20)
    #[arg(long, global = true)]
    pub pbv_tolerance: Option<f64>,

    /// Print results as JSON instead of a text report
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Fundamentals and benchmarks for one stock.
#[derive(Args, Debug, Clone)]
pub struct StockArgs {
    /// Current share price
    #[arg(long, allow_negative_numbers = true)]
    pub price: f64,

    /// Earnings per share
    #[arg(long, allow_negative_numbers = true)]
    pub eps: f64,

    /// Book value per share
    #[arg(long, allow_negative_numbers = true)]
    pub bvps: f64,

    /// Expected EPS growth in percent (8.5 means 8.5%)
    #[arg(long, allow_negative_numbers = true)]
    pub growth: f64,

    /// Historical average P/E
    #[arg(long)]
    pub historical_per: Option<f64>,

    /// Industry average P/E
    #[arg(long)]
    pub industry_per: Option<f64>,

    /// Historical average P/B
    #[arg(long)]
    pub historical_pbv: Option<f64>,

    /// Industry average P/B
    #[arg(long)]
    pub industry_pbv: Option<f64>,
}

impl From<StockArgs> for StockInputs {
    fn from(args: StockArgs) -> Self {
        let mut inputs = StockInputs::new(args.price, args.eps, args.bvps, args.growth);
        inputs.historical_per = args.historical_per;
        inputs.industry_per = args.industry_per;
        inputs.historical_pbv = args.historical_pbv;
        inputs.industry_pbv = args.industry_pbv;
        inputs
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a stock from command-line values
    Analyze(StockArgs),

    /// Evaluate a single metric
    Metric {
        /// Metric to evaluate (per, pbv, peg)
        metric: Metric,

        #[command(flatten)]
        stock: StockArgs,
    },

    /// Analyze a built-in sample data set
    Sample {
        /// Sample profile to analyze
        #[arg(long, value_enum, default_value_t = SampleProfile::Apple)]
        profile: SampleProfile,
    },

    /// Enter values at interactive prompts
    Interactive,
}

// ============================================================================
// Configuration
// ============================================================================

/// Resolve configuration: file, then environment, then flags.
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load_with_env(cli.config.as_deref())?;

    if let Some(tolerance) = cli.per_tolerance {
        config.analysis.per_tolerance = tolerance;
    }
    if let Some(tolerance) = cli.pbv_tolerance {
        config.analysis.pbv_tolerance = tolerance;
    }

    Validate::validate(&config).map_err(|e| anyhow!("Invalid configuration: {e}"))?;
    Ok(config)
}

// ============================================================================
// Dispatch
// ============================================================================

/// Run one command against `analyzer`, reading prompts from `input` and
/// writing results to `out`.
pub fn execute<R: BufRead, W: Write>(
    command: &Commands,
    analyzer: &ValuationAnalyzer,
    json: bool,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    match command {
        Commands::Analyze(stock) => {
            let bundle = analyzer
                .quick_analysis(stock.clone().into())
                .context("Analysis failed")?;
            emit_bundle(&bundle, json, out)
        }
        Commands::Metric { metric, stock } => {
            let record = InputRecord::new(stock.clone().into()).context("Analysis failed")?;
            let judgment = analyzer.evaluate(*metric, &record);
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&judgment)?)?;
            } else {
                writeln!(out, "{}", report::render_judgment(&judgment))?;
            }
            Ok(())
        }
        Commands::Sample { profile } => {
            tracing::info!(profile = %profile, "Running sample analysis");
            if !json {
                writeln!(out, "=== RUNNING SAMPLE ANALYSIS ===")?;
                writeln!(out, "Using sample data for {}", profile.description())?;
                writeln!(out)?;
            }
            let bundle = analyzer
                .quick_analysis(profile.inputs())
                .context("Analysis failed")?;
            emit_bundle(&bundle, json, out)
        }
        Commands::Interactive => {
            let inputs = prompt::read_stock_inputs(input, out)?;
            writeln!(out)?;
            let bundle = analyzer
                .quick_analysis(inputs)
                .context("Analysis failed; please check your input values and try again")?;
            emit_bundle(&bundle, json, out)
        }
    }
}

fn emit_bundle<W: Write>(bundle: &AnalysisBundle, json: bool, out: &mut W) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(bundle)?)?;
    } else {
        writeln!(out, "{}", report::render_summary(bundle, Utc::now()))?;
    }
    Ok(())
}
