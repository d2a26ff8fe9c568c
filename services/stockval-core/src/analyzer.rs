//! Valuation Analyzer.
//!
//! Facade that runs the three metric evaluators and the verdict aggregator
//! under one immutable configuration.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::input::{CurrentRatios, InputRecord, StockInputs};
use crate::metrics::{self, DEFAULT_PBV_TOLERANCE, DEFAULT_PER_TOLERANCE};
use crate::types::{Metric, MetricJudgment, OverallVerdict};
use crate::verdict;

/// Valuation analyzer configuration.
///
/// Tolerances are fractions: 0.15 means a 15% band around the benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Tolerance band for the P/E evaluator
    #[serde(default = "default_per_tolerance")]
    pub per_tolerance: f64,
    /// Tolerance band for the P/B evaluator
    #[serde(default = "default_pbv_tolerance")]
    pub pbv_tolerance: f64,
}

fn default_per_tolerance() -> f64 {
    DEFAULT_PER_TOLERANCE
}

fn default_pbv_tolerance() -> f64 {
    DEFAULT_PBV_TOLERANCE
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            per_tolerance: default_per_tolerance(),
            pbv_tolerance: default_pbv_tolerance(),
        }
    }
}

impl AnalyzerConfig {
    /// Check that both tolerances are fractions strictly between 0 and 1.
    pub fn validate(&self) -> Result<()> {
        validate_tolerance("per_tolerance", self.per_tolerance)?;
        validate_tolerance("pbv_tolerance", self.pbv_tolerance)
    }
}

fn validate_tolerance(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "{field} must be a fraction between 0 and 1 (exclusive), got {value}"
        )))
    }
}

/// Full result of analyzing one stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisBundle {
    /// The raw inputs that were analyzed
    pub stock_info: StockInputs,
    /// Ratios derived from the inputs
    pub current_ratios: CurrentRatios,
    pub per_judgment: MetricJudgment,
    pub pbv_judgment: MetricJudgment,
    pub peg_judgment: MetricJudgment,
    /// Aggregated verdict across the three judgments
    pub overall_verdict: OverallVerdict,
}

impl AnalysisBundle {
    /// The individual judgments in evaluation order.
    pub fn judgments(&self) -> [&MetricJudgment; 3] {
        [&self.per_judgment, &self.pbv_judgment, &self.peg_judgment]
    }
}

/// Stock valuation analyzer.
#[derive(Debug, Clone, Default)]
pub struct ValuationAnalyzer {
    config: AnalyzerConfig,
}

impl ValuationAnalyzer {
    /// Create an analyzer, rejecting out-of-range tolerances.
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create with explicit tolerances.
    pub fn with_tolerances(per_tolerance: f64, pbv_tolerance: f64) -> Result<Self> {
        Self::new(AnalyzerConfig {
            per_tolerance,
            pbv_tolerance,
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Evaluate the P/E ratio.
    pub fn evaluate_per(&self, record: &InputRecord) -> MetricJudgment {
        metrics::evaluate_per(record, self.config.per_tolerance)
    }

    /// Evaluate the P/B ratio.
    pub fn evaluate_pbv(&self, record: &InputRecord) -> MetricJudgment {
        metrics::evaluate_pbv(record, self.config.pbv_tolerance)
    }

    /// Evaluate the PEG ratio.
    pub fn evaluate_peg(&self, record: &InputRecord) -> MetricJudgment {
        metrics::evaluate_peg(record)
    }

    /// Evaluate a single metric.
    pub fn evaluate(&self, metric: Metric, record: &InputRecord) -> MetricJudgment {
        match metric {
            Metric::Per => self.evaluate_per(record),
            Metric::Pbv => self.evaluate_pbv(record),
            Metric::Peg => self.evaluate_peg(record),
        }
    }

    /// Run all evaluators and aggregate their judgments.
    pub fn analyze(&self, record: &InputRecord) -> Result<AnalysisBundle> {
        debug!(record = %record, "Analyzing stock");

        let per_judgment = self.evaluate_per(record);
        let pbv_judgment = self.evaluate_pbv(record);
        let peg_judgment = self.evaluate_peg(record);

        let overall_verdict = verdict::aggregate(&[
            per_judgment.clone(),
            pbv_judgment.clone(),
            peg_judgment.clone(),
        ])?;

        info!(
            status = %overall_verdict.status,
            confidence = %overall_verdict.confidence,
            consensus_strength_pct = overall_verdict.consensus_strength_pct,
            "Valuation analysis complete"
        );

        Ok(AnalysisBundle {
            stock_info: record.inputs().clone(),
            current_ratios: record.ratios(),
            per_judgment,
            pbv_judgment,
            peg_judgment,
            overall_verdict,
        })
    }

    /// Validate raw inputs and analyze them in one call.
    pub fn quick_analysis(&self, inputs: StockInputs) -> Result<AnalysisBundle> {
        let record = InputRecord::new(inputs)?;
        self.analyze(&record)
    }
}

// ============================================================================
// Tests
// ============================================================================
