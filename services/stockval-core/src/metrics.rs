//! Metric Evaluators.
//!
//! P/E and P/B are judged relative to a historical/industry benchmark with a
//! tolerance band. PEG is judged against the fixed parity benchmark of 1.0.
//!
//! # Confidence Bands
//!
//! | Metric  | Low                                        | Moderate              | High                  |
//! |---------|--------------------------------------------|-----------------------|-----------------------|
//! | P/E P/B | fairly valued, `abs(dev) < spread`         | `abs(dev) <= 2 x tol` | `abs(dev) > 2 x tol`  |
//! | PEG     | never                                      | `abs(peg - 1) < 0.5`  | `abs(peg - 1) >= 0.5` |
//!
//! The benchmark spread is the gap between the historical and industry
//! benchmarks as a percentage of the selected one (zero with a single
//! benchmark). Every band depends on `abs(dev)` alone, so confidence never
//! drops as the deviation grows.

use tracing::debug;

use crate::input::InputRecord;
use crate::types::{Confidence, Metric, MetricJudgment, ValuationStatus};

/// Default tolerance for the P/E evaluator (15%).
pub const DEFAULT_PER_TOLERANCE: f64 = 0.15;

/// Default tolerance for the P/B evaluator (20%).
pub const DEFAULT_PBV_TOLERANCE: f64 = 0.20;

/// Deviation beyond this multiple of the tolerance is a strong signal.
pub const STRONG_DEVIATION_MULTIPLE: f64 = 2.0;

/// Fixed PEG benchmark (growth fully priced in).
pub const PEG_BENCHMARK: f64 = 1.0;

/// Half-width of the "fairly valued" band around PEG parity.
pub const PEG_FAIR_BAND: f64 = 0.05;

/// Distance from parity at which a PEG signal is strong.
pub const PEG_STRONG_DEVIATION: f64 = 0.5;

// ============================================================================
// Public Evaluators
// ============================================================================

/// Evaluate the P/E ratio against the more conservative of the supplied
/// historical and industry benchmarks.
pub fn evaluate_per(record: &InputRecord, tolerance: f64) -> MetricJudgment {
    let current = record.pe_ratio();
    let undefined_reason = || {
        format!(
            "Cannot calculate P/E ratio with non-positive earnings per share (EPS = {:.2})",
            record.eps()
        )
    };

    evaluate_relative(
        Metric::Per,
        current,
        record.historical_per(),
        record.industry_per(),
        tolerance,
        undefined_reason,
    )
}

/// Evaluate the P/B ratio against the more conservative of the supplied
/// historical and industry benchmarks.
pub fn evaluate_pbv(record: &InputRecord, tolerance: f64) -> MetricJudgment {
    // Book value is validated positive, so P/B is always defined.
    evaluate_relative(
        Metric::Pbv,
        Some(record.pb_ratio()),
        record.historical_pbv(),
        record.industry_pbv(),
        tolerance,
        String::new,
    )
}

/// Evaluate the PEG ratio against parity.
pub fn evaluate_peg(record: &InputRecord) -> MetricJudgment {
    let Some(peg) = record.peg_ratio() else {
        let reasoning = if record.pe_ratio().is_none() {
            format!(
                "Cannot calculate PEG ratio with non-positive earnings per share (EPS = {:.2})",
                record.eps()
            )
        } else {
            format!(
                "Cannot calculate PEG ratio with zero or negative earnings growth ({}%)",
                record.eps_growth()
            )
        };
        debug!(metric = %Metric::Peg, "PEG ratio undefined");
        return MetricJudgment::undetermined(Metric::Peg, None, Some(PEG_BENCHMARK), reasoning);
    };

    if !peg.is_finite() || peg < 0.0 {
        return MetricJudgment::undetermined(
            Metric::Peg,
            Some(peg),
            Some(PEG_BENCHMARK),
            format!(
                "PEG ratio of {peg:.2} is not meaningful; both P/E and growth must be positive"
            ),
        );
    }

    let distance = peg - PEG_BENCHMARK;
    let deviation_pct = distance / PEG_BENCHMARK * 100.0;

    let status = if peg < PEG_BENCHMARK - PEG_FAIR_BAND {
        ValuationStatus::Undervalued
    } else if peg > PEG_BENCHMARK + PEG_FAIR_BAND {
        ValuationStatus::Overvalued
    } else {
        ValuationStatus::FairlyValued
    };

    let confidence = if distance.abs() >= PEG_STRONG_DEVIATION {
        Confidence::High
    } else {
        Confidence::Moderate
    };

    let reasoning = generate_peg_reasoning(peg, status, confidence);

    debug!(
        metric = %Metric::Peg,
        peg,
        status = %status,
        confidence = %confidence,
        "Metric evaluated"
    );

    MetricJudgment {
        metric: Metric::Peg,
        status,
        confidence,
        current_value: Some(peg),
        benchmark_value: Some(PEG_BENCHMARK),
        deviation_pct: Some(deviation_pct),
        reasoning,
    }
}

// ============================================================================
// Relative (benchmark-driven) Evaluation
// ============================================================================

/// Where the chosen benchmark came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BenchmarkSource {
    Historical,
    Industry,
    Both,
}

impl std::fmt::Display for BenchmarkSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Historical => write!(f, "historical"),
            Self::Industry => write!(f, "industry"),
            Self::Both => write!(f, "historical and industry"),
        }
    }
}

/// Pick the higher benchmark when both are present: it is the bound least
/// favourable to an "undervalued" call.
fn select_benchmark(historical: Option<f64>, industry: Option<f64>) -> Option<(f64, BenchmarkSource)> {
    match (historical, industry) {
        (Some(h), Some(i)) if h > i => Some((h, BenchmarkSource::Historical)),
        (Some(h), Some(i)) if i > h => Some((i, BenchmarkSource::Industry)),
        (Some(h), Some(_)) => Some((h, BenchmarkSource::Both)),
        (Some(h), None) => Some((h, BenchmarkSource::Historical)),
        (None, Some(i)) => Some((i, BenchmarkSource::Industry)),
        (None, None) => None,
    }
}

fn percent_deviation(current: f64, benchmark: f64) -> f64 {
    (current - benchmark) / benchmark * 100.0
}

/// Gap between the two benchmarks as a percentage of the selected one.
fn benchmark_spread_pct(historical: Option<f64>, industry: Option<f64>, benchmark: f64) -> f64 {
    match (historical, industry) {
        (Some(h), Some(i)) => (h - i).abs() / benchmark * 100.0,
        _ => 0.0,
    }
}

fn classify(deviation_pct: f64, band_pct: f64) -> ValuationStatus {
    if deviation_pct < -band_pct {
        ValuationStatus::Undervalued
    } else if deviation_pct > band_pct {
        ValuationStatus::Overvalued
    } else {
        ValuationStatus::FairlyValued
    }
}

fn evaluate_relative(
    metric: Metric,
    current: Option<f64>,
    historical: Option<f64>,
    industry: Option<f64>,
    tolerance: f64,
    undefined_reason: impl FnOnce() -> String,
) -> MetricJudgment {
    let benchmark = select_benchmark(historical, industry);

    let Some(current) = current else {
        debug!(metric = %metric, "Current ratio undefined");
        return MetricJudgment::undetermined(
            metric,
            None,
            benchmark.map(|(value, _)| value),
            undefined_reason(),
        );
    };

    let Some((benchmark, source)) = benchmark else {
        debug!(metric = %metric, "No benchmark supplied");
        return MetricJudgment::undetermined(
            metric,
            Some(current),
            None,
            format!(
                "No {} benchmark supplied (historical or industry); cannot judge {current:.2}",
                metric.short_name()
            ),
        );
    };

    let band_pct = tolerance * 100.0;
    let deviation_pct = percent_deviation(current, benchmark);
    let status = classify(deviation_pct, band_pct);

    // A fair call closer to the benchmark than the benchmarks are to each
    // other says little.
    let spread_pct = benchmark_spread_pct(historical, industry, benchmark);
    let within_spread =
        status == ValuationStatus::FairlyValued && deviation_pct.abs() < spread_pct;

    let confidence = if within_spread {
        Confidence::Low
    } else if deviation_pct.abs() > STRONG_DEVIATION_MULTIPLE * band_pct {
        Confidence::High
    } else {
        Confidence::Moderate
    };

    let mut reasoning = generate_relative_reasoning(
        metric,
        current,
        benchmark,
        source,
        deviation_pct,
        band_pct,
        status,
    );
    if let (true, Some(h), Some(i)) = (within_spread, historical, industry) {
        reasoning.push_str(&format!(
            "; historical ({h:.2}) and industry ({i:.2}) benchmarks differ by {spread_pct:.1}%, more than the deviation"
        ));
    }

    debug!(
        metric = %metric,
        current,
        benchmark,
        deviation_pct,
        status = %status,
        confidence = %confidence,
        "Metric evaluated"
    );

    MetricJudgment {
        metric,
        status,
        confidence,
        current_value: Some(current),
        benchmark_value: Some(benchmark),
        deviation_pct: Some(deviation_pct),
        reasoning,
    }
}

// ============================================================================
// Reasoning
// ============================================================================

/// Format a percentage with at most one decimal, dropping a trailing ".0".
fn format_pct(value: f64) -> String {
    let rounded = format!("{value:.1}");
    rounded.strip_suffix(".0").map(str::to_string).unwrap_or(rounded)
}

fn generate_relative_reasoning(
    metric: Metric,
    current: f64,
    benchmark: f64,
    source: BenchmarkSource,
    deviation_pct: f64,
    band_pct: f64,
    status: ValuationStatus,
) -> String {
    let direction = if deviation_pct < 0.0 { "below" } else { "above" };
    let head = format!(
        "{} ratio is {:.1}% {} benchmark ({:.2} vs {} {:.2})",
        metric.short_name(),
        deviation_pct.abs(),
        direction,
        current,
        source,
        benchmark
    );

    match status {
        ValuationStatus::Undervalued => format!("{head}, suggesting undervaluation"),
        ValuationStatus::Overvalued => format!("{head}, suggesting overvaluation"),
        _ => format!(
            "{head}, within the {}% tolerance band, suggesting fair valuation",
            format_pct(band_pct)
        ),
    }
}

fn generate_peg_reasoning(peg: f64, status: ValuationStatus, confidence: Confidence) -> String {
    let strong = confidence == Confidence::High;
    match (status, strong) {
        (ValuationStatus::Undervalued, true) => format!(
            "PEG ratio of {peg:.2} is significantly below {PEG_BENCHMARK:.1}, suggesting strong undervaluation"
        ),
        (ValuationStatus::Undervalued, false) => format!(
            "PEG ratio of {peg:.2} is below {PEG_BENCHMARK:.1}, suggesting potential undervaluation"
        ),
        (ValuationStatus::Overvalued, true) => format!(
            "PEG ratio of {peg:.2} is significantly above {PEG_BENCHMARK:.1}, suggesting strong overvaluation"
        ),
        (ValuationStatus::Overvalued, false) => format!(
            "PEG ratio of {peg:.2} is above {PEG_BENCHMARK:.1}, suggesting potential overvaluation"
        ),
        _ => format!(
            "PEG ratio of {peg:.2} is within {PEG_FAIR_BAND:.2} of {PEG_BENCHMARK:.1}, suggesting fair valuation"
        ),
    }
}

// ============================================================================
// Tests
// ============================================================================
