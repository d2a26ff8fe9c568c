//! Valuation Types.
//!
//! Value objects produced by the metric evaluators and the verdict aggregator.

use serde::{Deserialize, Serialize};

// ============================================================================
// Metric Identity
// ============================================================================

/// The valuation metrics the engine knows how to evaluate.
///
/// Declaration order is evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Price-to-Earnings ratio
    Per,
    /// Price-to-Book Value ratio
    Pbv,
    /// Price/Earnings-to-Growth ratio
    Peg,
}

impl Metric {
    /// All metrics in evaluation order.
    pub const ALL: [Metric; 3] = [Metric::Per, Metric::Pbv, Metric::Peg];

    /// Short label used in reasoning strings ("P/E", "P/B", "PEG").
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Per => "P/E",
            Self::Pbv => "P/B",
            Self::Peg => "PEG",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Per => write!(f, "P/E Ratio"),
            Self::Pbv => write!(f, "P/B Ratio"),
            Self::Peg => write!(f, "PEG Ratio"),
        }
    }
}

impl std::str::FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "per" | "pe" | "p/e" => Ok(Self::Per),
            "pbv" | "pb" | "p/b" => Ok(Self::Pbv),
            "peg" => Ok(Self::Peg),
            other => Err(format!("unknown metric '{other}', expected per, pbv or peg")),
        }
    }
}

// ============================================================================
// Status and Confidence
// ============================================================================

/// Valuation status of a single metric or of the overall verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationStatus {
    Undervalued,
    FairlyValued,
    Overvalued,
    /// The metric could not be computed (missing benchmark, non-positive
    /// earnings or growth). Never produced by the aggregator.
    Undetermined,
}

impl ValuationStatus {
    /// Whether a judgment with this status takes part in voting.
    pub const fn is_votable(&self) -> bool {
        !matches!(self, Self::Undetermined)
    }
}

impl std::fmt::Display for ValuationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Undervalued => write!(f, "Undervalued"),
            Self::FairlyValued => write!(f, "Fairly Valued"),
            Self::Overvalued => write!(f, "Overvalued"),
            Self::Undetermined => write!(f, "Undetermined"),
        }
    }
}

/// Confidence of a judgment. Ordered `Low < Moderate < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    Moderate,
    High,
}

impl Confidence {
    /// Voting weight used by the aggregator.
    pub const fn weight(&self) -> u32 {
        match self {
            Self::Low => 1,
            Self::Moderate => 2,
            Self::High => 3,
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Moderate => write!(f, "Moderate"),
            Self::High => write!(f, "High"),
        }
    }
}

// ============================================================================
// Judgments
// ============================================================================

/// Outcome of evaluating one metric against its benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricJudgment {
    /// Which metric was evaluated
    pub metric: Metric,
    /// Valuation status
    pub status: ValuationStatus,
    /// Confidence of the status
    pub confidence: Confidence,
    /// Current ratio (absent when the ratio is undefined)
    pub current_value: Option<f64>,
    /// Benchmark actually compared against (absent when none was supplied)
    pub benchmark_value: Option<f64>,
    /// Signed distance of current from benchmark, in percent
    pub deviation_pct: Option<f64>,
    /// Human-readable explanation
    pub reasoning: String,
}

impl MetricJudgment {
    /// Build an `Undetermined` judgment. Undetermined judgments carry `Low`
    /// confidence and no deviation.
    pub fn undetermined(
        metric: Metric,
        current_value: Option<f64>,
        benchmark_value: Option<f64>,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            metric,
            status: ValuationStatus::Undetermined,
            confidence: Confidence::Low,
            current_value,
            benchmark_value,
            deviation_pct: None,
            reasoning: reasoning.into(),
        }
    }

    /// Whether this judgment takes part in voting.
    pub fn is_votable(&self) -> bool {
        self.status.is_votable()
    }
}

/// Combined verdict across all votable judgments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallVerdict {
    /// Winning status (never `Undetermined`)
    pub status: ValuationStatus,
    /// Confidence derived from consensus strength
    pub confidence: Confidence,
    /// Share of total voting weight held by the winning status (0-100)
    pub consensus_strength_pct: f64,
    /// Which metrics agree and which dissent
    pub reasoning: String,
    /// Every judgment handed to the aggregator, in input order
    pub contributing_judgments: Vec<MetricJudgment>,
}

impl OverallVerdict {
    /// Judgments that actually voted.
    pub fn voting_judgments(&self) -> impl Iterator<Item = &MetricJudgment> {
        self.contributing_judgments.iter().filter(|j| j.is_votable())
    }

    /// Whether every votable judgment agrees with the verdict.
    pub fn is_unanimous(&self) -> bool {
        self.voting_judgments().all(|j| j.status == self.status)
    }
}
