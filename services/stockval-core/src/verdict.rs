//! Verdict Aggregator.
//!
//! Combines per-metric judgments into one overall verdict by
//! confidence-weighted voting.

use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{Confidence, MetricJudgment, OverallVerdict, ValuationStatus};

/// Consensus (percent) at or above which a multi-metric verdict is High.
pub const HIGH_CONSENSUS_PCT: f64 = 80.0;

/// Consensus (percent) at or above which a verdict is Moderate.
pub const MODERATE_CONSENSUS_PCT: f64 = 50.0;

/// Vote tally for one status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    weight: u32,
    votes: u32,
}

impl Tally {
    fn add(&mut self, confidence: Confidence) {
        self.weight += confidence.weight();
        self.votes += 1;
    }
}

#[derive(Debug, Default)]
struct Ballot {
    undervalued: Tally,
    fairly_valued: Tally,
    overvalued: Tally,
}

impl Ballot {
    fn cast(&mut self, judgment: &MetricJudgment) {
        match judgment.status {
            ValuationStatus::Undervalued => self.undervalued.add(judgment.confidence),
            ValuationStatus::FairlyValued => self.fairly_valued.add(judgment.confidence),
            ValuationStatus::Overvalued => self.overvalued.add(judgment.confidence),
            ValuationStatus::Undetermined => {}
        }
    }

    fn total_weight(&self) -> u32 {
        self.undervalued.weight + self.fairly_valued.weight + self.overvalued.weight
    }

    fn weight_of(&self, status: ValuationStatus) -> u32 {
        match status {
            ValuationStatus::Undervalued => self.undervalued.weight,
            ValuationStatus::FairlyValued => self.fairly_valued.weight,
            ValuationStatus::Overvalued => self.overvalued.weight,
            ValuationStatus::Undetermined => 0,
        }
    }

    /// Highest weight wins. Fairly valued takes any tie it is part of; a tie
    /// between the extremes goes to the one with more raw votes, and falls
    /// back to fairly valued when that is level too.
    fn winner(&self) -> ValuationStatus {
        let top = self
            .undervalued
            .weight
            .max(self.fairly_valued.weight)
            .max(self.overvalued.weight);

        if self.fairly_valued.weight == top {
            return ValuationStatus::FairlyValued;
        }

        match (self.undervalued.weight == top, self.overvalued.weight == top) {
            (true, false) => ValuationStatus::Undervalued,
            (false, true) => ValuationStatus::Overvalued,
            _ => {
                if self.undervalued.votes > self.overvalued.votes {
                    ValuationStatus::Undervalued
                } else if self.overvalued.votes > self.undervalued.votes {
                    ValuationStatus::Overvalued
                } else {
                    ValuationStatus::FairlyValued
                }
            }
        }
    }
}

/// Aggregate judgments into an overall verdict.
///
/// `Undetermined` judgments do not vote but are kept, in input order, in
/// `contributing_judgments`. Fails with [`Error::InsufficientData`] when no
/// judgment can vote.
pub fn aggregate(judgments: &[MetricJudgment]) -> Result<OverallVerdict> {
    let mut ballot = Ballot::default();
    for judgment in judgments {
        ballot.cast(judgment);
    }

    let voters = judgments.iter().filter(|j| j.is_votable()).count();
    if voters == 0 {
        let reason = if judgments.is_empty() {
            "no metric judgments supplied".to_string()
        } else {
            format!(
                "all metrics undetermined ({})",
                join_metrics(judgments.iter())
            )
        };
        return Err(Error::InsufficientData(reason));
    }

    let status = ballot.winner();
    let total_weight = ballot.total_weight();
    let consensus_strength_pct = f64::from(ballot.weight_of(status)) / f64::from(total_weight) * 100.0;

    let confidence = if consensus_strength_pct >= HIGH_CONSENSUS_PCT && voters >= 2 {
        Confidence::High
    } else if consensus_strength_pct >= MODERATE_CONSENSUS_PCT {
        Confidence::Moderate
    } else {
        Confidence::Low
    };

    let reasoning = generate_reasoning(judgments, status);

    debug!(
        status = %status,
        confidence = %confidence,
        consensus_strength_pct,
        voters,
        "Overall verdict determined"
    );

    Ok(OverallVerdict {
        status,
        confidence,
        consensus_strength_pct,
        reasoning,
        contributing_judgments: judgments.to_vec(),
    })
}

// ============================================================================
// Reasoning
// ============================================================================

fn join_metrics<'a>(judgments: impl Iterator<Item = &'a MetricJudgment>) -> String {
    judgments
        .map(|j| j.metric.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn verb(count: usize) -> &'static str {
    if count == 1 {
        "suggests"
    } else {
        "suggest"
    }
}

fn generate_reasoning(judgments: &[MetricJudgment], status: ValuationStatus) -> String {
    let voting: Vec<&MetricJudgment> = judgments.iter().filter(|j| j.is_votable()).collect();
    let agreeing: Vec<&MetricJudgment> = voting.iter().copied().filter(|j| j.status == status).collect();
    let dissenting: Vec<&MetricJudgment> = voting.iter().copied().filter(|j| j.status != status).collect();
    let excluded: Vec<&MetricJudgment> = judgments.iter().filter(|j| !j.is_votable()).collect();

    let status_text = status.to_string().to_lowercase();

    let mut reasoning = if dissenting.is_empty() {
        if agreeing.len() == 1 {
            format!(
                "Only {} could be evaluated; it suggests {}",
                agreeing[0].metric, status_text
            )
        } else {
            format!(
                "All metrics ({}) consistently suggest {}",
                join_metrics(agreeing.iter().copied()),
                status_text
            )
        }
    } else if agreeing.is_empty() {
        // Extremes tied on weight and votes; fairly valued is the fallback.
        format!(
            "Conflicting signals with no majority: {}; defaulting to {}",
            dissenting
                .iter()
                .map(|j| format!("{} suggests {}", j.metric, j.status.to_string().to_lowercase()))
                .collect::<Vec<_>>()
                .join(", "),
            status_text
        )
    } else {
        let dissent = dissenting
            .iter()
            .map(|j| format!("{} {} {}", j.metric, verb(1), j.status.to_string().to_lowercase()))
            .collect::<Vec<_>>()
            .join(" and ");
        format!(
            "Mixed signals: {} {} {}, while {}",
            join_metrics(agreeing.iter().copied()),
            verb(agreeing.len()),
            status_text,
            dissent
        )
    };

    if !excluded.is_empty() {
        reasoning.push_str(&format!(
            " ({} excluded: undetermined)",
            join_metrics(excluded.iter().copied())
        ));
    }

    reasoning
}

// ============================================================================
// Tests
// ============================================================================
