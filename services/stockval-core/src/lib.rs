//! Stockval Core - metric evaluation and verdict aggregation for stock valuation.
//!
//! Turns a point-in-time snapshot of fundamentals into a qualitative verdict
//! (undervalued / fairly valued / overvalued) with a reasoned explanation.
//!
//! # Pipeline
//!
//! ```text
//! StockInputs ──validate──▶ InputRecord ──┬─▶ evaluate_per ─┐
//!                                         ├─▶ evaluate_pbv ─┼─▶ aggregate ─▶ OverallVerdict
//!                                         └─▶ evaluate_peg ─┘
//! ```
//!
//! # Usage
//!
//! ```
//! use stockval_core::{InputRecord, StockInputs, ValuationAnalyzer, ValuationStatus};
//!
//! let record = InputRecord::new(
//!     StockInputs::new(180.0, 2.5, 8.0, 5.0)
//!         .with_per_benchmarks(45.0, 25.0)
//!         .with_pbv_benchmarks(15.0, 12.0),
//! )?;
//!
//! let bundle = ValuationAnalyzer::default().analyze(&record)?;
//! assert_eq!(record.pe_ratio(), Some(72.0));
//! assert_eq!(bundle.overall_verdict.status, ValuationStatus::Overvalued);
//! # Ok::<(), stockval_core::Error>(())
//! ```

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod analyzer;
pub mod error;
pub mod input;
pub mod metrics;
pub mod types;
pub mod verdict;

pub use analyzer::{AnalysisBundle, AnalyzerConfig, ValuationAnalyzer};
pub use error::{Error, Result};
pub use input::{CurrentRatios, InputRecord, StockInputs};
pub use metrics::{evaluate_pbv, evaluate_peg, evaluate_per};
pub use types::{Confidence, Metric, MetricJudgment, OverallVerdict, ValuationStatus};
pub use verdict::aggregate;
