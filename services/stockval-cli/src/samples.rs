//! Built-in demonstration data sets.

use clap::ValueEnum;
use stockval_core::StockInputs;

/// A named sample profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SampleProfile {
    /// Apple Inc. (AAPL) snapshot
    Apple,
    /// High-growth technology company
    Tech,
    /// Mature value company
    Value,
    /// Richly priced stock well above its benchmarks
    Overvalued,
    /// Mature company with no earnings growth
    ZeroGrowth,
}

impl SampleProfile {
    pub const ALL: [SampleProfile; 5] = [
        Self::Apple,
        Self::Tech,
        Self::Value,
        Self::Overvalued,
        Self::ZeroGrowth,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            Self::Apple => "Apple Inc. (AAPL)",
            Self::Tech => "High-growth tech company",
            Self::Value => "Mature value company",
            Self::Overvalued => "Overhyped stock with high ratios",
            Self::ZeroGrowth => "Mature company with no growth",
        }
    }

    /// The profile's inputs, benchmarks included.
    pub fn inputs(&self) -> StockInputs {
        match self {
            Self::Apple => StockInputs::new(185.50, 6.15, 4.25, 8.5)
                .with_per_benchmarks(28.5, 25.0)
                .with_pbv_benchmarks(42.0, 3.8),
            Self::Tech => StockInputs::new(250.0, 8.5, 15.0, 25.0)
                .with_per_benchmarks(35.0, 30.0)
                .with_pbv_benchmarks(18.0, 15.0),
            Self::Value => StockInputs::new(45.0, 4.2, 28.0, 3.5)
                .with_per_benchmarks(12.0, 14.0)
                .with_pbv_benchmarks(1.8, 2.2),
            Self::Overvalued => StockInputs::new(180.0, 2.5, 8.0, 5.0)
                .with_per_benchmarks(45.0, 25.0)
                .with_pbv_benchmarks(15.0, 12.0),
            Self::ZeroGrowth => StockInputs::new(65.0, 5.2, 45.0, 0.0)
                .with_per_benchmarks(15.0, 13.0)
                .with_pbv_benchmarks(1.5, 1.8),
        }
    }
}

impl std::fmt::Display for SampleProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_possible_value() {
            Some(value) => write!(f, "{}", value.get_name()),
            None => write!(f, "{self:?}"),
        }
    }
}
