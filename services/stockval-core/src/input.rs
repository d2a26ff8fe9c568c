//! Validated input record.
//!
//! Raw inputs arrive as [`StockInputs`]; [`InputRecord::new`] validates them
//! and computes the derived ratios exactly once.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// P/E benchmarks above this are rejected as unreasonable.
pub const MAX_PER_BENCHMARK: f64 = 1000.0;

/// P/B benchmarks above this are rejected as unreasonable.
pub const MAX_PBV_BENCHMARK: f64 = 100.0;

// ============================================================================
// Raw Inputs
// ============================================================================

/// Raw, unvalidated stock fundamentals as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockInputs {
    /// Current market price per share
    pub current_price: f64,
    /// Earnings per share (annual)
    pub eps: f64,
    /// Book value per share
    pub bvps: f64,
    /// Earnings growth rate in percent (15.5 means 15.5%)
    pub eps_growth: f64,
    /// Historical P/E ratio of the stock
    #[serde(default)]
    pub historical_per: Option<f64>,
    /// Industry average P/E ratio
    #[serde(default)]
    pub industry_per: Option<f64>,
    /// Historical P/B ratio of the stock
    #[serde(default)]
    pub historical_pbv: Option<f64>,
    /// Industry average P/B ratio
    #[serde(default)]
    pub industry_pbv: Option<f64>,
}

impl StockInputs {
    /// Create inputs with no benchmarks supplied.
    pub fn new(current_price: f64, eps: f64, bvps: f64, eps_growth: f64) -> Self {
        Self {
            current_price,
            eps,
            bvps,
            eps_growth,
            historical_per: None,
            industry_per: None,
            historical_pbv: None,
            industry_pbv: None,
        }
    }

    /// Set the historical and industry P/E benchmarks.
    pub fn with_per_benchmarks(mut self, historical: f64, industry: f64) -> Self {
        self.historical_per = Some(historical);
        self.industry_per = Some(industry);
        self
    }

    /// Set the historical and industry P/B benchmarks.
    pub fn with_pbv_benchmarks(mut self, historical: f64, industry: f64) -> Self {
        self.historical_pbv = Some(historical);
        self.industry_pbv = Some(industry);
        self
    }
}

/// Current ratios derived from an input record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentRatios {
    /// Price / EPS, absent when EPS <= 0
    pub per: Option<f64>,
    /// Price / book value per share
    pub pbv: f64,
    /// P/E / growth, absent when P/E is undefined or growth <= 0
    pub peg: Option<f64>,
}

// ============================================================================
// Input Record
// ============================================================================

/// Validated, immutable snapshot of one stock's fundamentals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputRecord {
    inputs: StockInputs,
    ratios: CurrentRatios,
}

impl InputRecord {
    /// Validate raw inputs and compute the derived ratios.
    ///
    /// Non-positive EPS or growth is legal: the dependent ratio is left
    /// undefined and the matching evaluator reports `Undetermined`.
    pub fn new(inputs: StockInputs) -> Result<Self> {
        require_finite("current_price", inputs.current_price)?;
        require_finite("eps", inputs.eps)?;
        require_finite("bvps", inputs.bvps)?;
        require_finite("eps_growth", inputs.eps_growth)?;

        require_positive("current_price", inputs.current_price)?;
        require_positive("bvps", inputs.bvps)?;

        validate_benchmark("historical_per", inputs.historical_per, MAX_PER_BENCHMARK)?;
        validate_benchmark("industry_per", inputs.industry_per, MAX_PER_BENCHMARK)?;
        validate_benchmark("historical_pbv", inputs.historical_pbv, MAX_PBV_BENCHMARK)?;
        validate_benchmark("industry_pbv", inputs.industry_pbv, MAX_PBV_BENCHMARK)?;

        let per = (inputs.eps > 0.0).then(|| inputs.current_price / inputs.eps);
        let pbv = inputs.current_price / inputs.bvps;
        let peg = per.filter(|_| inputs.eps_growth > 0.0).map(|pe| pe / inputs.eps_growth);

        Ok(Self {
            inputs,
            ratios: CurrentRatios { per, pbv, peg },
        })
    }

    /// The raw inputs this record was built from.
    pub fn inputs(&self) -> &StockInputs {
        &self.inputs
    }

    pub fn current_price(&self) -> f64 {
        self.inputs.current_price
    }

    pub fn eps(&self) -> f64 {
        self.inputs.eps
    }

    pub fn bvps(&self) -> f64 {
        self.inputs.bvps
    }

    pub fn eps_growth(&self) -> f64 {
        self.inputs.eps_growth
    }

    pub fn historical_per(&self) -> Option<f64> {
        self.inputs.historical_per
    }

    pub fn industry_per(&self) -> Option<f64> {
        self.inputs.industry_per
    }

    pub fn historical_pbv(&self) -> Option<f64> {
        self.inputs.historical_pbv
    }

    pub fn industry_pbv(&self) -> Option<f64> {
        self.inputs.industry_pbv
    }

    /// All derived ratios.
    pub fn ratios(&self) -> CurrentRatios {
        self.ratios
    }

    /// Current P/E ratio, `None` when EPS <= 0.
    pub fn pe_ratio(&self) -> Option<f64> {
        self.ratios.per
    }

    /// Current P/B ratio.
    pub fn pb_ratio(&self) -> f64 {
        self.ratios.pbv
    }

    /// Current PEG ratio, `None` when P/E is undefined or growth <= 0.
    pub fn peg_ratio(&self) -> Option<f64> {
        self.ratios.peg
    }
}

impl TryFrom<StockInputs> for InputRecord {
    type Error = Error;

    fn try_from(inputs: StockInputs) -> Result<Self> {
        Self::new(inputs)
    }
}

impl std::fmt::Display for InputRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Price: ${:.2}, EPS: ${:.2}, BVPS: ${:.2}, Growth: {}%",
            self.inputs.current_price, self.inputs.eps, self.inputs.bvps, self.inputs.eps_growth
        )
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn require_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::invalid_input(field, value, "must be a finite number"))
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_input(field, value, "must be greater than zero"))
    }
}

fn validate_benchmark(field: &'static str, value: Option<f64>, max: f64) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };

    require_finite(field, value)?;
    require_positive(field, value)?;

    if value > max {
        return Err(Error::invalid_input(
            field,
            value,
            format!("seems unreasonably high (>{max})"),
        ));
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_inputs() -> StockInputs {
        StockInputs::new(185.50, 6.15, 4.25, 8.5)
            .with_per_benchmarks(28.5, 25.0)
            .with_pbv_benchmarks(42.0, 3.8)
    }

    #[test]
    fn test_derived_ratios() {
        let record = InputRecord::new(sample_inputs()).unwrap();

        let pe = record.pe_ratio().unwrap();
        assert!((pe - 30.1626).abs() < 0.001);
        assert!((record.pb_ratio() - 43.647).abs() < 0.001);
        assert!((record.peg_ratio().unwrap() - 3.5485).abs() < 0.001);
    }

    #[test]
    fn test_non_positive_eps_leaves_pe_and_peg_undefined() {
        let record = InputRecord::new(StockInputs::new(100.0, 0.0, 20.0, 10.0)).unwrap();
        assert!(record.pe_ratio().is_none());
        assert!(record.peg_ratio().is_none());
        assert!((record.pb_ratio() - 5.0).abs() < f64::EPSILON);

        let record = InputRecord::new(StockInputs::new(100.0, -3.0, 20.0, 10.0)).unwrap();
        assert!(record.pe_ratio().is_none());
    }

    #[test]
    fn test_non_positive_growth_leaves_peg_undefined() {
        let record = InputRecord::new(StockInputs::new(65.0, 5.2, 45.0, 0.0)).unwrap();
        assert!(record.pe_ratio().is_some());
        assert!(record.peg_ratio().is_none());

        let record = InputRecord::new(StockInputs::new(65.0, 5.2, 45.0, -4.0)).unwrap();
        assert!(record.peg_ratio().is_none());
    }

    #[test]
    fn test_rejects_non_positive_price() {
        let mut inputs = sample_inputs();
        inputs.current_price = 0.0;
        let err = InputRecord::new(inputs).unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(err.field(), Some("current_price"));
    }

    #[test]
    fn test_rejects_non_positive_bvps() {
        let mut inputs = sample_inputs();
        inputs.bvps = -1.0;
        let err = InputRecord::new(inputs).unwrap_err();
        assert_eq!(err.field(), Some("bvps"));
    }

    #[test]
    fn test_rejects_non_positive_benchmarks() {
        let mut inputs = sample_inputs();
        inputs.industry_per = Some(0.0);
        assert_eq!(InputRecord::new(inputs).unwrap_err().field(), Some("industry_per"));

        let mut inputs = sample_inputs();
        inputs.historical_pbv = Some(-2.0);
        assert_eq!(InputRecord::new(inputs).unwrap_err().field(), Some("historical_pbv"));
    }

    #[test]
    fn test_rejects_unreasonable_benchmarks() {
        let mut inputs = sample_inputs();
        inputs.historical_per = Some(1500.0);
        assert_eq!(InputRecord::new(inputs).unwrap_err().field(), Some("historical_per"));

        let mut inputs = sample_inputs();
        inputs.industry_pbv = Some(101.0);
        assert_eq!(InputRecord::new(inputs).unwrap_err().field(), Some("industry_pbv"));
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let mut inputs = sample_inputs();
        inputs.eps = f64::NAN;
        assert_eq!(InputRecord::new(inputs).unwrap_err().field(), Some("eps"));

        let mut inputs = sample_inputs();
        inputs.eps_growth = f64::INFINITY;
        assert_eq!(InputRecord::new(inputs).unwrap_err().field(), Some("eps_growth"));
    }

    #[test]
    fn test_omitted_benchmarks_are_accepted() {
        let record = InputRecord::new(StockInputs::new(50.0, 2.0, 10.0, 5.0)).unwrap();
        assert!(record.historical_per().is_none());
        assert!(record.industry_pbv().is_none());
    }

    #[test]
    fn test_display() {
        let record = InputRecord::new(StockInputs::new(50.0, 2.0, 10.0, 5.0)).unwrap();
        assert_eq!(
            record.to_string(),
            "Price: $50.00, EPS: $2.00, BVPS: $10.00, Growth: 5%"
        );
    }
}
