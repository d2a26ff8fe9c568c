//! Interactive collection of stock inputs.
//!
//! Reads answers line by line from any `BufRead`, so the same code drives
//! both the terminal and tests.

use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};
use stockval_core::StockInputs;

/// Prompt for one value and return the trimmed answer, or `None` at end of
/// input.
fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<Option<String>> {
    write!(out, "{label}: ")?;
    out.flush()?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .with_context(|| format!("Failed to read {label}"))?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn parse_number(label: &str, raw: &str) -> Result<f64> {
    raw.parse::<f64>()
        .with_context(|| format!("Invalid input for {label}: '{raw}' is not a number"))
}

fn ask_required<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<f64> {
    match ask(input, out, label)? {
        Some(raw) if !raw.is_empty() => parse_number(label, &raw),
        Some(_) => bail!("{label} is required"),
        None => bail!("Input ended before {label} was entered"),
    }
}

/// Empty answers and end of input both mean "not supplied".
fn ask_optional<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
) -> Result<Option<f64>> {
    match ask(input, out, label)? {
        Some(raw) if !raw.is_empty() => parse_number(label, &raw).map(Some),
        _ => Ok(None),
    }
}

/// Ask for the four fundamentals and the four optional benchmarks.
pub fn read_stock_inputs<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<StockInputs> {
    writeln!(out, "=== STOCK VALUATION ANALYZER ===")?;
    writeln!(out, "Please enter the following stock information:")?;
    writeln!(out)?;

    let current_price = ask_required(input, out, "Current Stock Price ($)")?;
    let eps = ask_required(input, out, "Earnings Per Share (EPS) ($)")?;
    let bvps = ask_required(input, out, "Book Value Per Share (BVPS) ($)")?;
    let eps_growth = ask_required(input, out, "EPS Growth Rate (%)")?;

    writeln!(out)?;
    writeln!(out, "Benchmark Information (press Enter to skip):")?;
    let historical_per = ask_optional(input, out, "Historical P/E Ratio")?;
    let industry_per = ask_optional(input, out, "Industry Average P/E Ratio")?;
    let historical_pbv = ask_optional(input, out, "Historical P/B Ratio")?;
    let industry_pbv = ask_optional(input, out, "Industry Average P/B Ratio")?;

    let mut inputs = StockInputs::new(current_price, eps, bvps, eps_growth);
    inputs.historical_per = historical_per;
    inputs.industry_per = industry_per;
    inputs.historical_pbv = historical_pbv;
    inputs.industry_pbv = industry_pbv;
    Ok(inputs)
}
