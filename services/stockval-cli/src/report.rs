//! Plain-text rendering of analysis results.

use chrono::{DateTime, Utc};
use stockval_core::{AnalysisBundle, MetricJudgment};

fn value_or_na(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.2}"))
}

/// Lines describing one metric judgment, indented under its metric name.
pub fn judgment_lines(judgment: &MetricJudgment) -> Vec<String> {
    let mut lines = vec![
        format!("  {}:", judgment.metric),
        format!("    Status: {}", judgment.status),
        format!("    Confidence: {}", judgment.confidence),
        format!(
            "    Current: {} | Benchmark: {}",
            value_or_na(judgment.current_value),
            value_or_na(judgment.benchmark_value)
        ),
    ];
    if let Some(deviation) = judgment.deviation_pct {
        lines.push(format!("    Deviation: {deviation:+.1}%"));
    }
    lines.push(format!("    Reasoning: {}", judgment.reasoning));
    lines
}

/// Render a single judgment.
pub fn render_judgment(judgment: &MetricJudgment) -> String {
    judgment_lines(judgment).join("\n")
}

/// Render the full analysis summary.
pub fn render_summary(bundle: &AnalysisBundle, generated_at: DateTime<Utc>) -> String {
    let stock = &bundle.stock_info;
    let ratios = &bundle.current_ratios;

    let per_line = match ratios.per {
        Some(per) => format!("  • P/E Ratio: {per:.2}"),
        None => "  • P/E Ratio: N/A (non-positive earnings)".to_string(),
    };
    let peg_line = match ratios.peg {
        Some(peg) => format!("  • PEG Ratio: {peg:.2}"),
        None if ratios.per.is_none() => "  • PEG Ratio: N/A (non-positive earnings)".to_string(),
        None if stock.eps_growth == 0.0 => "  • PEG Ratio: N/A (zero growth)".to_string(),
        None => "  • PEG Ratio: N/A (negative growth)".to_string(),
    };

    let mut lines = vec![
        "=== STOCK VALUATION ANALYSIS SUMMARY ===".to_string(),
        format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S UTC")),
        String::new(),
        format!("Stock Price: ${:.2}", stock.current_price),
        format!("Earnings Per Share: ${:.2}", stock.eps),
        format!("Book Value Per Share: ${:.2}", stock.bvps),
        format!("Earnings Growth Rate: {}%", stock.eps_growth),
        String::new(),
        "CURRENT RATIOS:".to_string(),
        per_line,
        format!("  • P/B Ratio: {:.2}", ratios.pbv),
        peg_line,
        String::new(),
        "INDIVIDUAL METRIC ANALYSIS:".to_string(),
    ];

    for judgment in bundle.judgments() {
        lines.extend(judgment_lines(judgment));
        lines.push(String::new());
    }

    let verdict = &bundle.overall_verdict;
    lines.extend([
        "OVERALL VERDICT:".to_string(),
        format!("  Status: {}", verdict.status),
        format!("  Confidence: {}", verdict.confidence),
        format!("  Consensus Strength: {:.1}%", verdict.consensus_strength_pct),
        format!("  Reasoning: {}", verdict.reasoning),
        String::new(),
        "=== END OF ANALYSIS ===".to_string(),
    ]);

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use stockval_core::{StockInputs, ValuationAnalyzer};

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_summary_sections() {
        let bundle = ValuationAnalyzer::default()
            .quick_analysis(
                StockInputs::new(185.50, 6.15, 4.25, 8.5)
                    .with_per_benchmarks(28.5, 25.0)
                    .with_pbv_benchmarks(42.0, 3.8),
            )
            .unwrap();
        let report = render_summary(&bundle, timestamp());

        assert!(report.starts_with("=== STOCK VALUATION ANALYSIS SUMMARY ===\nGenerated: 2024-03-01 09:30:00 UTC"));
        assert!(report.contains("Stock Price: $185.50"));
        assert!(report.contains("Earnings Growth Rate: 8.5%"));
        assert!(report.contains("  • P/E Ratio: 30.16"));
        assert!(report.contains("  • PEG Ratio: 3.55"));
        assert!(report.contains("    Current: 30.16 | Benchmark: 28.50"));
        assert!(report.contains("    Deviation: +5.8%"));
        assert!(report.contains("  Status: Fairly Valued"));
        assert!(report.contains("  Consensus Strength: 60.0%"));
        assert!(report.ends_with("=== END OF ANALYSIS ==="));
    }

    #[test]
    fn test_summary_marks_missing_peg() {
        let bundle = ValuationAnalyzer::default()
            .quick_analysis(
                StockInputs::new(65.0, 5.2, 45.0, 0.0)
                    .with_per_benchmarks(15.0, 13.0)
                    .with_pbv_benchmarks(1.5, 1.8),
            )
            .unwrap();
        let report = render_summary(&bundle, timestamp());

        assert!(report.contains("  • PEG Ratio: N/A (zero growth)"));
        assert!(report.contains("    Current: N/A | Benchmark: 1.00"));
        assert!(report.contains("    Status: Undetermined"));
    }

    #[test]
    fn test_render_judgment_without_benchmark() {
        let judgment = MetricJudgment::undetermined(
            stockval_core::Metric::Per,
            Some(20.0),
            None,
            "No P/E benchmark supplied",
        );
        let text = render_judgment(&judgment);

        assert!(text.contains("Current: 20.00 | Benchmark: N/A"));
        assert!(!text.contains("Deviation"));
    }
}
