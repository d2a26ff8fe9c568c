//! Integration tests for command dispatch and configuration resolution.

use clap::Parser;
use std::io::Cursor;
use stockval_cli::{execute, resolve_config, Cli};
use stockval_core::ValuationAnalyzer;
use test_case::test_case;

// ============================================================================
// Test Utilities
// ============================================================================

fn run(args: &[&str], stdin: &str) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(args)?;
    let analyzer = ValuationAnalyzer::default();
    let mut input = Cursor::new(stdin.as_bytes().to_vec());
    let mut out = Vec::new();
    execute(&cli.command, &analyzer, cli.json, &mut input, &mut out)?;
    Ok(String::from_utf8(out)?)
}

// ============================================================================
// Commands
// ============================================================================

#[test]
fn analyze_prints_text_report() {
    let output = run(
        &[
            "stockval", "analyze", "--price", "200", "--eps", "5", "--bvps", "25", "--growth", "10",
            "--historical-per", "25", "--industry-per", "22", "--historical-pbv", "4",
            "--industry-pbv", "3.5",
        ],
        "",
    )
    .unwrap();

    assert!(output.contains("=== STOCK VALUATION ANALYSIS SUMMARY ==="));
    assert!(output.contains("OVERALL VERDICT:\n  Status: Overvalued"));
    assert!(output.contains("Consensus Strength: 100.0%"));
}

#[test]
fn analyze_prints_json_bundle() {
    let output = run(
        &[
            "stockval", "--json", "analyze", "--price", "9250", "--eps", "1150", "--bvps", "4000",
            "--growth", "6", "--historical-per", "8.5", "--industry-per", "9.2",
        ],
        "",
    )
    .unwrap();

    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["per_judgment"]["status"], "fairly_valued");
    assert_eq!(json["per_judgment"]["benchmark_value"], 9.2);
    assert_eq!(json["pbv_judgment"]["status"], "undetermined");
}

#[test]
fn analyze_reports_invalid_price() {
    let err = run(
        &["stockval", "analyze", "--price", "-50", "--eps", "5", "--bvps", "20", "--growth", "10"],
        "",
    )
    .unwrap_err();

    assert!(format!("{err:#}").contains("current_price"));
}

#[test]
fn analyze_reports_insufficient_data() {
    let err = run(
        &["stockval", "analyze", "--price", "100", "--eps", "0", "--bvps", "20", "--growth", "10"],
        "",
    )
    .unwrap_err();

    let err = err
        .downcast_ref::<stockval_core::Error>()
        .expect("engine error");
    assert!(err.is_insufficient_data());
}

#[test]
fn metric_command_evaluates_one_metric() {
    let output = run(
        &[
            "stockval", "metric", "peg", "--price", "100", "--eps", "5", "--bvps", "50", "--growth",
            "20",
        ],
        "",
    )
    .unwrap();

    assert!(output.starts_with("  PEG Ratio:"));
    assert!(output.contains("Status: Fairly Valued"));
    assert!(!output.contains("OVERALL VERDICT"));
}

#[test_case("apple", "Apple Inc. (AAPL)" ; "apple")]
#[test_case("tech", "High-growth tech company" ; "tech")]
#[test_case("value", "Mature value company" ; "value")]
#[test_case("overvalued", "Overhyped stock with high ratios" ; "overvalued")]
#[test_case("zero-growth", "Mature company with no growth" ; "zero growth")]
fn sample_profiles_run(profile: &str, description: &str) {
    let output = run(&["stockval", "sample", "--profile", profile], "").unwrap();

    assert!(output.contains(&format!("Using sample data for {description}")));
    assert!(output.trim_end().ends_with("=== END OF ANALYSIS ==="));
}

#[test]
fn interactive_reads_answers_from_input() {
    let output = run(
        &["stockval", "interactive"],
        "180\n2.5\n8\n5\n45\n25\n15\n12\n",
    )
    .unwrap();

    assert!(output.contains("Current Stock Price ($): "));
    assert!(output.contains("Stock Price: $180.00"));
    assert!(output.contains("OVERALL VERDICT:\n  Status: Overvalued"));
}

#[test]
fn interactive_rejects_non_numeric_answer() {
    let err = run(&["stockval", "interactive"], "a lot\n").unwrap_err();
    assert!(err.to_string().contains("is not a number"));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn flags_override_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"analysis": {"per_tolerance": 0.05, "pbv_tolerance": 0.3}}"#).unwrap();
    let path = path.to_string_lossy().into_owned();

    let cli = Cli::try_parse_from(["stockval", "--config", &path, "--per-tolerance", "0.1", "sample"])
        .unwrap();
    let config = resolve_config(&cli).unwrap();

    assert_eq!(config.analysis.per_tolerance, 0.1);
    assert_eq!(config.analysis.pbv_tolerance, 0.3);
}

#[test]
fn out_of_range_tolerance_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{}").unwrap();
    let path = path.to_string_lossy().into_owned();

    let cli = Cli::try_parse_from(["stockval", "--config", &path, "--pbv-tolerance", "20", "sample"])
        .unwrap();
    let err = resolve_config(&cli).unwrap_err();

    assert!(err.to_string().contains("analysis.pbv_tolerance"));
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json").to_string_lossy().into_owned();

    let cli = Cli::try_parse_from(["stockval", "--config", &path, "sample"]).unwrap();
    assert!(resolve_config(&cli).is_err());
}
