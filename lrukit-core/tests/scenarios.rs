use std::path::{Path, PathBuf};

use lrukit_core::scenario::{Outcome, Scalar, Scenario};
use lrukit_core::ScenarioError;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ── Built-in scenarios ─────────────────────────────────────────────────

#[test]
fn builtin_scenarios_all_pass() {
    init_logging();
    let reports = lrukit_core::run_builtin(128).expect("built-in scenarios should run");
    assert!(!reports.is_empty());
    for report in &reports {
        assert!(
            report.is_success(),
            "{} failed:\n{}",
            report.name,
            lrukit_core::output::format_text(report)
        );
    }
}

#[test]
fn builtin_eviction_scenario_leaves_one_and_three() {
    let reports = lrukit_core::run_builtin(128).unwrap();
    let report = reports
        .iter()
        .find(|r| r.name == "evicts least recently used")
        .expect("scenario present");
    assert_eq!(report.final_order, vec![Scalar::Int(3), Scalar::Int(1)]);
    assert_eq!(report.stats.evictions, 1);
    assert_eq!(report.stats.hits, 2);
    assert_eq!(report.stats.misses, 1);
}

#[test]
fn builtin_update_scenario_keeps_two_and_three() {
    let reports = lrukit_core::run_builtin(128).unwrap();
    let report = reports
        .iter()
        .find(|r| r.name == "update refreshes recency")
        .expect("scenario present");
    assert_eq!(report.final_order, vec![Scalar::Int(3), Scalar::Int(2)]);
    assert_eq!(report.stats.updates, 1);
}

// ── Fixtures on disk ───────────────────────────────────────────────────

#[test]
fn reorder_trace_passes() {
    init_logging();
    let report = lrukit_core::run_scenario_file(&fixture("reorder_trace.toml"), 128).unwrap();
    assert!(report.is_success(), "{}", lrukit_core::output::format_text(&report));
    assert_eq!(report.stats.evictions, 4);
}

#[test]
fn wrong_expectation_is_reported_as_failure() {
    let report = lrukit_core::run_scenario_file(&fixture("wrong_expectation.toml"), 128).unwrap();
    assert_eq!(report.failed(), 1);
    let failing = report
        .steps
        .iter()
        .find(|s| s.outcome == Outcome::Fail)
        .unwrap();
    assert_eq!(failing.index, 4);
    assert_eq!(failing.detail.as_deref(), Some("expected 1, got miss"));
    assert_eq!(
        report.steps[2].detail.as_deref(),
        Some("evicted key 1"),
        "third put should name its victim"
    );
}

#[test]
fn scenario_without_name_or_capacity_uses_defaults() {
    let report = lrukit_core::run_scenario_file(&fixture("no_capacity.toml"), 5).unwrap();
    assert_eq!(report.name, "no_capacity");
    assert_eq!(report.capacity, 5);
    assert!(report.is_success());
}

#[test]
fn missing_file_is_io_error() {
    let err = lrukit_core::run_scenario_file(&fixture("does_not_exist.toml"), 2).unwrap_err();
    assert!(matches!(err, ScenarioError::Io { .. }));
}

#[test]
fn scenario_written_to_tempdir() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tmp.toml");
    std::fs::write(
        &path,
        "name = \"tmp\"\ncapacity = 1\n\n[[step]]\nop = \"put\"\nkey = 1\nvalue = 1\n\n\
         [[step]]\nop = \"contains\"\nkey = 1\nexpect = true\n",
    )
    .unwrap();
    let scenario = Scenario::from_file(&path).unwrap();
    assert_eq!(scenario.steps.len(), 2);
    assert!(scenario.run(8).unwrap().is_success());
}

#[test]
fn zero_capacity_scenario_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("zero.toml");
    std::fs::write(&path, "capacity = 0\n").unwrap();
    let err = lrukit_core::run_scenario_file(&path, 8).unwrap_err();
    assert!(matches!(err, ScenarioError::Cache(_)));
}

#[test]
fn negative_capacity_is_parse_error() {
    let err = Scenario::from_toml("neg", "capacity = -1\n").unwrap_err();
    assert!(matches!(err, ScenarioError::Parse { .. }));
}
