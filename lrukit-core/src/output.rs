use std::fmt;
use std::str::FromStr;

use crate::scenario::{Outcome, ScenarioReport};

/// Output format for CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pretty,
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pretty" => Ok(OutputFormat::Pretty),
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unknown format: {other} (expected pretty, text, or json)"
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Pretty => "pretty",
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        })
    }
}

/// Format a report as JSON.
pub fn format_json(report: &ScenarioReport) -> String {
    serde_json::to_string_pretty(report).expect("report should be serializable")
}

/// Format a report as plain text (no colors).
pub fn format_text(report: &ScenarioReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("Scenario: {}\n", report.name));
    out.push_str(&format!(
        "Capacity: {} | Steps: {} | Passed: {} | Failed: {}\n",
        report.capacity,
        report.steps.len(),
        report.passed(),
        report.failed()
    ));

    if !report.steps.is_empty() {
        out.push('\n');
        for step in &report.steps {
            out.push_str(&format!("  {:>3}  {}  {}", step.index, step.outcome, step.op));
            if let Some(ref detail) = step.detail {
                out.push_str(&format!(" — {detail}"));
            }
            out.push('\n');
        }
    }

    let s = &report.stats;
    out.push_str(&format!(
        "\nStats: {} hits, {} misses ({:.0}% hit rate), {} inserts, {} updates, {} evictions\n",
        s.hits,
        s.misses,
        s.hit_rate() * 100.0,
        s.inserts,
        s.updates,
        s.evictions
    ));
    let order: Vec<String> = report.final_order.iter().map(|k| k.to_string()).collect();
    out.push_str(&format!("Final order (MRU first): [{}]\n", order.join(", ")));

    out
}

/// One-line tally across several reports, e.g. for the end of a run.
pub fn format_summary(reports: &[ScenarioReport]) -> String {
    let steps: usize = reports.iter().map(|r| r.steps.len()).sum();
    let failed_steps: usize = reports.iter().map(|r| r.failed()).sum();
    let failed: Vec<&str> = reports
        .iter()
        .filter(|r| !r.is_success())
        .map(|r| r.name.as_str())
        .collect();

    let mut out = format!(
        "Results: {} scenarios, {} steps, {} passed, {} failed",
        reports.len(),
        steps,
        steps - failed_steps,
        failed_steps
    );
    if !failed.is_empty() {
        out.push_str(&format!(" (failing: {})", failed.join(", ")));
    }
    out
}

/// `PASS`/`FAIL` for a whole report.
pub fn verdict(report: &ScenarioReport) -> Outcome {
    if report.is_success() {
        Outcome::Pass
    } else {
        Outcome::Fail
    }
}
