use colored::Colorize;
use lrukit_core::colors::ColorTheme;
use lrukit_core::output::verdict;
use lrukit_core::scenario::ScenarioReport;

pub use lrukit_core::output::{format_json, format_summary, format_text};

/// Format a report with terminal colors, using the supplied [`ColorTheme`].
///
/// Call with `&DefaultTheme` for the standard palette, or a custom
/// implementation for alternative colour schemes.
pub fn format_pretty(report: &ScenarioReport, theme: &dyn ColorTheme) -> String {
    let mut out = String::new();

    let overall = verdict(report);
    out.push_str(&format!(
        "{} {} {}\n",
        "Scenario:".bold(),
        report.name,
        overall.to_string().color(theme.terminal_color(overall)).bold()
    ));
    out.push_str(&format!(
        "{} {} | {} {} | {} {} | {} {}\n",
        "Capacity:".dimmed(),
        report.capacity,
        "Steps:".dimmed(),
        report.steps.len(),
        "Passed:".dimmed(),
        report.passed(),
        "Failed:".dimmed(),
        report.failed(),
    ));

    if !report.steps.is_empty() {
        out.push_str(&format!("\n{}\n", "Steps:".bold()));
        for step in &report.steps {
            let tag = step.outcome.to_string().color(theme.terminal_color(step.outcome));
            out.push_str(&format!(
                "  {} {} {}",
                format!("{:>3}", step.index).dimmed(),
                tag,
                step.op
            ));
            if let Some(ref detail) = step.detail {
                out.push_str(&format!(" — {}", detail.dimmed()));
            }
            out.push('\n');
        }
    }

    let s = &report.stats;
    out.push_str(&format!("\n{}\n", "Stats:".bold()));
    out.push_str(&format!(
        "  hits {} | misses {} | hit rate {:.0}% | inserts {} | updates {} | evictions {}\n",
        s.hits,
        s.misses,
        s.hit_rate() * 100.0,
        s.inserts,
        s.updates,
        s.evictions,
    ));

    let order: Vec<String> = report.final_order.iter().map(|k| k.to_string()).collect();
    out.push_str(&format!(
        "{} [{}]\n",
        "Final order (MRU first):".bold(),
        order.join(", ")
    ));

    out
}
