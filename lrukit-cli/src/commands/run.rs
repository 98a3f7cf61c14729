use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

use lrukit_core::colors::DefaultTheme;
use lrukit_core::config::Config;
use lrukit_core::output::OutputFormat;
use lrukit_core::scenario::ScenarioReport;

use crate::output;

pub struct RunOptions {
    pub path: PathBuf,
    pub format: Option<String>,
    pub capacity: Option<usize>,
    pub config: Option<PathBuf>,
    pub fail_fast: bool,
}

/// A single scenario file, or every `*.toml` under a directory, sorted.
pub fn collect_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        anyhow::bail!("{} does not exist", path.display());
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("toml"))
        .collect();
    files.sort();
    Ok(files)
}

pub fn parse_format(s: &str) -> Result<OutputFormat> {
    s.parse::<OutputFormat>().map_err(|e| anyhow::anyhow!(e))
}

pub fn format_report(report: &ScenarioReport, fmt: OutputFormat) -> String {
    match fmt {
        OutputFormat::Json => output::format_json(report),
        OutputFormat::Text => output::format_text(report),
        OutputFormat::Pretty => output::format_pretty(report, &DefaultTheme),
    }
}

/// Print every report in `fmt`, then a summary on stderr for the
/// human-readable formats.  Returns `true` when every step passed.
pub fn emit(reports: &[ScenarioReport], fmt: OutputFormat) -> Result<bool> {
    if fmt == OutputFormat::Json && reports.len() > 1 {
        println!("{}", serde_json::to_string_pretty(reports)?);
    } else {
        for report in reports {
            println!("{}", format_report(report, fmt));
        }
    }
    if fmt != OutputFormat::Json {
        eprintln!("{}", output::format_summary(reports));
    }
    Ok(reports.iter().all(|r| r.is_success()))
}

pub fn run(opts: &RunOptions) -> Result<()> {
    let config = match opts.config {
        Some(ref f) => Config::from_file(f)?,
        None => Config::load(&opts.path),
    };
    log::debug!("using config rooted at {}", config.root.display());

    let fmt = match opts.format {
        Some(ref s) => parse_format(s)?,
        None => config.format,
    };
    let capacity = opts.capacity.unwrap_or(config.capacity);

    let files = collect_files(&opts.path).context("failed to collect scenarios")?;
    if files.is_empty() {
        anyhow::bail!("no scenario files found in {}", opts.path.display());
    }

    let mut reports = Vec::new();
    for file in &files {
        let report = lrukit_core::run_scenario_file(file, capacity)
            .with_context(|| format!("failed to run {}", file.display()))?;
        let ok = report.is_success();
        reports.push(report);
        if opts.fail_fast && !ok {
            log::info!("stopping after first failing scenario");
            break;
        }
    }

    if !emit(&reports, fmt)? {
        std::process::exit(1);
    }
    Ok(())
}
