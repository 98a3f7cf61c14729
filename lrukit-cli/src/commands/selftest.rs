use anyhow::{Context, Result};

use lrukit_core::config::DEFAULT_CAPACITY;

use crate::commands::run::{emit, parse_format};

/// Replay the built-in scenarios and exit 1 if any step fails.
pub fn run(format: &str) -> Result<()> {
    let fmt = parse_format(format)?;
    let reports =
        lrukit_core::run_builtin(DEFAULT_CAPACITY).context("failed to run built-in scenarios")?;
    if !emit(&reports, fmt)? {
        std::process::exit(1);
    }
    Ok(())
}
