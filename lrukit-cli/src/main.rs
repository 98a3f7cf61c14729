#![deny(dead_code)]

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};

mod commands;
mod output;

use commands::run::RunOptions;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(
    name = "lrukit",
    about = "Replay get/put scenarios against a fixed-capacity LRU cache",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Scenario file or directory (shorthand for `lrukit run <path>`).
    path: Option<PathBuf>,

    /// Output format: pretty, text, or json (default from `.lrukit`).
    #[arg(long, requires = "path")]
    format: Option<String>,

    /// Capacity for scenarios that do not set one.
    #[arg(long, requires = "path")]
    capacity: Option<usize>,

    /// Explicit config file instead of discovering `.lrukit`.
    #[arg(long, requires = "path")]
    config: Option<PathBuf>,

    /// Stop after the first failing scenario.
    #[arg(long, requires = "path")]
    fail_fast: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Replay scenario files (same as the bare-path form).
    Run(RunArgs),

    /// Replay the built-in reference scenarios.
    Selftest(SelftestArgs),

    /// Show the configuration that applies to a path.
    Config(ConfigArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Scenario file or directory of `*.toml` scenarios.
    path: PathBuf,

    #[arg(long)]
    format: Option<String>,

    #[arg(long)]
    capacity: Option<usize>,

    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    fail_fast: bool,
}

#[derive(Args)]
struct SelftestArgs {
    #[arg(long, default_value = "pretty")]
    format: String,
}

#[derive(Args)]
struct ConfigArgs {
    /// Where to start looking for `.lrukit` (default: current directory).
    path: Option<PathBuf>,
}

impl From<RunArgs> for RunOptions {
    fn from(a: RunArgs) -> Self {
        RunOptions {
            path: a.path,
            format: a.format,
            capacity: a.capacity,
            config: a.config,
            fail_fast: a.fail_fast,
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Command::Run(a)) => commands::run::run(&a.into()),

        Some(Command::Selftest(a)) => commands::selftest::run(&a.format),

        Some(Command::Config(a)) => {
            let start = match a.path {
                Some(p) => p,
                None => std::env::current_dir()?,
            };
            commands::config::run(&start)
        }

        None => match cli.path {
            Some(path) => commands::run::run(&RunOptions {
                path,
                format: cli.format,
                capacity: cli.capacity,
                config: cli.config,
                fail_fast: cli.fail_fast,
            }),
            None => commands::selftest::run("pretty"),
        },
    }
}
