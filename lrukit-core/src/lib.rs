#![deny(dead_code)]

//! A fixed-capacity least-recently-used cache.
//!
//! [`LruCache`] pairs a [`recency::RecencyList`] (an index-linked arena that
//! keeps entries in most- to least-recently-used order) with an
//! [`index::KeyIndex`] (key to slot handle), giving O(1) `get` and `put`.
//! The [`scenario`] module replays scripted `get`/`put` sequences against
//! the cache and checks the outcomes.

pub mod cache;
pub mod colors;
pub mod config;
pub mod entry;
pub mod error;
pub mod index;
pub mod output;
pub mod recency;
pub mod scenario;
pub mod stats;

pub use cache::LruCache;
pub use error::{CacheError, ScenarioError};
pub use stats::CacheStats;

use std::path::Path;

use scenario::{Scenario, ScenarioReport};

/// Load and replay a single scenario file.
///
/// `default_capacity` applies when the file does not set `capacity`.
pub fn run_scenario_file(
    path: &Path,
    default_capacity: usize,
) -> Result<ScenarioReport, ScenarioError> {
    Scenario::from_file(path)?.run(default_capacity)
}

/// Replay every built-in scenario.
pub fn run_builtin(default_capacity: usize) -> Result<Vec<ScenarioReport>, ScenarioError> {
    scenario::builtin_scenarios()?
        .iter()
        .map(|s| s.run(default_capacity))
        .collect()
}
