//! Scripted `get`/`put` sequences with expected outcomes.
//!
//! A scenario is a TOML document:
//!
//! ```toml
//! name = "update refreshes recency"
//! capacity = 2
//!
//! [[step]]
//! op = "put"
//! key = 1
//! value = 1
//!
//! [[step]]
//! op = "get"
//! key = 1
//! expect = 1
//!
//! [[step]]
//! op = "get"
//! key = 7
//! miss = true
//!
//! [[step]]
//! op = "order"
//! keys = [1]
//! ```
//!
//! Keys and values are integers or strings.  Replaying a scenario never
//! stops at a failing step: every step is run and recorded in the
//! [`ScenarioReport`].

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cache::LruCache;
use crate::error::ScenarioError;
use crate::stats::CacheStats;

// ---------------------------------------------------------------------------
// Script types
// ---------------------------------------------------------------------------

/// Key or value in a scenario script.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Str(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(n) => write!(f, "{n}"),
            Scalar::Str(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Int(n)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Str(s.to_string())
    }
}

/// One operation in a scenario, tagged by `op`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Step {
    Put {
        key: Scalar,
        value: Scalar,
    },
    /// `expect` checks the hit value, `miss = true` checks for a miss;
    /// with neither the lookup is unchecked.
    Get {
        key: Scalar,
        #[serde(default)]
        expect: Option<Scalar>,
        #[serde(default)]
        miss: bool,
    },
    Contains {
        key: Scalar,
        expect: bool,
    },
    /// Full key order, most recently used first.
    Order {
        keys: Vec<Scalar>,
    },
    Len {
        expect: usize,
    },
}

impl Step {
    /// Call-style label, e.g. `put(1, "a")`.
    pub fn label(&self) -> String {
        match self {
            Step::Put { key, value } => format!("put({key}, {value})"),
            Step::Get { key, .. } => format!("get({key})"),
            Step::Contains { key, .. } => format!("contains({key})"),
            Step::Order { .. } => "order".to_string(),
            Step::Len { .. } => "len".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    /// Falls back to the configured default when absent.
    #[serde(default)]
    pub capacity: Option<usize>,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Parse a scenario from TOML.  `fallback_name` is used in error
    /// messages and when the document has no `name`.
    pub fn from_toml(fallback_name: &str, src: &str) -> Result<Self, ScenarioError> {
        let mut scenario: Scenario = toml::from_str(src).map_err(|source| ScenarioError::Parse {
            name: fallback_name.to_string(),
            source,
        })?;
        if scenario.name.is_empty() {
            scenario.name = fallback_name.to_string();
        }
        scenario.validate()?;
        Ok(scenario)
    }

    /// Read and parse a scenario file; the file stem is the fallback name.
    pub fn from_file(path: &Path) -> Result<Self, ScenarioError> {
        let src = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("scenario");
        Self::from_toml(stem, &src)
    }

    fn validate(&self) -> Result<(), ScenarioError> {
        for (i, step) in self.steps.iter().enumerate() {
            if let Step::Get {
                expect: Some(_),
                miss: true,
                ..
            } = step
            {
                return Err(ScenarioError::ConflictingExpectation { step: i + 1 });
            }
        }
        Ok(())
    }

    /// Replay every step against a fresh cache.
    ///
    /// Fails only if the cache cannot be built; failing steps are recorded
    /// in the report.
    pub fn run(&self, default_capacity: usize) -> Result<ScenarioReport, ScenarioError> {
        let capacity = self.capacity.unwrap_or(default_capacity);
        let mut cache = LruCache::new(capacity)?;
        log::info!("running scenario {:?} (capacity {capacity})", self.name);

        let steps: Vec<StepResult> = self
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| run_step(&mut cache, i + 1, step))
            .collect();

        Ok(ScenarioReport {
            name: self.name.clone(),
            capacity,
            steps,
            stats: *cache.stats(),
            final_order: cache.iter().map(|(k, _)| k.clone()).collect(),
        })
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    Fail,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Outcome::Pass => "PASS",
            Outcome::Fail => "FAIL",
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    /// 1-based position in the script.
    pub index: usize,
    pub op: String,
    pub outcome: Outcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub name: String,
    pub capacity: usize,
    pub steps: Vec<StepResult>,
    pub stats: CacheStats,
    /// Keys left in the cache, most recently used first.
    pub final_order: Vec<Scalar>,
}

impl ScenarioReport {
    pub fn passed(&self) -> usize {
        self.count(Outcome::Pass)
    }

    pub fn failed(&self) -> usize {
        self.count(Outcome::Fail)
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    fn count(&self, outcome: Outcome) -> usize {
        self.steps.iter().filter(|s| s.outcome == outcome).count()
    }
}

fn run_step(cache: &mut LruCache<Scalar, Scalar>, index: usize, step: &Step) -> StepResult {
    let (outcome, detail) = match step {
        Step::Put { key, value } => {
            let full = cache.len() == cache.capacity() && !cache.contains(key);
            let victim = if full {
                cache.peek_lru().map(|(k, _)| k.clone())
            } else {
                None
            };
            cache.put(key.clone(), value.clone());
            (Outcome::Pass, victim.map(|k| format!("evicted key {k}")))
        }

        Step::Get { key, expect, miss } => {
            let got = cache.get(key).cloned();
            match (expect, got) {
                (Some(want), Some(got)) if *want == got => (Outcome::Pass, Some(format!("hit {got}"))),
                (Some(want), Some(got)) => (Outcome::Fail, Some(format!("expected {want}, got {got}"))),
                (Some(want), None) => (Outcome::Fail, Some(format!("expected {want}, got miss"))),
                (None, Some(got)) if *miss => (Outcome::Fail, Some(format!("expected miss, got {got}"))),
                (None, Some(got)) => (Outcome::Pass, Some(format!("hit {got}"))),
                (None, None) => (Outcome::Pass, Some("miss".to_string())),
            }
        }

        Step::Contains { key, expect } => {
            let got = cache.contains(key);
            if got == *expect {
                (Outcome::Pass, None)
            } else {
                (Outcome::Fail, Some(format!("expected {expect}, got {got}")))
            }
        }

        Step::Order { keys } => {
            let actual: Vec<Scalar> = cache.iter().map(|(k, _)| k.clone()).collect();
            if actual == *keys {
                (Outcome::Pass, Some(format!("[{}]", join(&actual))))
            } else {
                (
                    Outcome::Fail,
                    Some(format!("expected [{}], got [{}]", join(keys), join(&actual))),
                )
            }
        }

        Step::Len { expect } => {
            let got = cache.len();
            if got == *expect {
                (Outcome::Pass, Some(got.to_string()))
            } else {
                (Outcome::Fail, Some(format!("expected {expect}, got {got}")))
            }
        }
    };

    let op = step.label();
    log::debug!("step {index}: {op} -> {outcome}");
    StepResult {
        index,
        op,
        outcome,
        detail,
    }
}

fn join(keys: &[Scalar]) -> String {
    keys.iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Built-in scenarios
// ---------------------------------------------------------------------------

const BUILTIN: &[(&str, &str)] = &[
    ("evicts_lru", include_str!("../scenarios/evicts_lru.toml")),
    ("capacity_one", include_str!("../scenarios/capacity_one.toml")),
    ("update_refreshes", include_str!("../scenarios/update_refreshes.toml")),
    ("empty_cache", include_str!("../scenarios/empty_cache.toml")),
    ("repeated_put", include_str!("../scenarios/repeated_put.toml")),
];

/// The reference behaviours every LRU implementation must reproduce.
pub fn builtin_scenarios() -> Result<Vec<Scenario>, ScenarioError> {
    BUILTIN
        .iter()
        .map(|(name, src)| Scenario::from_toml(name, src))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Scenario {
        Scenario::from_toml("test", src).unwrap()
    }

    #[test]
    fn parses_every_step_kind() {
        let s = parse(
            r#"
            name = "all"
            capacity = 2

            [[step]]
            op = "put"
            key = 1
            value = "one"

            [[step]]
            op = "get"
            key = 1
            expect = "one"

            [[step]]
            op = "get"
            key = "nope"
            miss = true

            [[step]]
            op = "contains"
            key = 1
            expect = true

            [[step]]
            op = "order"
            keys = [1]

            [[step]]
            op = "len"
            expect = 1
            "#,
        );
        assert_eq!(s.name, "all");
        assert_eq!(s.capacity, Some(2));
        assert_eq!(s.steps.len(), 6);
        assert_eq!(
            s.steps[0],
            Step::Put {
                key: Scalar::Int(1),
                value: Scalar::from("one"),
            }
        );
        assert_eq!(s.steps[2].label(), "get(\"nope\")");
    }

    #[test]
    fn missing_name_uses_fallback() {
        let s = parse("capacity = 1\n");
        assert_eq!(s.name, "test");
        assert!(s.steps.is_empty());
    }

    #[test]
    fn conflicting_expectation_is_rejected() {
        let err = Scenario::from_toml(
            "bad",
            "[[step]]\nop = \"get\"\nkey = 1\nexpect = 1\nmiss = true\n",
        )
        .unwrap_err();
        assert!(matches!(err, ScenarioError::ConflictingExpectation { step: 1 }));
    }

    #[test]
    fn unknown_op_is_parse_error() {
        let err = Scenario::from_toml("bad", "[[step]]\nop = \"delete\"\nkey = 1\n").unwrap_err();
        assert!(matches!(err, ScenarioError::Parse { .. }));
    }

    #[test]
    fn zero_capacity_fails_to_run() {
        let s = parse("capacity = 0\n");
        assert!(matches!(s.run(8), Err(ScenarioError::Cache(_))));
    }

    #[test]
    fn default_capacity_applies_when_unset() {
        let s = parse("[[step]]\nop = \"put\"\nkey = 1\nvalue = 1\n");
        let report = s.run(3).unwrap();
        assert_eq!(report.capacity, 3);
    }

    #[test]
    fn put_reports_evicted_key() {
        let s = parse(
            r#"
            capacity = 1
            [[step]]
            op = "put"
            key = 1
            value = 1
            [[step]]
            op = "put"
            key = 2
            value = 2
            "#,
        );
        let report = s.run(8).unwrap();
        assert_eq!(report.steps[0].detail, None);
        assert_eq!(report.steps[1].detail.as_deref(), Some("evicted key 1"));
        assert_eq!(report.stats.evictions, 1);
    }

    #[test]
    fn failing_steps_are_recorded_not_fatal() {
        let s = parse(
            r#"
            capacity = 2
            [[step]]
            op = "get"
            key = 1
            expect = 1
            [[step]]
            op = "len"
            expect = 0
            "#,
        );
        let report = s.run(8).unwrap();
        assert_eq!(report.failed(), 1);
        assert_eq!(report.passed(), 1);
        assert!(!report.is_success());
        assert_eq!(report.steps[0].detail.as_deref(), Some("expected 1, got miss"));
    }

    #[test]
    fn order_mismatch_fails() {
        let s = parse(
            r#"
            capacity = 2
            [[step]]
            op = "put"
            key = 1
            value = 1
            [[step]]
            op = "put"
            key = 2
            value = 2
            [[step]]
            op = "order"
            keys = [1, 2]
            "#,
        );
        let report = s.run(8).unwrap();
        assert_eq!(report.steps[2].outcome, Outcome::Fail);
        assert_eq!(report.final_order, vec![Scalar::Int(2), Scalar::Int(1)]);
    }

    #[test]
    fn builtin_scenarios_parse() {
        let all = builtin_scenarios().unwrap();
        assert_eq!(all.len(), BUILTIN.len());
        assert!(all.iter().all(|s| !s.steps.is_empty()));
    }

    #[test]
    fn outcome_display() {
        assert_eq!(Outcome::Pass.to_string(), "PASS");
        assert_eq!(Outcome::Fail.to_string(), "FAIL");
    }
}
