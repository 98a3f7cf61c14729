use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by [`crate::cache::LruCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CacheError {
    /// A cache that can hold nothing would evict every insert before it lands.
    #[error("cache capacity must be at least 1")]
    ZeroCapacity,
}

/// Errors raised while loading or replaying a [`crate::scenario::Scenario`].
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("step {step}: `expect` and `miss = true` cannot both be set")]
    ConflictingExpectation { step: usize },

    #[error(transparent)]
    Cache(#[from] CacheError),
}
