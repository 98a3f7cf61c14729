use serde::{Deserialize, Serialize};

/// Running counters for a single [`crate::cache::LruCache`].
///
/// Only `get` and `get_or_insert_with` count as lookups; `peek` and
/// `contains` observe the cache without using it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// `put` calls that created a new entry.
    pub inserts: u64,
    /// `put` calls that overwrote an existing entry.
    pub updates: u64,
    pub evictions: u64,
}

impl CacheStats {
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of lookups that hit (0.0 when nothing has been looked up).
    pub fn hit_rate(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            n => self.hits as f64 / n as f64,
        }
    }
}
