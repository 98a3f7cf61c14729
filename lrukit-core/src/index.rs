//! Key Index: maps each live key to the [`Handle`] of its recency slot.
//!
//! The index only ever changes when the cache tells it to; it has no
//! eviction logic of its own.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use crate::recency::Handle;

#[derive(Debug, Clone)]
pub struct KeyIndex<K> {
    map: HashMap<K, Handle>,
}

impl<K: Hash + Eq> Default for KeyIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq> KeyIndex<K> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity),
        }
    }

    pub fn lookup<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key).copied()
    }

    /// Register `key` at `handle`, returning the handle it replaced.
    pub fn insert(&mut self, key: K, handle: Handle) -> Option<Handle> {
        self.map.insert(key, handle)
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.remove(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}
