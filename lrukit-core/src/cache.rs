use std::borrow::Borrow;
use std::hash::Hash;
use std::num::NonZeroUsize;

use crate::error::CacheError;
use crate::index::KeyIndex;
use crate::recency::{self, RecencyList};
use crate::stats::CacheStats;

/// A fixed-capacity least-recently-used cache.
///
/// `get` and `put` are O(1): the [`KeyIndex`] finds an entry's slot without
/// scanning, and the [`RecencyList`] relinks or evicts it without scanning.
/// Every successful `get` and every `put` marks the key as most recently
/// used.  When a `put` of a new key would exceed the capacity, the least
/// recently used entry is dropped first, without notifying the caller.
///
/// ```
/// use lrukit_core::LruCache;
///
/// let mut cache = LruCache::new(2).unwrap();
/// cache.put(1, "one");
/// cache.put(2, "two");
/// assert_eq!(cache.get(&1), Some(&"one"));
/// cache.put(3, "three"); // evicts 2
/// assert_eq!(cache.get(&2), None);
/// ```
#[derive(Debug, Clone)]
pub struct LruCache<K, V> {
    capacity: NonZeroUsize,
    list: RecencyList<K, V>,
    index: KeyIndex<K>,
    stats: CacheStats,
}

impl<K: Hash + Eq + Clone, V> LruCache<K, V> {
    /// Create an empty cache holding at most `capacity` entries.
    ///
    /// Returns [`CacheError::ZeroCapacity`] when `capacity` is 0.
    pub fn new(capacity: usize) -> Result<Self, CacheError> {
        NonZeroUsize::new(capacity)
            .map(Self::with_capacity)
            .ok_or(CacheError::ZeroCapacity)
    }

    /// Infallible constructor for callers that already hold a non-zero size.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            list: RecencyList::with_capacity(capacity.get()),
            index: KeyIndex::with_capacity(capacity.get()),
            stats: CacheStats::default(),
        }
    }

    /// Look up `key`, marking it most recently used on a hit.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.index.lookup(key) {
            Some(handle) => {
                self.stats.hits += 1;
                self.list.move_to_front(handle);
                self.list.value(handle)
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Insert or overwrite `key`, making it the most recently used entry.
    ///
    /// Overwriting never evicts.  Inserting a new key into a full cache
    /// evicts the least recently used entry first.
    pub fn put(&mut self, key: K, value: V) {
        if let Some(handle) = self.index.lookup(&key) {
            if let Some(slot) = self.list.value_mut(handle) {
                *slot = value;
            }
            self.list.move_to_front(handle);
            self.stats.updates += 1;
            return;
        }

        if self.list.len() >= self.capacity.get() {
            self.evict_lru();
        }

        let handle = self.list.push_front(key.clone(), value);
        self.index.insert(key, handle);
        self.stats.inserts += 1;
    }

    /// Return the cached value for `key`, computing and storing it with `f`
    /// on a miss.
    pub fn get_or_insert_with<F>(&mut self, key: K, f: F) -> &V
    where
        F: FnOnce() -> V,
    {
        match self.index.lookup(&key) {
            Some(handle) => {
                self.stats.hits += 1;
                self.list.move_to_front(handle);
            }
            None => {
                self.stats.misses += 1;
                self.put(key, f());
            }
        }
        // Either branch leaves the key at the head.
        self.list
            .front()
            .map(|(_, v)| v)
            .expect("touched entry must be at the head")
    }

    /// Read `key` without affecting recency or stats.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index
            .lookup(key)
            .and_then(|handle| self.list.value(handle))
    }

    /// Membership test that does not count as a use.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.lookup(key).is_some()
    }

    /// The entry the next new-key `put` on a full cache would evict.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.back()
    }

    /// Entries from most to least recently used.  Does not touch anything.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.list.iter(),
        }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Drop every entry.  Capacity and stats are kept.
    pub fn clear(&mut self) {
        self.list.clear();
        self.index.clear();
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    /// Pop the tail and forget its key in the same step.
    fn evict_lru(&mut self) {
        if let Some((key, _value)) = self.list.pop_back() {
            self.index.remove(&key);
            self.stats.evictions += 1;
            log::debug!(
                "evicted least-recently-used entry ({}/{} live)",
                self.list.len(),
                self.capacity
            );
        }
    }
}

/// Most- to least-recently-used iterator over an [`LruCache`].
pub struct Iter<'a, K, V> {
    inner: recency::Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K: Hash + Eq + Clone, V> IntoIterator for &'a LruCache<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
