//! Recency List: entries ordered from most- to least-recently used.
//!
//! The list is an arena of [`Entry`] slots linked by index.  A [`Handle`]
//! names a slot and stays valid while other entries are inserted, moved, or
//! evicted; it is only invalidated when its own entry is removed, at which
//! point the slot goes onto a free list for reuse.
//!
//! ```
//! use lrukit_core::recency::RecencyList;
//!
//! let mut list = RecencyList::new();
//! let a = list.push_front("a", 1);
//! list.push_front("b", 2);
//! list.move_to_front(a);
//! assert_eq!(list.pop_back(), Some(("b", 2)));
//! ```

use crate::entry::Entry;

/// Stable, non-owning reference to an entry's slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(usize);

impl Handle {
    /// Arena slot this handle addresses.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct RecencyList<K, V> {
    slots: Vec<Option<Entry<K, V>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<K, V> Default for RecencyList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> RecencyList<K, V> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Pre-size the arena for `capacity` live entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a new entry at the head and return its handle.
    pub fn push_front(&mut self, key: K, value: V) -> Handle {
        let idx = self.alloc(Entry::new(key, value));
        self.link_front(idx);
        self.len += 1;
        Handle(idx)
    }

    /// Relocate the entry behind `handle` to the head.
    ///
    /// No-op if it is already the head or the slot is vacant.
    pub fn move_to_front(&mut self, handle: Handle) {
        let idx = handle.0;
        if self.head == Some(idx) || self.entry(idx).is_none() {
            return;
        }
        self.unlink(idx);
        self.link_front(idx);
    }

    /// Remove and return the tail (least-recently-used) entry.
    pub fn pop_back(&mut self) -> Option<(K, V)> {
        let idx = self.tail?;
        self.unlink(idx);
        let entry = self.slots.get_mut(idx)?.take()?;
        self.free.push(idx);
        self.len -= 1;
        Some(entry.into_pair())
    }

    pub fn value(&self, handle: Handle) -> Option<&V> {
        self.entry(handle.0).map(|e| &e.value)
    }

    pub fn value_mut(&mut self, handle: Handle) -> Option<&mut V> {
        self.entry_mut(handle.0).map(|e| &mut e.value)
    }

    /// Most-recently-used entry.
    pub fn front(&self) -> Option<(&K, &V)> {
        self.head
            .and_then(|idx| self.entry(idx))
            .map(|e| (&e.key, &e.value))
    }

    /// Least-recently-used entry.
    pub fn back(&self) -> Option<(&K, &V)> {
        self.tail
            .and_then(|idx| self.entry(idx))
            .map(|e| (&e.key, &e.value))
    }

    /// Walk the list from head to tail.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: &self.slots,
            cursor: self.head,
            remaining: self.len,
        }
    }

    /// Drop every entry and release the arena's slots.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    // -- internals -----------------------------------------------------------

    fn entry(&self, idx: usize) -> Option<&Entry<K, V>> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    fn entry_mut(&mut self, idx: usize) -> Option<&mut Entry<K, V>> {
        self.slots.get_mut(idx).and_then(Option::as_mut)
    }

    /// Place `entry` in a free slot, growing the arena only when none is free.
    fn alloc(&mut self, entry: Entry<K, V>) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(entry);
                idx
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        }
    }

    /// Detach `idx` from its neighbours, patching head/tail as needed.
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.entry(idx) {
            Some(e) => (e.prev, e.next),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(pe) = self.entry_mut(p) {
                    pe.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(ne) = self.entry_mut(n) {
                    ne.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(e) = self.entry_mut(idx) {
            e.prev = None;
            e.next = None;
        }
    }

    fn link_front(&mut self, idx: usize) {
        let old_head = self.head;
        if let Some(e) = self.entry_mut(idx) {
            e.prev = None;
            e.next = old_head;
        }
        // The old head must point back at the new one, or the backward chain
        // used by pop_back skips it.
        if let Some(h) = old_head {
            if let Some(he) = self.entry_mut(h) {
                he.prev = Some(idx);
            }
        }
        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
    }
}

/// Head-to-tail iterator over a [`RecencyList`].
pub struct Iter<'a, K, V> {
    slots: &'a [Option<Entry<K, V>>],
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let entry = self.slots.get(idx)?.as_ref()?;
        self.cursor = entry.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some((&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
