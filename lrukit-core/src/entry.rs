/// One cached item, stored in a [`crate::recency::RecencyList`] slot.
///
/// Neighbours are addressed by arena index rather than by reference, so the
/// list never forms an ownership cycle.
#[derive(Debug, Clone)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
    /// Slot of the next more-recently-used entry (`None` at the head).
    pub prev: Option<usize>,
    /// Slot of the next less-recently-used entry (`None` at the tail).
    pub next: Option<usize>,
}

impl<K, V> Entry<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Entry {
            key,
            value,
            prev: None,
            next: None,
        }
    }

    /// Consume the entry, dropping its links.
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}
