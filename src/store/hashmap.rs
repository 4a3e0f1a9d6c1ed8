//! HashMap-backed entry store.
//!
//! ## Architecture
//! - Keys map to owned values in an `FxHashMap<K, V>`.
//! - The store has no notion of capacity or eviction order; policies own
//!   that and tell the store which key to drop.
//! - Lookups through [`EntryStore::get`] count hits and misses;
//!   [`EntryStore::peek`] reads without touching the counters.
//!
//! ## Example Usage
//! ```rust
//! use evictkit::store::EntryStore;
//!
//! let mut store: EntryStore<&str, u32> = EntryStore::new();
//! assert_eq!(store.set("a", 1), None);
//! assert_eq!(store.set("a", 2), Some(1));
//! assert_eq!(store.get(&"a"), Some(&2));
//! assert_eq!(store.get(&"b"), None);
//!
//! let metrics = store.metrics();
//! assert_eq!((metrics.hits, metrics.misses), (1, 1));
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::store::metrics::{StoreCounters, StoreMetrics};

/// Owning key/value map shared by every policy.
#[derive(Debug)]
pub struct EntryStore<K, V> {
    map: FxHashMap<K, V>,
    counters: StoreCounters,
}

impl<K, V> EntryStore<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
            counters: StoreCounters::default(),
        }
    }

    /// Creates a store with room for `capacity` entries before rehashing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            counters: StoreCounters::default(),
        }
    }

    /// Inserts or overwrites `key`, returning the previous value.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        let previous = self.map.insert(key, value);
        if previous.is_some() {
            self.counters.updates.incr();
        } else {
            self.counters.inserts.incr();
        }
        previous
    }

    /// Fetches a value by key, recording a hit or miss.
    pub fn get(&self, key: &K) -> Option<&V> {
        match self.map.get(key) {
            Some(value) => {
                self.counters.hits.incr();
                Some(value)
            },
            None => {
                self.counters.misses.incr();
                None
            },
        }
    }

    /// Fetches a value without recording metrics.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.map.get_mut(key)
    }

    /// Deletes `key`, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let removed = self.map.remove(key);
        if removed.is_some() {
            self.counters.removes.incr();
        }
        removed
    }

    /// Deletes `key` on behalf of an eviction; counted as an eviction rather than a remove.
    pub fn evict(&mut self, key: &K) -> Option<V> {
        let removed = self.map.remove(key);
        if removed.is_some() {
            self.counters.evictions.incr();
        }
        removed
    }

    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterates entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.map.iter()
    }

    /// Returns all entries with keys in ascending order.
    pub fn sorted(&self) -> Vec<(&K, &V)>
    where
        K: Ord,
    {
        let mut entries: Vec<_> = self.map.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Drops all entries. Counters are kept.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Snapshots the store counters.
    pub fn metrics(&self) -> StoreMetrics {
        self.counters.snapshot()
    }
}

impl<K, V> Default for EntryStore<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_inserts_then_overwrites() {
        let mut store = EntryStore::new();
        assert_eq!(store.set("k", 1), None);
        assert_eq!(store.set("k", 2), Some(1));
        assert_eq!(store.len(), 1);
        assert_eq!(store.peek(&"k"), Some(&2));

        let metrics = store.metrics();
        assert_eq!(metrics.inserts, 1);
        assert_eq!(metrics.updates, 1);
    }

    #[test]
    fn get_counts_hits_and_misses_peek_does_not() {
        let mut store = EntryStore::new();
        store.set(1, "one");
        assert_eq!(store.get(&1), Some(&"one"));
        assert_eq!(store.get(&2), None);
        assert_eq!(store.peek(&1), Some(&"one"));
        assert_eq!(store.peek(&2), None);

        let metrics = store.metrics();
        assert_eq!(metrics.hits, 1);
        assert_eq!(metrics.misses, 1);
    }

    #[test]
    fn remove_and_evict_are_counted_separately() {
        let mut store = EntryStore::with_capacity(4);
        store.set("a", 1);
        store.set("b", 2);

        assert_eq!(store.remove(&"a"), Some(1));
        assert_eq!(store.remove(&"a"), None);
        assert_eq!(store.evict(&"b"), Some(2));
        assert_eq!(store.evict(&"b"), None);
        assert!(store.is_empty());

        let metrics = store.metrics();
        assert_eq!(metrics.removes, 1);
        assert_eq!(metrics.evictions, 1);
    }

    #[test]
    fn sorted_orders_by_key() {
        let mut store = EntryStore::new();
        for key in ["delta", "alpha", "charlie", "bravo"] {
            store.set(key, key.len());
        }
        let keys: Vec<_> = store.sorted().into_iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["alpha", "bravo", "charlie", "delta"]);
    }

    #[test]
    fn get_mut_and_clear() {
        let mut store = EntryStore::new();
        store.set("a", 1);
        if let Some(v) = store.get_mut(&"a") {
            *v += 10;
        }
        assert_eq!(store.peek(&"a"), Some(&11));
        assert!(store.contains(&"a"));
        assert_eq!(store.iter().count(), 1);

        store.clear();
        assert!(store.is_empty());
        assert!(!store.contains(&"a"));
    }
}
