//! # Least Frequently Used (LFU) Cache
//!
//! Evicts the entry with the lowest access frequency. Among entries sharing
//! that frequency, the one touched least recently goes first, so the victim
//! is always unique.
//!
//! Frequency counts accesses since the key's most recent insertion: a new key
//! starts at 0 and every `get` hit or overwriting `put` adds 1. A key that is
//! evicted and inserted again starts over at 0.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                         LfuCache<K, V>                           │
//!   │                                                                  │
//!   │   EntryStore<K, V>         FrequencyBuckets<K>                   │
//!   │   K -> V                                                         │
//!   │                            min_freq ─┐                           │
//!   │                                      ▼                           │
//!   │                            freq=0: [k4] ◄─► [k3]  ◄─ victim      │
//!   │                            freq=1: [k2]                          │
//!   │                            freq=2: [k1]                          │
//!   │                                     ▲                            │
//!   │                              most recent at head                 │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation      | Effect on tracker                     | Time |
//! |----------------|---------------------------------------|------|
//! | `put` new      | `pop_min` if full, insert at freq 0   | O(1) |
//! | `put` existing | `touch` (freq + 1, most recent)       | O(1) |
//! | `get` hit      | `touch`                               | O(1) |
//! | `get` miss     | none                                  | O(1) |
//! | `peek_lfu`     | none                                  | O(1) |
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::lfu::LfuCache;
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = LfuCache::new(4);
//! for key in ["k1", "k2", "k3", "k4"] {
//!     cache.put(key, ());
//! }
//! cache.get(&"k1");
//! cache.get(&"k1");
//! cache.get(&"k2");
//!
//! // k3 and k4 tie at frequency 0; k3 was touched least recently.
//! assert_eq!(cache.peek_lfu(), Some((&"k3", 0)));
//! cache.put("k5", ());
//! assert!(!cache.contains(&"k3"));
//! assert_eq!(cache.frequency(&"k1"), Some(2));
//! ```

use std::fmt;
use std::hash::Hash;

use tracing::debug;

use crate::ds::FrequencyBuckets;
use crate::error::{check_capacity, ConfigError, InvariantError};
use crate::listener::{EvictionListener, NoopListener};
use crate::policy::check_same_keys;
use crate::store::EntryStore;
use crate::traits::CoreCache;

/// Bounded cache that evicts the least frequently used entry, LRU among ties.
pub struct LfuCache<K, V> {
    store: EntryStore<K, V>,
    freq: FrequencyBuckets<K>,
    capacity: usize,
    listener: Box<dyn EvictionListener<K, V>>,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LFU cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use [`try_new`](Self::try_new) to get an
    /// error instead.
    pub fn new(capacity: usize) -> Self {
        Self::with_listener(capacity, NoopListener)
    }

    /// Creates an LFU cache, rejecting a zero capacity.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        let capacity = check_capacity(capacity)?;
        Ok(Self::with_listener(capacity, NoopListener))
    }

    /// Creates an LFU cache that reports every eviction to `listener`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_listener<L>(capacity: usize, listener: L) -> Self
    where
        L: EvictionListener<K, V> + 'static,
    {
        Self::with_boxed_listener(capacity, Box::new(listener))
    }

    pub(crate) fn with_boxed_listener(
        capacity: usize,
        listener: Box<dyn EvictionListener<K, V>>,
    ) -> Self {
        assert!(capacity > 0, "LfuCache capacity must be > 0");
        Self {
            store: EntryStore::with_capacity(capacity),
            freq: FrequencyBuckets::with_capacity(capacity),
            capacity,
            listener,
        }
    }

    /// Returns the next victim and its frequency without touching it.
    pub fn peek_lfu(&self) -> Option<(&K, u64)> {
        self.freq.peek_min()
    }

    /// Returns the access count of `key` since its last insertion.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.freq.frequency(key)
    }

    fn evict_lfu(&mut self) {
        let Some((victim, freq)) = self.freq.pop_min() else {
            return;
        };
        if let Some(value) = self.store.evict(&victim) {
            debug!(
                policy = "lfu",
                freq,
                len = self.store.len(),
                "evicted least frequently used entry"
            );
            self.listener.on_evict(&victim, &value);
        }
    }
}

impl<K, V> CoreCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn put(&mut self, key: K, value: V) -> Option<V> {
        if self.store.contains(&key) {
            self.freq.touch(&key);
            return self.store.set(key, value);
        }

        if self.store.len() >= self.capacity {
            self.evict_lfu();
        }
        self.freq.insert(key.clone());
        self.store.set(key, value);

        debug_assert_eq!(self.store.len(), self.freq.len());
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        self.freq.touch(key);
        self.store.get(key)
    }

    fn peek(&self, key: &K) -> Option<&V> {
        self.store.peek(key)
    }

    fn contains(&self, key: &K) -> bool {
        self.store.contains(key)
    }

    fn len(&self) -> usize {
        self.store.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        self.store.clear();
        self.freq.clear();
    }

    fn entries(&self) -> &EntryStore<K, V> {
        &self.store
    }

    fn check_invariants(&self) -> Result<(), InvariantError> {
        check_same_keys(&self.store, self.freq.len(), |k| self.freq.contains(k))?;
        if self.store.len() > self.capacity {
            return Err(InvariantError::new("len exceeds capacity"));
        }
        let lowest = self.freq.iter().map(|(_, freq)| freq).min();
        if lowest != self.freq.min_freq() {
            return Err(InvariantError::new(format!(
                "min_freq is {:?} but lowest tracked frequency is {:?}",
                self.freq.min_freq(),
                lowest
            )));
        }
        Ok(())
    }
}

impl<K, V> fmt::Debug for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCache")
            .field("capacity", &self.capacity)
            .field("len", &self.freq.len())
            .field("min_freq", &self.freq.min_freq())
            .finish_non_exhaustive()
    }
}
