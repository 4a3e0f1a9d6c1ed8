//! # First In, First Out (FIFO) Cache
//!
//! Evicts the key that was inserted earliest. Reads and overwrites never
//! change a key's position: once a key is admitted its place in line is fixed
//! until it is evicted.
//!
//! ## Architecture
//!
//! ```text
//!   ┌───────────────────────────────────────────────────────────────┐
//!   │                        FifoCache<K, V>                        │
//!   │                                                               │
//!   │   EntryStore<K, V>          KeyOrder<K>                       │
//!   │   ┌──────┬───────┐          oldest                  newest    │
//!   │   │ "k1" │ "v1"  │            │                        │      │
//!   │   │ "k2" │ "v2"  │            ▼                        ▼      │
//!   │   │ "k3" │ "v3"  │          [k1] ◄──► [k2] ◄──► [k3]          │
//!   │   └──────┴───────┘           ▲                                │
//!   │                              └── next victim                  │
//!   └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation    | Order effect                        | Complexity |
//! |--------------|-------------------------------------|------------|
//! | `put` (new)  | evict oldest if full, append newest | O(1)       |
//! | `put` (hit)  | none                                | O(1)       |
//! | `get`        | none                                | O(1)       |
//! | `age_rank`   | none                                | O(n)       |
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::fifo::FifoCache;
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = FifoCache::new(2);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");        // does not protect "a"
//! cache.put("c", 3);      // evicts "a"
//!
//! assert!(!cache.contains(&"a"));
//! assert_eq!(cache.peek_oldest(), Some((&"b", &2)));
//! ```

use std::fmt;
use std::hash::Hash;

use tracing::debug;

use crate::ds::KeyOrder;
use crate::error::{check_capacity, ConfigError, InvariantError};
use crate::listener::{EvictionListener, NoopListener};
use crate::policy::check_same_keys;
use crate::store::EntryStore;
use crate::traits::CoreCache;

/// Bounded cache that evicts in insertion order.
pub struct FifoCache<K, V> {
    store: EntryStore<K, V>,
    order: KeyOrder<K>,
    capacity: usize,
    listener: Box<dyn EvictionListener<K, V>>,
}

impl<K, V> FifoCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a FIFO cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use [`try_new`](Self::try_new) to get an
    /// error instead.
    pub fn new(capacity: usize) -> Self {
        Self::with_listener(capacity, NoopListener)
    }

    /// Creates a FIFO cache, rejecting a zero capacity.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        let capacity = check_capacity(capacity)?;
        Ok(Self::with_listener(capacity, NoopListener))
    }

    /// Creates a FIFO cache that reports every eviction to `listener`.
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
        assert!(capacity > 0, "FifoCache capacity must be > 0");
        Self {
            store: EntryStore::with_capacity(capacity),
            order: KeyOrder::with_capacity(capacity),
            capacity,
            listener,
        }
    }

    /// Returns the entry that would be evicted next.
    pub fn peek_oldest(&self) -> Option<(&K, &V)> {
        let key = self.order.oldest()?;
        self.store.peek(key).map(|value| (key, value))
    }

    /// Zero-based insertion rank of `key`; 0 is the oldest. O(n).
    pub fn age_rank(&self, key: &K) -> Option<usize> {
        self.order.position(key)
    }

    fn evict_oldest(&mut self) {
        let Some(victim) = self.order.pop_oldest() else {
            return;
        };
        if let Some(value) = self.store.evict(&victim) {
            debug!(policy = "fifo", len = self.store.len(), "evicted oldest entry");
            self.listener.on_evict(&victim, &value);
        }
    }
}

impl<K, V> CoreCache<K, V> for FifoCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn put(&mut self, key: K, value: V) -> Option<V> {
        if self.store.contains(&key) {
            return self.store.set(key, value);
        }

        if self.store.len() >= self.capacity {
            self.evict_oldest();
        }
        self.order.push_newest(key.clone());
        self.store.set(key, value);

        debug_assert_eq!(self.store.len(), self.order.len());
        None
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
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
        self.order.clear();
    }

    fn entries(&self) -> &EntryStore<K, V> {
        &self.store
    }

    fn check_invariants(&self) -> Result<(), InvariantError> {
        check_same_keys(&self.store, self.order.len(), |k| self.order.contains(k))?;
        if self.store.len() > self.capacity {
            return Err(InvariantError::new("len exceeds capacity"));
        }
        Ok(())
    }
}

impl<K, V> fmt::Debug for FifoCache<K, V>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FifoCache")
            .field("capacity", &self.capacity)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}
