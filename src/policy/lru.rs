//! # Least Recently Used (LRU) Cache
//!
//! Evicts the entry that has gone longest without being touched. Both `get`
//! and an overwriting `put` count as a touch.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │                        LruCache<K, V>                        │
//!   │                                                              │
//!   │   EntryStore<K, V>        KeyOrder<K>                        │
//!   │   K -> V                  FxHashMap<K, SlotId> ──┐           │
//!   │                                                  ▼           │
//!   │                  front ──► [A] ◄──► [B] ◄──► [C] ◄── back    │
//!   │                   (LRU)                           (MRU)      │
//!   └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations Flow
//!
//! ```text
//!   get(A):   [A] [B] [C]  ──►  [B] [C] [A]
//!
//!   put(D) at capacity 3:
//!     1. pop front (B), notify listener
//!     2. append D at back
//!             [C] [A] [D]
//! ```
//!
//! | Operation      | Time | Notes                         |
//! |----------------|------|-------------------------------|
//! | `put` new      | O(1) | may evict the front           |
//! | `put` existing | O(1) | replaces value, moves to back |
//! | `get`          | O(1) | moves to back                 |
//! | `peek`         | O(1) | no reordering                 |
//! | `recency_rank` | O(n) | diagnostics                   |
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::lru::LruCache;
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = LruCache::new(3);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.put("c", 3);
//!
//! cache.get(&"a");
//! cache.put("d", 4);      // evicts "b"
//!
//! assert!(!cache.contains(&"b"));
//! assert_eq!(cache.peek_lru(), Some((&"c", &3)));
//! assert_eq!(cache.recency_rank(&"d"), Some(0));
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

/// Bounded cache that evicts the least recently used entry.
pub struct LruCache<K, V> {
    store: EntryStore<K, V>,
    order: KeyOrder<K>,
    capacity: usize,
    listener: Box<dyn EvictionListener<K, V>>,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LRU cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use [`try_new`](Self::try_new) to get an
    /// error instead.
    pub fn new(capacity: usize) -> Self {
        Self::with_listener(capacity, NoopListener)
    }

    /// Creates an LRU cache, rejecting a zero capacity.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::policy::lru::LruCache;
    ///
    /// assert!(LruCache::<u64, u64>::try_new(0).is_err());
    /// assert!(LruCache::<u64, u64>::try_new(16).is_ok());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        let capacity = check_capacity(capacity)?;
        Ok(Self::with_listener(capacity, NoopListener))
    }

    /// Creates an LRU cache that reports every eviction to `listener`.
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
        assert!(capacity > 0, "LruCache capacity must be > 0");
        Self {
            store: EntryStore::with_capacity(capacity),
            order: KeyOrder::with_capacity(capacity),
            capacity,
            listener,
        }
    }

    /// Returns the least recently used entry without touching it.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        let key = self.order.oldest()?;
        self.store.peek(key).map(|value| (key, value))
    }

    /// Distance of `key` from the most recently used end; 0 is the MRU entry. O(n).
    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        let from_oldest = self.order.position(key)?;
        Some(self.order.len() - 1 - from_oldest)
    }

    fn evict_lru(&mut self) {
        let Some(victim) = self.order.pop_oldest() else {
            return;
        };
        if let Some(value) = self.store.evict(&victim) {
            debug!(policy = "lru", len = self.store.len(), "evicted least recently used entry");
            self.listener.on_evict(&victim, &value);
        }
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn put(&mut self, key: K, value: V) -> Option<V> {
        if self.store.contains(&key) {
            self.order.touch(&key);
            return self.store.set(key, value);
        }

        if self.store.len() >= self.capacity {
            self.evict_lru();
        }
        self.order.push_newest(key.clone());
        self.store.set(key, value);

        debug_assert_eq!(self.store.len(), self.order.len());
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        self.order.touch(key);
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

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}
