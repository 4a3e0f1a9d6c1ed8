//! # Most Recently Used (MRU) Cache
//!
//! Tracks recency exactly like [`LruCache`](crate::policy::lru::LruCache):
//! `get` and an overwriting `put` both move the key to the most recent end.
//! The difference is the victim: MRU discards the entry touched *last*.
//!
//! This fits cyclic scans larger than the cache, where the key just read is
//! the one least likely to be needed again soon.
//!
//! ```text
//!   put(k1..k4), get(k1)
//!
//!     least recent ─► [k2] [k3] [k4] [k1] ◄─ most recent
//!
//!   put(k5):  evict k1
//!
//!     least recent ─► [k2] [k3] [k4] [k5] ◄─ most recent
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::mru::MruCache;
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = MruCache::new(2);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");
//! cache.put("c", 3);      // evicts "a"
//!
//! assert!(!cache.contains(&"a"));
//! assert_eq!(cache.peek_mru(), Some((&"c", &3)));
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

/// Bounded cache that evicts the most recently used entry.
pub struct MruCache<K, V> {
    store: EntryStore<K, V>,
    order: KeyOrder<K>,
    capacity: usize,
    listener: Box<dyn EvictionListener<K, V>>,
}

impl<K, V> MruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an MRU cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        Self::with_listener(capacity, NoopListener)
    }

    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        let capacity = check_capacity(capacity)?;
        Ok(Self::with_listener(capacity, NoopListener))
    }

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
        assert!(capacity > 0, "MruCache capacity must be > 0");
        Self {
            store: EntryStore::with_capacity(capacity),
            order: KeyOrder::with_capacity(capacity),
            capacity,
            listener,
        }
    }

    /// Returns the most recently used entry, i.e. the next victim.
    pub fn peek_mru(&self) -> Option<(&K, &V)> {
        let key = self.order.newest()?;
        self.store.peek(key).map(|value| (key, value))
    }

    fn evict_mru(&mut self) {
        let Some(victim) = self.order.pop_newest() else {
            return;
        };
        if let Some(value) = self.store.evict(&victim) {
            debug!(policy = "mru", len = self.store.len(), "evicted most recently used entry");
            self.listener.on_evict(&victim, &value);
        }
    }
}

impl<K, V> CoreCache<K, V> for MruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn put(&mut self, key: K, value: V) -> Option<V> {
        if self.store.contains(&key) {
            self.order.touch(&key);
            return self.store.set(key, value);
        }

        if self.store.len() >= self.capacity {
            self.evict_mru();
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

impl<K, V> fmt::Debug for MruCache<K, V>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MruCache")
            .field("capacity", &self.capacity)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}
