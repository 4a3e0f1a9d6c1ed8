//! # Last In, First Out (LIFO) Cache
//!
//! Stack-like eviction: when a new key arrives at a full cache, the entry
//! that was placed most recently is discarded. Overwriting a key counts as
//! placing it again, so an update makes that key the next victim. Reads are
//! pure.
//!
//! ```text
//!   put(k1..k4), capacity 4
//!
//!     bottom ─► [k1] [k2] [k3] [k4] ◄─ top
//!
//!   put(k5):  pop top (k4), push k5
//!
//!     bottom ─► [k1] [k2] [k3] [k5] ◄─ top
//! ```
//!
//! LIFO suits workloads where old entries are the stable working set and
//! late arrivals are transient.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::lifo::LifoCache;
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = LifoCache::new(2);
//! cache.put(1, "a");
//! cache.put(2, "b");
//! cache.put(1, "a2");     // 1 is now on top
//! cache.put(3, "c");      // evicts 1
//!
//! assert!(!cache.contains(&1));
//! assert_eq!(cache.peek_newest(), Some((&3, &"c")));
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

/// Bounded cache that evicts the most recently placed entry.
pub struct LifoCache<K, V> {
    store: EntryStore<K, V>,
    order: KeyOrder<K>,
    capacity: usize,
    listener: Box<dyn EvictionListener<K, V>>,
}

impl<K, V> LifoCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a LIFO cache holding at most `capacity` entries.
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

    /// Creates a LIFO cache that reports every eviction to `listener`.
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
        assert!(capacity > 0, "LifoCache capacity must be > 0");
        Self {
            store: EntryStore::with_capacity(capacity),
            order: KeyOrder::with_capacity(capacity),
            capacity,
            listener,
        }
    }

    /// Returns the entry on top of the stack, i.e. the next victim.
    pub fn peek_newest(&self) -> Option<(&K, &V)> {
        let key = self.order.newest()?;
        self.store.peek(key).map(|value| (key, value))
    }

    fn evict_newest(&mut self) {
        let Some(victim) = self.order.pop_newest() else {
            return;
        };
        if let Some(value) = self.store.evict(&victim) {
            debug!(policy = "lifo", len = self.store.len(), "evicted newest entry");
            self.listener.on_evict(&victim, &value);
        }
    }
}

impl<K, V> CoreCache<K, V> for LifoCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn put(&mut self, key: K, value: V) -> Option<V> {
        if self.store.contains(&key) {
            self.order.touch(&key);
            return self.store.set(key, value);
        }

        if self.store.len() >= self.capacity {
            self.evict_newest();
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

impl<K, V> fmt::Debug for LifoCache<K, V>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifoCache")
            .field("capacity", &self.capacity)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_last_inserted() {
        let mut cache = LifoCache::new(4);
        for key in ["k1", "k2", "k3", "k4"] {
            cache.put(key, ());
        }
        cache.put("k5", ());

        assert!(!cache.contains(&"k4"));
        for key in ["k1", "k2", "k3", "k5"] {
            assert!(cache.contains(&key), "{key} should survive");
        }
        assert!(cache.check_invariants().is_ok());
    }

    #[test]
    fn overwrite_moves_key_to_top() {
        let mut cache = LifoCache::new(3);
        cache.put(1, 'a');
        cache.put(2, 'b');
        cache.put(3, 'c');
        assert_eq!(cache.put(1, 'A'), Some('a'));
        assert_eq!(cache.peek_newest(), Some((&1, &'A')));

        cache.put(4, 'd');
        assert!(!cache.contains(&1));
        assert!(cache.contains(&3));
    }

    #[test]
    fn get_does_not_reorder() {
        let mut cache = LifoCache::new(2);
        cache.put(1, 'a');
        cache.put(2, 'b');
        assert_eq!(cache.get(&1), Some(&'a'));
        assert_eq!(cache.peek_newest().map(|(k, _)| *k), Some(2));
    }

    #[test]
    fn repeated_overflow_keeps_bottom_entries() {
        let mut cache = LifoCache::new(3);
        for i in 0..10 {
            cache.put(i, i);
        }
        assert!(cache.contains(&0));
        assert!(cache.contains(&1));
        assert!(cache.contains(&9));
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.entries().metrics().evictions, 7);
    }

    #[test]
    fn try_new_rejects_zero() {
        assert!(LifoCache::<u8, u8>::try_new(0).is_err());
    }

    #[test]
    fn clear_drops_without_notifying() {
        use std::cell::Cell;
        use std::rc::Rc;

        use crate::listener::FnListener;

        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let mut cache =
            LifoCache::with_listener(2, FnListener(move |_: &u8, _: &u8| counter.set(counter.get() + 1)));
        cache.put(1, 1);
        cache.put(2, 2);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(calls.get(), 0);
    }
}
