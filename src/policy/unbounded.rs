//! Unbounded pass-through cache.
//!
//! Stores every entry it is given and never evicts. It has no order tracker
//! and serves as the correctness baseline for the bounded policies: for any
//! sequence of operations that never overflows a bounded cache, the bounded
//! cache must answer `get` exactly as this one does.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::unbounded::UnboundedCache;
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = UnboundedCache::new();
//! for i in 0..100 {
//!     cache.put(i, i * 10);
//! }
//! assert_eq!(cache.len(), 100);
//! assert_eq!(cache.get(&42), Some(&420));
//! assert_eq!(cache.capacity(), usize::MAX);
//! ```

use std::hash::Hash;

use crate::error::InvariantError;
use crate::store::EntryStore;
use crate::traits::CoreCache;

/// Cache without a capacity bound.
#[derive(Debug)]
pub struct UnboundedCache<K, V> {
    store: EntryStore<K, V>,
}

impl<K, V> UnboundedCache<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            store: EntryStore::new(),
        }
    }

    /// Pre-sizes the underlying map. This is a hint, not a bound.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: EntryStore::with_capacity(capacity),
        }
    }
}

impl<K, V> Default for UnboundedCache<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> CoreCache<K, V> for UnboundedCache<K, V>
where
    K: Eq + Hash,
{
    #[inline]
    fn put(&mut self, key: K, value: V) -> Option<V> {
        self.store.set(key, value)
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
        usize::MAX
    }

    fn clear(&mut self) {
        self.store.clear();
    }

    fn entries(&self) -> &EntryStore<K, V> {
        &self.store
    }

    fn check_invariants(&self) -> Result<(), InvariantError> {
        Ok(())
    }
}
