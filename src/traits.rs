//! # Cache Trait
//!
//! One uniform interface over every eviction policy. Policies differ only in
//! which entry they sacrifice when a new key arrives at a full cache, so the
//! surface is deliberately small:
//!
//! ```text
//!   ┌─────────────────────────────────────────────────────────┐
//!   │                    CoreCache<K, V>                      │
//!   │                                                         │
//!   │  put(&mut, K, V) → Option<V>          policy-specific   │
//!   │  put_checked(&mut, Option<K>, Option<V>)   (provided)   │
//!   │  get(&mut, &K) → Option<&V>           policy-specific   │
//!   │  peek(&, &K) → Option<&V>             no side effects   │
//!   │  contains / len / is_empty / capacity                   │
//!   │  clear(&mut)                                            │
//!   │  entries(&) → &EntryStore<K, V>                         │
//!   │  check_invariants(&) → Result<(), InvariantError>       │
//!   └─────────────────────────────────────────────────────────┘
//!        ▲        ▲        ▲        ▲        ▲        ▲
//!   Unbounded   Fifo     Lifo     Lru      Mru      Lfu
//! ```
//!
//! ## Policy Comparison
//!
//! | Policy    | Victim on overflow               | `get` reorders | overwrite reorders |
//! |-----------|----------------------------------|----------------|--------------------|
//! | Unbounded | never evicts                     | -              | -                  |
//! | FIFO      | oldest insertion                 | no             | no                 |
//! | LIFO      | newest insertion / overwrite     | no             | yes                |
//! | LRU       | least recently used              | yes            | yes                |
//! | MRU       | most recently used               | yes            | yes                |
//! | LFU       | lowest frequency, LRU among ties | yes (+1)       | yes (+1)           |
//!
//! The trait is object safe, so `Box<dyn CoreCache<K, V>>` works when the
//! policy is chosen at runtime.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::fifo::FifoCache;
//! use evictkit::policy::lru::LruCache;
//! use evictkit::traits::CoreCache;
//!
//! fn warm<C: CoreCache<u32, String> + ?Sized>(cache: &mut C, data: &[(u32, &str)]) {
//!     for (key, value) in data {
//!         cache.put(*key, value.to_string());
//!     }
//! }
//!
//! let mut caches: Vec<Box<dyn CoreCache<u32, String>>> =
//!     vec![Box::new(FifoCache::new(4)), Box::new(LruCache::new(4))];
//! for cache in &mut caches {
//!     warm(cache.as_mut(), &[(1, "one"), (2, "two")]);
//!     assert_eq!(cache.len(), 2);
//! }
//! ```
//!
//! ## Thread Safety
//!
//! Caches are single-threaded. A caller that shares one across threads must
//! guard the whole cache (entry store and order tracker together) with one
//! lock, e.g. `Mutex<LruCache<K, V>>`.

use tracing::trace;

use crate::error::InvariantError;
use crate::store::EntryStore;

/// Core cache operations shared by every eviction policy.
///
/// # Type Parameters
///
/// - `K`: Key type (implementations require `Eq + Hash + Clone`)
/// - `V`: Value type, owned by the cache
pub trait CoreCache<K, V> {
    /// Inserts or overwrites `key`, returning the previous value on overwrite.
    ///
    /// When `key` is new and the cache is full, the policy evicts exactly one
    /// entry first and notifies the eviction listener.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::policy::lru::LruCache;
    /// use evictkit::traits::CoreCache;
    ///
    /// let mut cache = LruCache::new(4);
    /// assert_eq!(cache.put("a", 1), None);
    /// assert_eq!(cache.put("a", 2), Some(1));
    /// ```
    fn put(&mut self, key: K, value: V) -> Option<V>;

    /// Like [`put`](Self::put), but an absent key or value is a silent no-op.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::policy::fifo::FifoCache;
    /// use evictkit::traits::CoreCache;
    ///
    /// let mut cache: FifoCache<&str, i32> = FifoCache::new(4);
    /// cache.put_checked(None, Some(1));
    /// cache.put_checked(Some("a"), None);
    /// assert!(cache.is_empty());
    ///
    /// cache.put_checked(Some("a"), Some(1));
    /// assert_eq!(cache.len(), 1);
    /// ```
    fn put_checked(&mut self, key: Option<K>, value: Option<V>) -> Option<V> {
        match (key, value) {
            (Some(key), Some(value)) => self.put(key, value),
            _ => {
                trace!("rejected put with absent key or value");
                None
            },
        }
    }

    /// Looks up `key`. `None` means "not found".
    ///
    /// Depending on the policy this refreshes recency or frequency; use
    /// [`peek`](Self::peek) for a read with no ordering side effects.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Looks up `key` without affecting eviction order.
    fn peek(&self, key: &K) -> Option<&V>;

    /// Checks whether `key` is live, without affecting eviction order.
    fn contains(&self, key: &K) -> bool;

    /// Number of live entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of live entries; `usize::MAX` when unbounded.
    fn capacity(&self) -> usize;

    /// Drops every entry and its order record. No eviction notifications.
    fn clear(&mut self);

    /// Read-only view of the entry store, for diagnostics.
    fn entries(&self) -> &EntryStore<K, V>;

    /// Verifies that the entry store and the order tracker describe the same keys.
    fn check_invariants(&self) -> Result<(), InvariantError>;
}
