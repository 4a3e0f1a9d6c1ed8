//! evictkit: fixed-capacity in-memory caches with interchangeable eviction policies.
//!
//! | Policy    | Type                                   | Victim on overflow               |
//! |-----------|----------------------------------------|----------------------------------|
//! | Unbounded | [`UnboundedCache`]                     | none                             |
//! | FIFO      | [`FifoCache`]                          | oldest insertion                 |
//! | LIFO      | [`LifoCache`]                          | newest insertion or overwrite    |
//! | LRU       | [`LruCache`]                           | least recently used              |
//! | MRU       | [`MruCache`]                           | most recently used               |
//! | LFU       | [`LfuCache`]                           | lowest frequency, LRU among ties |
//!
//! All of them implement [`CoreCache`]. [`builder::CacheBuilder`] picks a
//! policy at runtime and, by default, prints `DISCARD: <key>` for each
//! eviction.
//!
//! ```
//! use evictkit::prelude::*;
//!
//! let mut cache = LfuCache::new(2);
//! cache.put("a", 1);
//! cache.get(&"a");
//! cache.put("b", 2);
//! cache.put("c", 3);
//! assert!(cache.contains(&"a"));
//! assert!(!cache.contains(&"b"));
//! ```

pub mod builder;
pub mod ds;
pub mod error;
pub mod listener;
pub mod policy;
pub mod prelude;
pub mod report;
pub mod store;
pub mod traits;

pub use crate::ds::{FrequencyBuckets, IntrusiveList, KeyOrder, SlotArena, SlotId};
pub use crate::policy::fifo::FifoCache;
pub use crate::policy::lfu::LfuCache;
pub use crate::policy::lifo::LifoCache;
pub use crate::policy::lru::LruCache;
pub use crate::policy::mru::MruCache;
pub use crate::policy::unbounded::UnboundedCache;
pub use crate::traits::CoreCache;
