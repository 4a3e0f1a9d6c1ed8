pub use crate::builder::{Cache, CacheBuilder, CacheConfig, CachePolicy, DEFAULT_CAPACITY};
pub use crate::ds::{FrequencyBuckets, IntrusiveList, KeyOrder, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::listener::{DiscardWriter, EvictionListener, FnListener, NoopListener};
pub use crate::policy::fifo::FifoCache;
pub use crate::policy::lfu::LfuCache;
pub use crate::policy::lifo::LifoCache;
pub use crate::policy::lru::LruCache;
pub use crate::policy::mru::MruCache;
pub use crate::policy::unbounded::UnboundedCache;
pub use crate::store::{EntryStore, StoreMetrics};
pub use crate::traits::CoreCache;
