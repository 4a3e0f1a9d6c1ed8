//! Order-tracking data structures used by the eviction policies.
//!
//! - [`SlotArena`]: slab storage with stable [`SlotId`] handles.
//! - [`IntrusiveList`]: arena-backed doubly linked list.
//! - [`KeyOrder`]: keyed insertion/recency sequence (FIFO, LIFO, LRU, MRU).
//! - [`FrequencyBuckets`]: frequency groups with recency tie-break (LFU).

pub mod frequency_buckets;
pub mod intrusive_list;
pub mod key_order;
pub mod slot_arena;

pub use frequency_buckets::{BucketIter, FrequencyBuckets, DEFAULT_BUCKET_PREALLOC};
pub use intrusive_list::{IntrusiveList, IntrusiveListIter};
pub use key_order::KeyOrder;
pub use slot_arena::{SlotArena, SlotId};
