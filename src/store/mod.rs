//! Entry storage for cache policies.
//!
//! Stores focus on key/value ownership and lookup semantics, while policies
//! manage eviction order and metadata. This keeps policy logic independent
//! of how values are stored.

pub mod hashmap;
pub mod metrics;

pub use hashmap::EntryStore;
pub use metrics::StoreMetrics;
