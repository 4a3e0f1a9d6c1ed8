//! Eviction policies.
//!
//! Every policy pairs an [`EntryStore`](crate::store::EntryStore) with an
//! order tracker and implements [`CoreCache`](crate::traits::CoreCache).
//!
//! | Module        | Type             | Tracker            |
//! |---------------|------------------|--------------------|
//! | [`unbounded`] | `UnboundedCache` | none               |
//! | [`fifo`]      | `FifoCache`      | `KeyOrder`         |
//! | [`lifo`]      | `LifoCache`      | `KeyOrder`         |
//! | [`lru`]       | `LruCache`       | `KeyOrder`         |
//! | [`mru`]       | `MruCache`       | `KeyOrder`         |
//! | [`lfu`]       | `LfuCache`       | `FrequencyBuckets` |

pub mod fifo;
pub mod lfu;
pub mod lifo;
pub mod lru;
pub mod mru;
pub mod unbounded;

use std::hash::Hash;

use crate::error::InvariantError;
use crate::store::EntryStore;

/// Checks that `store` and a tracker holding `tracked` keys describe the same key set.
pub(crate) fn check_same_keys<K, V>(
    store: &EntryStore<K, V>,
    tracked: usize,
    is_tracked: impl Fn(&K) -> bool,
) -> Result<(), InvariantError>
where
    K: Eq + Hash,
{
    if store.len() != tracked {
        return Err(InvariantError::new(format!(
            "store holds {} entries but tracker holds {}",
            store.len(),
            tracked
        )));
    }
    if store.iter().any(|(key, _)| !is_tracked(key)) {
        return Err(InvariantError::new("store key missing from tracker"));
    }
    Ok(())
}
