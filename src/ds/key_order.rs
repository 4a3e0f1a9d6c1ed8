//! Keyed sequence tracker shared by the FIFO, LIFO, LRU and MRU policies.
//!
//! Records the order in which keys were last *stamped* (inserted, or touched
//! when the policy re-stamps on access). The oldest stamp sits at the front,
//! the newest at the back, and a hash index gives O(1) access to any key's
//! node so it can be moved or unlinked without a scan.
//!
//! ```text
//!   index: FxHashMap<K, SlotId>
//!   ┌──────┬────────┐
//!   │ "k1" │  id_0  │──┐
//!   │ "k2" │  id_1  │──┼──┐
//!   │ "k3" │  id_2  │──┼──┼──┐
//!   └──────┴────────┘  │  │  │
//!                      ▼  ▼  ▼
//!   list:   oldest ─► [k1] ◄─► [k2] ◄─► [k3] ◄─ newest
//! ```
//!
//! Which end a policy evicts from is the policy's decision:
//!
//! | Policy | Stamps on          | Evicts        |
//! |--------|--------------------|---------------|
//! | FIFO   | insert             | `pop_oldest`  |
//! | LIFO   | insert, overwrite  | `pop_newest`  |
//! | LRU    | insert, put, get   | `pop_oldest`  |
//! | MRU    | insert, put, get   | `pop_newest`  |
//!
//! ## Example
//!
//! ```
//! use evictkit::ds::KeyOrder;
//!
//! let mut order = KeyOrder::new();
//! order.push_newest("a");
//! order.push_newest("b");
//! order.push_newest("c");
//!
//! order.touch(&"a");
//! assert_eq!(order.oldest(), Some(&"b"));
//! assert_eq!(order.newest(), Some(&"a"));
//! assert_eq!(order.pop_oldest(), Some("b"));
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::intrusive_list::{IntrusiveList, IntrusiveListIter};
use crate::ds::slot_arena::SlotId;

/// Insertion/recency order over a set of distinct keys.
#[derive(Debug)]
pub struct KeyOrder<K> {
    list: IntrusiveList<K>,
    index: FxHashMap<K, SlotId>,
}

impl<K> KeyOrder<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            list: IntrusiveList::new(),
            index: FxHashMap::default(),
        }
    }

    /// Creates an empty tracker with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            list: IntrusiveList::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Appends `key` at the newest end.
    ///
    /// Returns `false` and leaves the order untouched if `key` is already tracked.
    pub fn push_newest(&mut self, key: K) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        let id = self.list.push_back(key.clone());
        self.index.insert(key, id);
        true
    }

    /// Moves `key` to the newest end. Returns `false` if `key` is not tracked.
    pub fn touch(&mut self, key: &K) -> bool {
        match self.index.get(key) {
            Some(&id) => self.list.move_to_back(id),
            None => false,
        }
    }

    pub fn oldest(&self) -> Option<&K> {
        self.list.front()
    }

    pub fn newest(&self) -> Option<&K> {
        self.list.back()
    }

    /// Unlinks and returns the key with the oldest stamp.
    pub fn pop_oldest(&mut self) -> Option<K> {
        let key = self.list.pop_front()?;
        self.index.remove(&key);
        Some(key)
    }

    /// Unlinks and returns the key with the newest stamp.
    pub fn pop_newest(&mut self) -> Option<K> {
        let key = self.list.pop_back()?;
        self.index.remove(&key);
        Some(key)
    }

    /// Stops tracking `key`. Returns `false` if it was not tracked.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.index.remove(key) {
            Some(id) => self.list.remove(id).is_some(),
            None => false,
        }
    }

    /// Zero-based rank of `key` counted from the oldest end. O(n).
    pub fn position(&self, key: &K) -> Option<usize> {
        if !self.index.contains_key(key) {
            return None;
        }
        self.list.iter().position(|k| k == key)
    }

    /// Iterates keys from oldest to newest.
    pub fn iter(&self) -> IntrusiveListIter<'_, K> {
        self.list.iter()
    }

    pub fn clear(&mut self) {
        self.list.clear();
        self.index.clear();
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.list.debug_validate_invariants();
        assert_eq!(self.list.len(), self.index.len());
        for (key, &id) in &self.index {
            assert!(self.list.get(id) == Some(key), "index points at wrong node");
        }
    }
}

impl<K> Default for KeyOrder<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
