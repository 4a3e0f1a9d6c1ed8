//! Frequency buckets for O(1) LFU tracking.
//!
//! Keys are grouped by access frequency. Each group is a doubly linked list
//! ordered by recency (most recent at the head), and the groups themselves
//! are linked in ascending frequency order, with a running pointer to the
//! lowest non-empty frequency. The eviction candidate is always the tail of
//! the lowest bucket: least frequently used, least recently used among ties.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  index: FxHashMap<K, SlotId>      entries: SlotArena<Entry<K>>      │
//! │    "k1" ─► id_0                     id_0 { freq: 2, prev, next }    │
//! │    "k2" ─► id_1                     id_1 { freq: 1, prev, next }    │
//! │    "k3" ─► id_2                     id_2 { freq: 0, prev, next }    │
//! │    "k4" ─► id_3                     id_3 { freq: 0, prev, next }    │
//! │                                                                     │
//! │  buckets: FxHashMap<u64, Bucket>                                    │
//! │                                                                     │
//! │  min_freq = 0                                                       │
//! │    freq=0: head ─► [id_3] ◄─► [id_2] ◄─ tail   (id_2 evicted next)  │
//! │    freq=1: head ─► [id_1] ◄─ tail                                   │
//! │    freq=2: head ─► [id_0] ◄─ tail                                   │
//! │                                                                     │
//! │  bucket links: 0 ◄─► 1 ◄─► 2                                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Touch flow:
//!
//! ```text
//!   touch("k2"):
//!     1. look up id_1 in index
//!     2. unlink id_1 from freq=1
//!     3. freq=1 now empty → drop bucket, advance min_freq if it pointed there
//!     4. create freq=2 bucket if missing, linked after freq=1's neighbour
//!     5. push id_1 to head of freq=2 (most recent)
//! ```
//!
//! ## Operations
//!
//! | Operation   | Time | Notes                                      |
//! |-------------|------|--------------------------------------------|
//! | `insert`    | O(1) | New key starts at frequency 0              |
//! | `touch`     | O(1) | Frequency + 1, becomes most recent         |
//! | `remove`    | O(1) |                                            |
//! | `peek_min`  | O(1) | Tail of the lowest bucket                  |
//! | `pop_min`   | O(1) |                                            |
//! | `frequency` | O(1) |                                            |
//!
//! ## Example
//!
//! ```
//! use evictkit::ds::FrequencyBuckets;
//!
//! let mut freq = FrequencyBuckets::new();
//! freq.insert("k1");
//! freq.insert("k2");
//! freq.insert("k3");
//!
//! freq.touch(&"k1");
//! assert_eq!(freq.frequency(&"k1"), Some(1));
//! assert_eq!(freq.min_freq(), Some(0));
//!
//! // k2 and k3 tie at 0; k2 was stamped first.
//! assert_eq!(freq.pop_min(), Some(("k2", 0)));
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Entry<K> {
    prev: Option<SlotId>,
    next: Option<SlotId>,
    freq: u64,
    key: K,
}

#[derive(Debug, Default)]
struct Bucket {
    head: Option<SlotId>,
    tail: Option<SlotId>,
    prev: Option<u64>,
    next: Option<u64>,
}

/// O(1) LFU metadata tracker with LRU tie-breaking within a frequency.
#[derive(Debug)]
pub struct FrequencyBuckets<K> {
    entries: SlotArena<Entry<K>>,
    index: FxHashMap<K, SlotId>,
    buckets: FxHashMap<u64, Bucket>,
    min_freq: Option<u64>,
}

/// Default bucket pre-allocation. Most keys cluster at low frequencies.
pub const DEFAULT_BUCKET_PREALLOC: usize = 16;

impl<K> FrequencyBuckets<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self {
            entries: SlotArena::new(),
            index: FxHashMap::default(),
            buckets: FxHashMap::default(),
            min_freq: None,
        }
    }

    /// Creates an empty tracker with reserved capacity for entries and index.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: SlotArena::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            buckets: FxHashMap::with_capacity_and_hasher(
                DEFAULT_BUCKET_PREALLOC,
                Default::default(),
            ),
            min_freq: None,
        }
    }

    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the current frequency of `key`.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        self.entries.get(id).map(|entry| entry.freq)
    }

    /// Returns the lowest frequency held by any tracked key.
    pub fn min_freq(&self) -> Option<u64> {
        self.min_freq
    }

    /// Returns the current eviction candidate without removing it.
    pub fn peek_min(&self) -> Option<(&K, u64)> {
        let freq = self.min_freq?;
        let id = self.buckets.get(&freq)?.tail?;
        self.entries.get(id).map(|entry| (&entry.key, entry.freq))
    }

    /// Iterates `(key, frequency)` for every tracked key in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.entries.iter().map(|(_, entry)| (&entry.key, entry.freq))
    }

    /// Iterates keys in the `freq` bucket from most to least recent.
    pub fn iter_bucket(&self, freq: u64) -> BucketIter<'_, K> {
        BucketIter {
            entries: &self.entries,
            current: self.buckets.get(&freq).and_then(|bucket| bucket.head),
        }
    }

    /// Starts tracking `key` at frequency 0 as the most recent member of that bucket.
    ///
    /// Returns `false` if `key` is already tracked.
    pub fn insert(&mut self, key: K) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }

        let id = self.entries.insert(Entry {
            prev: None,
            next: None,
            freq: 0,
            key: key.clone(),
        });
        self.index.insert(key, id);

        if !self.buckets.contains_key(&0) {
            // 0 is the lowest possible frequency, so the old minimum follows it.
            self.insert_bucket(0, None, self.min_freq);
        }
        self.list_push_front(0, id);
        self.min_freq = Some(0);
        true
    }

    /// Increments the frequency of `key` and returns the new value.
    ///
    /// The key becomes the most recent member of its new bucket. Returns
    /// `None` if `key` is not tracked. Saturates at `u64::MAX`, where a touch
    /// only refreshes recency.
    pub fn touch(&mut self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        let current_freq = self.entries.get(id)?.freq;
        if current_freq == u64::MAX {
            self.list_remove(current_freq, id)?;
            self.list_push_front(current_freq, id);
            return Some(current_freq);
        }
        let next_freq = current_freq + 1;

        let (prev_freq, next_existing) = {
            let bucket = self.buckets.get(&current_freq)?;
            (bucket.prev, bucket.next)
        };

        self.list_remove(current_freq, id)?;
        let bucket_empty = self.bucket_is_empty(current_freq);

        if bucket_empty {
            self.remove_bucket(current_freq, prev_freq, next_existing);
            if self.min_freq == Some(current_freq) {
                self.min_freq = next_existing;
            }
        }

        if !self.buckets.contains_key(&next_freq) {
            let prev = if bucket_empty {
                prev_freq
            } else {
                Some(current_freq)
            };
            self.insert_bucket(next_freq, prev, next_existing);
        }

        if let Some(entry) = self.entries.get_mut(id) {
            entry.freq = next_freq;
        }
        self.list_push_front(next_freq, id);
        if self.min_freq.map_or(true, |min| next_freq < min) {
            self.min_freq = Some(next_freq);
        }

        Some(next_freq)
    }

    /// Stops tracking `key`, returning the frequency it had.
    pub fn remove(&mut self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        let freq = self.entries.get(id)?.freq;
        self.unlink(freq, id)?;
        self.index.remove(key);
        self.entries.remove(id).map(|entry| entry.freq)
    }

    /// Removes and returns the eviction candidate `(key, freq)`.
    ///
    /// The candidate is the least recent key in the lowest-frequency bucket.
    pub fn pop_min(&mut self) -> Option<(K, u64)> {
        let freq = self.min_freq?;
        let id = self.buckets.get(&freq)?.tail?;
        self.unlink(freq, id)?;
        let entry = self.entries.remove(id)?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.freq))
    }

    /// Clears all state.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.buckets.clear();
        self.min_freq = None;
    }

    /// Unlinks `id` from bucket `freq`, dropping the bucket if it empties.
    fn unlink(&mut self, freq: u64, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let bucket = self.buckets.get(&freq)?;
            (bucket.prev, bucket.next)
        };
        self.list_remove(freq, id)?;
        if self.bucket_is_empty(freq) {
            self.remove_bucket(freq, prev, next);
            if self.min_freq == Some(freq) {
                self.min_freq = next;
            }
        }
        Some(())
    }

    fn bucket_is_empty(&self, freq: u64) -> bool {
        self.buckets
            .get(&freq)
            .map(|bucket| bucket.head.is_none())
            .unwrap_or(true)
    }

    fn insert_bucket(&mut self, freq: u64, prev: Option<u64>, next: Option<u64>) {
        self.buckets.insert(
            freq,
            Bucket {
                head: None,
                tail: None,
                prev,
                next,
            },
        );

        if let Some(prev) = prev {
            if let Some(prev_bucket) = self.buckets.get_mut(&prev) {
                prev_bucket.next = Some(freq);
            }
        }
        if let Some(next) = next {
            if let Some(next_bucket) = self.buckets.get_mut(&next) {
                next_bucket.prev = Some(freq);
            }
        }
    }

    fn remove_bucket(&mut self, freq: u64, prev: Option<u64>, next: Option<u64>) {
        if let Some(prev) = prev {
            if let Some(prev_bucket) = self.buckets.get_mut(&prev) {
                prev_bucket.next = next;
            }
        }
        if let Some(next) = next {
            if let Some(next_bucket) = self.buckets.get_mut(&next) {
                next_bucket.prev = prev;
            }
        }
        self.buckets.remove(&freq);
    }

    fn list_push_front(&mut self, freq: u64, id: SlotId) {
        let Some(bucket) = self.buckets.get_mut(&freq) else {
            return;
        };

        let old_head = bucket.head;
        if let Some(entry) = self.entries.get_mut(id) {
            entry.prev = None;
            entry.next = old_head;
        }
        if let Some(old_head) = old_head {
            if let Some(entry) = self.entries.get_mut(old_head) {
                entry.prev = Some(id);
            }
        } else {
            bucket.tail = Some(id);
        }
        bucket.head = Some(id);
    }

    fn list_remove(&mut self, freq: u64, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let entry = self.entries.get(id)?;
            (entry.prev, entry.next)
        };

        let bucket = self.buckets.get_mut(&freq)?;
        if let Some(prev) = prev {
            if let Some(entry) = self.entries.get_mut(prev) {
                entry.next = next;
            }
        } else {
            bucket.head = next;
        }
        if let Some(next) = next {
            if let Some(entry) = self.entries.get_mut(next) {
                entry.prev = prev;
            }
        } else {
            bucket.tail = prev;
        }

        if let Some(entry) = self.entries.get_mut(id) {
            entry.prev = None;
            entry.next = None;
        }

        Some(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.len(), self.index.len());

        if self.is_empty() {
            assert!(self.buckets.is_empty());
            assert_eq!(self.min_freq, None);
            return;
        }

        let min_freq = self.min_freq.expect("non-empty tracker without min_freq");
        assert!(self.buckets.contains_key(&min_freq));

        let mut counted = 0usize;
        for (&freq, bucket) in &self.buckets {
            assert!(bucket.head.is_some());
            assert!(bucket.tail.is_some());
            assert!(freq >= min_freq);
            if let Some(prev) = bucket.prev {
                assert!(prev < freq);
                assert_eq!(self.buckets[&prev].next, Some(freq));
            } else {
                assert_eq!(min_freq, freq);
            }
            if let Some(next) = bucket.next {
                assert!(next > freq);
                assert_eq!(self.buckets[&next].prev, Some(freq));
            }

            let mut current = bucket.head;
            let mut last = None;
            while let Some(id) = current {
                let entry = self.entries.get(id).expect("bucket entry missing");
                assert_eq!(entry.freq, freq);
                assert_eq!(entry.prev, last);
                assert_eq!(self.index.get(&entry.key), Some(&id));
                last = Some(id);
                current = entry.next;
                counted += 1;
            }
            assert_eq!(bucket.tail, last);
        }
        assert_eq!(counted, self.len());
    }
}

impl<K> Default for FrequencyBuckets<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over one frequency bucket, most recent first.
pub struct BucketIter<'a, K> {
    entries: &'a SlotArena<Entry<K>>,
    current: Option<SlotId>,
}

impl<'a, K> Iterator for BucketIter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let entry = self.entries.get(id)?;
        self.current = entry.next;
        Some(&entry.key)
    }
}


#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        /// Property: Invariants hold after any sequence of operations
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_invariants_always_hold(
            ops in prop::collection::vec((0u8..4, 0u32..16), 0..100)
        ) {
            let mut buckets: FrequencyBuckets<u32> = FrequencyBuckets::new();

            for (op, key) in ops {
                match op % 4 {
                    0 => { buckets.insert(key); }
                    1 => { buckets.touch(&key); }
                    2 => { buckets.remove(&key); }
                    3 => { buckets.pop_min(); }
                    _ => unreachable!(),
                }

                buckets.debug_validate_invariants();
            }
        }

        /// Property: pop_min yields keys in non-decreasing frequency order
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_pop_min_is_sorted_by_frequency(
            keys in prop::collection::hash_set(0u32..64, 0..20),
            touches in prop::collection::vec(0u32..64, 0..80)
        ) {
            let mut buckets: FrequencyBuckets<u32> = FrequencyBuckets::new();
            for key in &keys {
                buckets.insert(*key);
            }
            for key in &touches {
                buckets.touch(key);
            }

            let mut last = 0;
            let mut popped = 0;
            while let Some((_, freq)) = buckets.pop_min() {
                prop_assert!(freq >= last);
                last = freq;
                popped += 1;
            }
            prop_assert_eq!(popped, keys.len());
        }

        /// Property: frequency equals the number of touches since insert
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_frequency_counts_touches(key in any::<u32>(), touch_count in 0u64..20) {
            let mut buckets: FrequencyBuckets<u32> = FrequencyBuckets::new();
            buckets.insert(key);
            for i in 0..touch_count {
                prop_assert_eq!(buckets.touch(&key), Some(i + 1));
            }
            prop_assert_eq!(buckets.frequency(&key), Some(touch_count));
        }
    }
}
