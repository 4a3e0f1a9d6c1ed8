//! Store-level counters.
//!
//! Counters live in `Cell`s so read paths that only hold `&self` (lookups,
//! inspection) can still record hits and misses. The caches are
//! single-threaded, so no atomics are needed.

use std::cell::Cell;

/// Snapshot of store-level metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreMetrics {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub updates: u64,
    pub removes: u64,
    pub evictions: u64,
}

impl StoreMetrics {
    /// Fraction of lookups that found a value, or `None` before any lookup.
    pub fn hit_ratio(&self) -> Option<f64> {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            None
        } else {
            Some(self.hits as f64 / lookups as f64)
        }
    }
}

#[repr(transparent)]
#[derive(Debug, Default)]
pub(crate) struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub(crate) fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub(crate) fn incr(&self) {
        self.0.set(self.0.get().saturating_add(1));
    }
}

#[derive(Debug, Default)]
pub(crate) struct StoreCounters {
    pub(crate) hits: MetricsCell,
    pub(crate) misses: MetricsCell,
    pub(crate) inserts: MetricsCell,
    pub(crate) updates: MetricsCell,
    pub(crate) removes: MetricsCell,
    pub(crate) evictions: MetricsCell,
}

impl StoreCounters {
    pub(crate) fn snapshot(&self) -> StoreMetrics {
        StoreMetrics {
            hits: self.hits.get(),
            misses: self.misses.get(),
            inserts: self.inserts.get(),
            updates: self.updates.get(),
            removes: self.removes.get(),
            evictions: self.evictions.get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_increments() {
        let counters = StoreCounters::default();
        counters.hits.incr();
        counters.hits.incr();
        counters.misses.incr();
        counters.evictions.incr();

        let snap = counters.snapshot();
        assert_eq!(snap.hits, 2);
        assert_eq!(snap.misses, 1);
        assert_eq!(snap.evictions, 1);
        assert_eq!(snap.inserts, 0);
    }

    #[test]
    fn hit_ratio() {
        assert_eq!(StoreMetrics::default().hit_ratio(), None);
        let snap = StoreMetrics {
            hits: 3,
            misses: 1,
            ..StoreMetrics::default()
        };
        assert_eq!(snap.hit_ratio(), Some(0.75));
    }
}
