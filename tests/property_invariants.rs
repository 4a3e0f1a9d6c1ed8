// ==============================================
// PROPERTY TESTS (integration)
// ==============================================
//
// Random operation sequences against every policy. Checks the capacity
// bound, store/tracker correspondence, rejected puts, and each policy
// against a straightforward reference model built on a Vec.

use std::cell::RefCell;
use std::rc::Rc;

use evictkit::listener::FnListener;
use evictkit::policy::fifo::FifoCache;
use evictkit::policy::lfu::LfuCache;
use evictkit::policy::lifo::LifoCache;
use evictkit::policy::lru::LruCache;
use evictkit::policy::mru::MruCache;
use evictkit::policy::unbounded::UnboundedCache;
use evictkit::traits::CoreCache;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Put(u8, u16),
    Get(u8),
    PutChecked(Option<u8>, Option<u16>),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u8..12, any::<u16>()).prop_map(|(k, v)| Op::Put(k, v)),
        4 => (0u8..12).prop_map(Op::Get),
        1 => (proptest::option::of(0u8..12), proptest::option::of(any::<u16>()))
            .prop_map(|(k, v)| Op::PutChecked(k, v)),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Fifo,
    Lifo,
    Lru,
    Mru,
    Lfu,
}

const KINDS: [Kind; 5] = [Kind::Fifo, Kind::Lifo, Kind::Lru, Kind::Mru, Kind::Lfu];

type Victims = Rc<RefCell<Vec<u8>>>;

fn build(kind: Kind, capacity: usize) -> (Box<dyn CoreCache<u8, u16>>, Victims) {
    let victims: Victims = Rc::default();
    let sink = Rc::clone(&victims);
    let listener = FnListener(move |k: &u8, _: &u16| sink.borrow_mut().push(*k));
    let cache: Box<dyn CoreCache<u8, u16>> = match kind {
        Kind::Fifo => Box::new(FifoCache::with_listener(capacity, listener)),
        Kind::Lifo => Box::new(LifoCache::with_listener(capacity, listener)),
        Kind::Lru => Box::new(LruCache::with_listener(capacity, listener)),
        Kind::Mru => Box::new(MruCache::with_listener(capacity, listener)),
        Kind::Lfu => Box::new(LfuCache::with_listener(capacity, listener)),
    };
    (cache, victims)
}

/// Reference model: entries in a Vec, each with a frequency and a logical
/// stamp. Victim selection scans the whole Vec.
struct Model {
    kind: Kind,
    capacity: usize,
    clock: u64,
    // (key, value, freq, stamp)
    entries: Vec<(u8, u16, u64, u64)>,
}

impl Model {
    fn new(kind: Kind, capacity: usize) -> Self {
        Self {
            kind,
            capacity,
            clock: 0,
            entries: Vec::new(),
        }
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn restamps_on_get(&self) -> bool {
        matches!(self.kind, Kind::Lru | Kind::Mru | Kind::Lfu)
    }

    fn restamps_on_overwrite(&self) -> bool {
        !matches!(self.kind, Kind::Fifo)
    }

    fn victim(&self) -> Option<usize> {
        let ranked = self.entries.iter().enumerate();
        match self.kind {
            Kind::Fifo | Kind::Lru => ranked.min_by_key(|(_, e)| e.3),
            Kind::Lifo | Kind::Mru => ranked.max_by_key(|(_, e)| e.3),
            Kind::Lfu => ranked.min_by_key(|(_, e)| (e.2, e.3)),
        }
        .map(|(i, _)| i)
    }

    fn put(&mut self, key: u8, value: u16) -> Option<u8> {
        let stamp = self.tick();
        let restamp = self.restamps_on_overwrite();
        if let Some(entry) = self.entries.iter_mut().find(|e| e.0 == key) {
            entry.1 = value;
            entry.2 += 1;
            if restamp {
                entry.3 = stamp;
            }
            return None;
        }
        let mut evicted = None;
        if self.entries.len() >= self.capacity {
            if let Some(idx) = self.victim() {
                evicted = Some(self.entries.remove(idx).0);
            }
        }
        self.entries.push((key, value, 0, stamp));
        evicted
    }

    fn get(&mut self, key: u8) -> Option<u16> {
        let stamp = self.tick();
        let restamp = self.restamps_on_get();
        let entry = self.entries.iter_mut().find(|e| e.0 == key)?;
        entry.2 += 1;
        if restamp {
            entry.3 = stamp;
        }
        Some(entry.1)
    }
}

proptest! {
    /// Property: every bounded policy agrees with the reference model on
    /// lookups, victims and length.
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_matches_reference_model(
        capacity in 1usize..6,
        ops in prop::collection::vec(op_strategy(), 0..200)
    ) {
        for kind in KINDS {
            let (mut cache, victims) = build(kind, capacity);
            let mut model = Model::new(kind, capacity);
            let mut expected_victims = Vec::new();

            for op in &ops {
                match *op {
                    Op::Put(k, v) | Op::PutChecked(Some(k), Some(v)) => {
                        cache.put(k, v);
                        expected_victims.extend(model.put(k, v));
                    }
                    Op::PutChecked(k, v) => {
                        let before = cache.len();
                        prop_assert_eq!(cache.put_checked(k, v), None);
                        prop_assert_eq!(cache.len(), before);
                    }
                    Op::Get(k) => {
                        prop_assert_eq!(cache.get(&k).copied(), model.get(k), "{:?}", kind);
                    }
                }
                prop_assert!(cache.len() <= capacity);
                prop_assert_eq!(cache.len(), model.entries.len());
                prop_assert!(cache.check_invariants().is_ok());
            }

            prop_assert_eq!(&*victims.borrow(), &expected_victims, "{:?}", kind);
        }
    }

    /// Property: below capacity, every bounded policy answers like the
    /// unbounded baseline and never evicts.
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_agrees_with_unbounded_below_capacity(
        ops in prop::collection::vec(op_strategy(), 0..100)
    ) {
        for kind in KINDS {
            let (mut cache, victims) = build(kind, 12);
            let mut baseline = UnboundedCache::new();

            for op in &ops {
                match *op {
                    Op::Put(k, v) => {
                        prop_assert_eq!(cache.put(k, v), baseline.put(k, v));
                    }
                    Op::PutChecked(k, v) => {
                        prop_assert_eq!(cache.put_checked(k, v), baseline.put_checked(k, v));
                    }
                    Op::Get(k) => {
                        prop_assert_eq!(cache.get(&k), baseline.get(&k));
                    }
                }
            }
            prop_assert!(victims.borrow().is_empty());
            prop_assert_eq!(cache.len(), baseline.len());
        }
    }

    /// Property: gets never change the key set.
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_gets_do_not_change_membership(
        keys in prop::collection::vec(0u8..12, 1..20),
        reads in prop::collection::vec(0u8..12, 0..50)
    ) {
        for kind in KINDS {
            let (mut cache, victims) = build(kind, 4);
            for &k in &keys {
                cache.put(k, u16::from(k));
            }
            let evicted_before = victims.borrow().len();
            let mut before: Vec<u8> = cache.entries().iter().map(|(k, _)| *k).collect();
            before.sort_unstable();

            for k in &reads {
                cache.get(k);
            }

            let mut after: Vec<u8> = cache.entries().iter().map(|(k, _)| *k).collect();
            after.sort_unstable();
            prop_assert_eq!(before, after);
            prop_assert_eq!(victims.borrow().len(), evicted_before);
        }
    }
}
