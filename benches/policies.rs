//! Throughput and hit-rate comparison across eviction policies.
//!
//! Run with `cargo bench --bench policies`.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use evictkit::builder::CachePolicy;
use evictkit::policy::fifo::FifoCache;
use evictkit::policy::lfu::LfuCache;
use evictkit::policy::lifo::LifoCache;
use evictkit::policy::lru::LruCache;
use evictkit::policy::mru::MruCache;
use evictkit::policy::unbounded::UnboundedCache;
use evictkit::traits::CoreCache;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const CAPACITY: usize = 1024;
const UNIVERSE: u64 = 8192;
const OPS: usize = 4096;
const SEED: u64 = 0x5eed;

fn make(policy: CachePolicy, capacity: usize) -> Box<dyn CoreCache<u64, u64>> {
    match policy {
        CachePolicy::Unbounded => Box::new(UnboundedCache::with_capacity(capacity)),
        CachePolicy::Fifo => Box::new(FifoCache::new(capacity)),
        CachePolicy::Lifo => Box::new(LifoCache::new(capacity)),
        CachePolicy::Lru => Box::new(LruCache::new(capacity)),
        CachePolicy::Mru => Box::new(MruCache::new(capacity)),
        CachePolicy::Lfu => Box::new(LfuCache::new(capacity)),
    }
}

/// Keys where `hot_prob` of accesses go to the first `hot_fraction` of the universe.
fn hotset_keys(count: usize, hot_fraction: f64, hot_prob: f64) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(SEED);
    let hot = ((UNIVERSE as f64) * hot_fraction).max(1.0) as u64;
    (0..count)
        .map(|_| {
            if rng.gen_bool(hot_prob) {
                rng.gen_range(0..hot)
            } else {
                rng.gen_range(hot..UNIVERSE)
            }
        })
        .collect()
}

fn uniform_keys(count: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(SEED);
    (0..count).map(|_| rng.gen_range(0..UNIVERSE)).collect()
}

/// Read-through loop: `get`, and `put` on a miss.
fn read_through(cache: &mut dyn CoreCache<u64, u64>, keys: &[u64]) -> u64 {
    let mut hits = 0;
    for &key in keys {
        if cache.get(&key).is_some() {
            hits += 1;
        } else {
            cache.put(key, key);
        }
    }
    hits
}

fn bench_put_full(c: &mut Criterion) {
    let mut group = c.benchmark_group("put_at_capacity");
    group.throughput(Throughput::Elements(CAPACITY as u64));
    for policy in CachePolicy::ALL.into_iter().filter(|p| p.is_bounded()) {
        group.bench_function(BenchmarkId::from_parameter(policy), |b| {
            b.iter_batched(
                || {
                    let mut cache = make(policy, CAPACITY);
                    for i in 0..CAPACITY as u64 {
                        cache.put(i, i);
                    }
                    cache
                },
                |mut cache| {
                    for i in 0..CAPACITY as u64 {
                        cache.put(black_box(i + 10_000), i);
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_get_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_hit");
    group.throughput(Throughput::Elements(CAPACITY as u64));
    for policy in CachePolicy::ALL {
        let mut cache = make(policy, CAPACITY);
        for i in 0..CAPACITY as u64 {
            cache.put(i, i);
        }
        group.bench_function(BenchmarkId::from_parameter(policy), |b| {
            b.iter(|| {
                for i in 0..CAPACITY as u64 {
                    let _ = black_box(cache.get(&black_box(i)));
                }
            })
        });
    }
    group.finish();
}

fn bench_read_through(c: &mut Criterion) {
    let workloads = [
        ("uniform", uniform_keys(OPS)),
        ("hotset_20_80", hotset_keys(OPS, 0.2, 0.8)),
    ];

    let mut group = c.benchmark_group("read_through");
    group.throughput(Throughput::Elements(OPS as u64));
    for (name, keys) in &workloads {
        for policy in CachePolicy::ALL.into_iter().filter(|p| p.is_bounded()) {
            let id = BenchmarkId::new(policy.name(), name);
            group.bench_with_input(id, keys, |b, keys| {
                b.iter_batched(
                    || make(policy, CAPACITY),
                    |mut cache| black_box(read_through(cache.as_mut(), keys)),
                    BatchSize::SmallInput,
                )
            });
        }
    }
    group.finish();

    for (name, keys) in &workloads {
        for policy in CachePolicy::ALL.into_iter().filter(|p| p.is_bounded()) {
            let mut cache = make(policy, CAPACITY);
            let hits = read_through(cache.as_mut(), keys);
            println!(
                "hit rate {name:>14} {policy:>5}: {:.2}%",
                hits as f64 * 100.0 / keys.len() as f64
            );
        }
    }
}

criterion_group!(benches, bench_put_full, bench_get_hit, bench_read_through);
criterion_main!(benches);
