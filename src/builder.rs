//! Unified cache builder for all eviction policies.
//!
//! Chooses a policy at runtime (e.g. from a configuration string) and hides
//! which concrete cache type sits underneath. Caches built here report each
//! eviction as a `DISCARD: <key>` line on stdout unless another listener is
//! supplied.
//!
//! ## Example
//!
//! ```rust
//! use evictkit::builder::{CacheBuilder, CachePolicy};
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Lru);
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! ```

use std::fmt::{self, Display};
use std::hash::Hash;
use std::io::{self, Write};
use std::str::FromStr;

use tracing::warn;

use crate::error::{check_capacity, ConfigError, InvariantError};
use crate::listener::{DiscardWriter, EvictionListener};
use crate::policy::fifo::FifoCache;
use crate::policy::lfu::LfuCache;
use crate::policy::lifo::LifoCache;
use crate::policy::lru::LruCache;
use crate::policy::mru::MruCache;
use crate::policy::unbounded::UnboundedCache;
use crate::report;
use crate::store::EntryStore;
use crate::traits::CoreCache;

/// Capacity used when none is configured.
pub const DEFAULT_CAPACITY: usize = 4;

/// Available cache eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CachePolicy {
    /// Never evicts; capacity is ignored.
    Unbounded,
    /// First In, First Out eviction.
    Fifo,
    /// Last In, First Out eviction.
    Lifo,
    /// Least Recently Used eviction.
    #[default]
    Lru,
    /// Most Recently Used eviction.
    Mru,
    /// Least Frequently Used eviction, LRU among ties.
    Lfu,
}

impl CachePolicy {
    /// Every policy, in declaration order.
    pub const ALL: [CachePolicy; 6] = [
        CachePolicy::Unbounded,
        CachePolicy::Fifo,
        CachePolicy::Lifo,
        CachePolicy::Lru,
        CachePolicy::Mru,
        CachePolicy::Lfu,
    ];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            CachePolicy::Unbounded => "unbounded",
            CachePolicy::Fifo => "fifo",
            CachePolicy::Lifo => "lifo",
            CachePolicy::Lru => "lru",
            CachePolicy::Mru => "mru",
            CachePolicy::Lfu => "lfu",
        }
    }

    /// Whether the policy enforces a capacity.
    pub fn is_bounded(self) -> bool {
        !matches!(self, CachePolicy::Unbounded)
    }
}

impl Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for CachePolicy {
    type Err = ConfigError;

    /// Parses a policy name, ignoring case and surrounding whitespace.
    ///
    /// ```
    /// use evictkit::builder::CachePolicy;
    ///
    /// assert_eq!("LRU".parse::<CachePolicy>(), Ok(CachePolicy::Lru));
    /// assert_eq!("basic".parse::<CachePolicy>(), Ok(CachePolicy::Unbounded));
    /// assert!("clock".parse::<CachePolicy>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unbounded" | "basic" | "none" => Ok(CachePolicy::Unbounded),
            "fifo" => Ok(CachePolicy::Fifo),
            "lifo" | "stack" => Ok(CachePolicy::Lifo),
            "lru" => Ok(CachePolicy::Lru),
            "mru" => Ok(CachePolicy::Mru),
            "lfu" => Ok(CachePolicy::Lfu),
            _ => Err(ConfigError::new(format!("unknown cache policy: {s:?}"))),
        }
    }
}

/// Construction-time cache settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    pub capacity: usize,
    pub policy: CachePolicy,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            policy: CachePolicy::default(),
        }
    }
}

impl CacheConfig {
    pub fn new(capacity: usize, policy: CachePolicy) -> Self {
        Self { capacity, policy }
    }

    /// Rejects a zero capacity for bounded policies.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.policy.is_bounded() {
            check_capacity(self.capacity)?;
        }
        Ok(())
    }

    /// Builds the configured cache with the default stdout listener.
    ///
    /// ```
    /// use evictkit::builder::{CacheConfig, CachePolicy};
    /// use evictkit::traits::CoreCache;
    ///
    /// let cache = CacheConfig::default().try_build::<String, i32>().unwrap();
    /// assert_eq!(cache.capacity(), 4);
    /// assert_eq!(cache.policy(), CachePolicy::Lru);
    /// ```
    pub fn try_build<K, V>(&self) -> Result<Cache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone + Display,
    {
        CacheBuilder::new(self.capacity).try_build(self.policy)
    }
}

/// Unified cache wrapper that provides a consistent API regardless of policy.
pub struct Cache<K, V> {
    policy: CachePolicy,
    inner: CacheInner<K, V>,
}

enum CacheInner<K, V> {
    Unbounded(UnboundedCache<K, V>),
    Fifo(FifoCache<K, V>),
    Lifo(LifoCache<K, V>),
    Lru(LruCache<K, V>),
    Mru(MruCache<K, V>),
    Lfu(LfuCache<K, V>),
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// The policy this cache was built with.
    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    fn core(&self) -> &dyn CoreCache<K, V> {
        match &self.inner {
            CacheInner::Unbounded(cache) => cache,
            CacheInner::Fifo(cache) => cache,
            CacheInner::Lifo(cache) => cache,
            CacheInner::Lru(cache) => cache,
            CacheInner::Mru(cache) => cache,
            CacheInner::Lfu(cache) => cache,
        }
    }

    fn core_mut(&mut self) -> &mut dyn CoreCache<K, V> {
        match &mut self.inner {
            CacheInner::Unbounded(cache) => cache,
            CacheInner::Fifo(cache) => cache,
            CacheInner::Lifo(cache) => cache,
            CacheInner::Lru(cache) => cache,
            CacheInner::Mru(cache) => cache,
            CacheInner::Lfu(cache) => cache,
        }
    }

    /// Writes the "Current cache:" dump, keys sorted, to `out`.
    pub fn write_cache<W>(&self, out: &mut W) -> io::Result<()>
    where
        K: Ord + Display,
        V: Display,
        W: Write + ?Sized,
    {
        report::write_sorted(self.entries(), out)
    }

    /// Prints the "Current cache:" dump to stdout.
    pub fn print_cache(&self)
    where
        K: Ord + Display,
        V: Display,
    {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        if let Err(err) = self.write_cache(&mut lock) {
            warn!(error = %err, "failed to print cache");
        }
    }
}

impl<K, V> CoreCache<K, V> for Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn put(&mut self, key: K, value: V) -> Option<V> {
        self.core_mut().put(key, value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        self.core_mut().get(key)
    }

    fn peek(&self, key: &K) -> Option<&V> {
        self.core().peek(key)
    }

    fn contains(&self, key: &K) -> bool {
        self.core().contains(key)
    }

    fn len(&self) -> usize {
        self.core().len()
    }

    fn capacity(&self) -> usize {
        self.core().capacity()
    }

    fn clear(&mut self) {
        self.core_mut().clear();
    }

    fn entries(&self) -> &EntryStore<K, V> {
        self.core().entries()
    }

    fn check_invariants(&self) -> Result<(), InvariantError> {
        self.core().check_invariants()
    }
}

impl<K, V> fmt::Debug for Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("policy", &self.policy)
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

/// Builder for creating cache instances.
///
/// `L` is the eviction listener handed to the built cache; by default a
/// [`DiscardWriter`] on stdout.
pub struct CacheBuilder<L = DiscardWriter<io::Stdout>> {
    capacity: usize,
    listener: L,
}

impl CacheBuilder {
    /// Create a new cache builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            listener: DiscardWriter::stdout(),
        }
    }
}

impl Default for CacheBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<L> CacheBuilder<L> {
    /// Replaces the eviction listener.
    ///
    /// ```
    /// use evictkit::builder::{CacheBuilder, CachePolicy};
    /// use evictkit::listener::DiscardWriter;
    /// use evictkit::traits::CoreCache;
    ///
    /// let mut cache = CacheBuilder::new(1)
    ///     .listener(DiscardWriter::new(std::io::sink()))
    ///     .build::<&str, i32>(CachePolicy::Fifo);
    /// cache.put("a", 1);
    /// cache.put("b", 2);
    /// assert!(!cache.contains(&"a"));
    /// ```
    pub fn listener<M>(self, listener: M) -> CacheBuilder<M> {
        CacheBuilder {
            capacity: self.capacity,
            listener,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Build a cache with the specified policy.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid (zero capacity for a bounded
    /// policy). Use [`try_build`](Self::try_build) to get an error instead.
    ///
    /// # Example
    ///
    /// ```rust
    /// use evictkit::builder::{CacheBuilder, CachePolicy};
    ///
    /// let lru = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Lru);
    /// let lfu = CacheBuilder::default().build::<u64, String>(CachePolicy::Lfu);
    /// assert_eq!(lfu.policy(), CachePolicy::Lfu);
    /// ```
    pub fn build<K, V>(self, policy: CachePolicy) -> Cache<K, V>
    where
        K: Eq + Hash + Clone,
        L: EvictionListener<K, V> + 'static,
    {
        match self.try_build(policy) {
            Ok(cache) => cache,
            Err(err) => panic!("invalid cache configuration: {err}"),
        }
    }

    /// Build a cache with the specified policy, rejecting invalid configuration.
    pub fn try_build<K, V>(self, policy: CachePolicy) -> Result<Cache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
        L: EvictionListener<K, V> + 'static,
    {
        CacheConfig::new(self.capacity, policy).validate()?;

        let capacity = self.capacity;
        let listener: Box<dyn EvictionListener<K, V>> = Box::new(self.listener);
        let inner = match policy {
            CachePolicy::Unbounded => CacheInner::Unbounded(UnboundedCache::new()),
            CachePolicy::Fifo => CacheInner::Fifo(FifoCache::with_boxed_listener(capacity, listener)),
            CachePolicy::Lifo => CacheInner::Lifo(LifoCache::with_boxed_listener(capacity, listener)),
            CachePolicy::Lru => CacheInner::Lru(LruCache::with_boxed_listener(capacity, listener)),
            CachePolicy::Mru => CacheInner::Mru(MruCache::with_boxed_listener(capacity, listener)),
            CachePolicy::Lfu => CacheInner::Lfu(LfuCache::with_boxed_listener(capacity, listener)),
        };

        Ok(Cache { policy, inner })
    }
}

impl<L> fmt::Debug for CacheBuilder<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheBuilder")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
