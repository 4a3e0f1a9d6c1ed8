//! Eviction listener: a callback invoked whenever a policy discards an entry.
//!
//! The listener runs synchronously inside the `put` that triggered the
//! eviction, after the victim has left the cache and before the incoming
//! entry is stored. Overwrites and `clear` do not notify.
//!
//! # Example
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use evictkit::listener::FnListener;
//! use evictkit::policy::fifo::FifoCache;
//! use evictkit::traits::CoreCache;
//!
//! let log: Rc<RefCell<Vec<u32>>> = Rc::default();
//! let sink = Rc::clone(&log);
//!
//! let mut cache: FifoCache<u32, &str> = FifoCache::with_listener(
//!     2,
//!     FnListener(move |key: &u32, _value: &&str| sink.borrow_mut().push(*key)),
//! );
//! cache.put(1, "a");
//! cache.put(2, "b");
//! cache.put(3, "c");
//!
//! assert_eq!(*log.borrow(), vec![1]);
//! ```

use std::fmt::Display;
use std::io::{self, Write};

use tracing::warn;

// ---------------------------------------------------------------------------
// EvictionListener trait
// ---------------------------------------------------------------------------

/// A callback invoked each time a policy evicts an entry to stay within capacity.
///
/// The callback receives the evicted key and a reference to its value; the
/// value is dropped right after the callback returns.
pub trait EvictionListener<K, V> {
    fn on_evict(&mut self, key: &K, value: &V);
}

/// Listener that ignores every eviction.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl<K, V> EvictionListener<K, V> for NoopListener {
    #[inline]
    fn on_evict(&mut self, _key: &K, _value: &V) {}
}

/// An [`EvictionListener`] backed by a closure.
pub struct FnListener<F>(pub F);

impl<K, V, F> EvictionListener<K, V> for FnListener<F>
where
    F: FnMut(&K, &V),
{
    fn on_evict(&mut self, key: &K, value: &V) {
        (self.0)(key, value)
    }
}

// ---------------------------------------------------------------------------
// DiscardWriter
// ---------------------------------------------------------------------------

/// Writes one `DISCARD: <key>` line per eviction.
///
/// This is the notification format the engine shell emits by default (to
/// stdout). Write failures are logged and otherwise ignored; an eviction is
/// never undone because its notification could not be written.
///
/// ```
/// use evictkit::listener::{DiscardWriter, EvictionListener};
///
/// let mut writer = DiscardWriter::new(Vec::new());
/// writer.on_evict(&"page-1", &());
/// assert_eq!(writer.into_inner(), b"DISCARD: page-1\n");
/// ```
#[derive(Debug)]
pub struct DiscardWriter<W> {
    out: W,
}

impl<W: Write> DiscardWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl DiscardWriter<io::Stdout> {
    /// Writes notifications to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<K, V, W> EvictionListener<K, V> for DiscardWriter<W>
where
    K: Display,
    W: Write,
{
    fn on_evict(&mut self, key: &K, _value: &V) {
        if let Err(err) = writeln!(self.out, "DISCARD: {key}") {
            warn!(error = %err, "failed to write eviction notification");
        }
    }
}
