//! Diagnostic dump of cache contents.
//!
//! ```text
//! Current cache:
//! A: Hello
//! B: World
//! ```
//!
//! One `<key>: <value>` line per live entry, keys in ascending order, after a
//! fixed header line. Reading the dump does not touch recency or frequency.

use std::fmt::Display;
use std::hash::Hash;
use std::io::{self, Write};

use crate::store::EntryStore;

/// First line of every dump.
pub const HEADER: &str = "Current cache:";

/// Writes the header and every entry of `store`, sorted by key.
///
/// # Example
///
/// ```
/// use evictkit::report::write_sorted;
/// use evictkit::store::EntryStore;
///
/// let mut store = EntryStore::new();
/// store.set("B", "World");
/// store.set("A", "Hello");
///
/// let mut out = Vec::new();
/// write_sorted(&store, &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "Current cache:\nA: Hello\nB: World\n");
/// ```
pub fn write_sorted<K, V, W>(store: &EntryStore<K, V>, out: &mut W) -> io::Result<()>
where
    K: Eq + Hash + Ord + Display,
    V: Display,
    W: Write + ?Sized,
{
    writeln!(out, "{HEADER}")?;
    for (key, value) in store.sorted() {
        writeln!(out, "{key}: {value}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_prints_header_only() {
        let store: EntryStore<u32, u32> = EntryStore::new();
        let mut out = Vec::new();
        write_sorted(&store, &mut out).unwrap();
        assert_eq!(out, b"Current cache:\n");
    }

    #[test]
    fn numeric_keys_sort_numerically() {
        let mut store = EntryStore::new();
        for key in [10, 2, 33, 1] {
            store.set(key, key * 2);
        }
        let mut out = Vec::new();
        write_sorted(&store, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Current cache:\n1: 2\n2: 4\n10: 20\n33: 66\n"
        );
    }

    #[test]
    fn dump_does_not_count_lookups() {
        let mut store = EntryStore::new();
        store.set("k", 1);
        let mut out = Vec::new();
        write_sorted(&store, &mut out).unwrap();
        let metrics = store.metrics();
        assert_eq!(metrics.hits + metrics.misses, 0);
    }
}
