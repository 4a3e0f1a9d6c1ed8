//! LFU with frequency ties: shows which key goes when several share the
//! lowest count.

use evictkit::listener::DiscardWriter;
use evictkit::policy::lfu::LfuCache;
use evictkit::report::write_sorted;
use evictkit::traits::CoreCache;

fn main() -> std::io::Result<()> {
    let mut cache = LfuCache::with_listener(4, DiscardWriter::stdout());

    for key in ["k1", "k2", "k3", "k4"] {
        cache.put(key, key.to_uppercase());
    }
    cache.get(&"k1");
    cache.get(&"k1");
    cache.get(&"k2");

    if let Some((key, freq)) = cache.peek_lfu() {
        println!("next victim: {key} (frequency {freq})");
    }
    cache.put("k5", "K5".to_string()); // DISCARD: k3
    cache.put("k6", "K6".to_string()); // DISCARD: k4

    for key in ["k1", "k2", "k5", "k6"] {
        println!("{key}: frequency {:?}", cache.frequency(&key));
    }

    let mut out = std::io::stdout().lock();
    write_sorted(cache.entries(), &mut out)
}
