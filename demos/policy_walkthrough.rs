//! Runs the same put/get script against each policy and prints what it discards.
//!
//! ```text
//! cargo run --example policy_walkthrough            # all policies
//! cargo run --example policy_walkthrough -- mru     # one policy
//! RUST_LOG=evictkit=debug cargo run --example policy_walkthrough
//! ```

use evictkit::builder::{CacheConfig, CachePolicy};
use evictkit::traits::CoreCache;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SCRIPT: [(&str, &str); 4] = [
    ("A", "Hello"),
    ("B", "World"),
    ("C", "Holberton"),
    ("D", "School"),
];

fn run(policy: CachePolicy) -> Result<(), Box<dyn std::error::Error>> {
    println!("== {policy} ==");
    let mut cache = CacheConfig {
        policy,
        ..CacheConfig::default()
    }
    .try_build::<&str, &str>()?;

    for (key, value) in SCRIPT {
        cache.put(key, value);
    }
    cache.print_cache();

    cache.get(&"B");
    cache.put("E", "Battery");
    cache.print_cache();

    cache.put("C", "Street");
    cache.get(&"A");
    cache.get(&"B");
    cache.get(&"C");
    cache.put("F", "Mission");
    cache.print_cache();

    cache.put_checked(None, Some("ignored"));
    cache.put_checked(Some("G"), None);
    cache.print_cache();

    info!(
        policy = %policy,
        evictions = cache.entries().metrics().evictions,
        "walkthrough finished"
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "evictkit=info,policy_walkthrough=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let policies: Vec<CachePolicy> = match std::env::args().nth(1) {
        Some(name) => vec![name.parse()?],
        None => CachePolicy::ALL.to_vec(),
    };

    for policy in policies {
        run(policy)?;
        println!();
    }
    Ok(())
}
