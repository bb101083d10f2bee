//! Basic adapter usage example

use breaker_kv::{KvAdapter, MemoryStore, Status, StorageAdapter};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    println!("=== Key-Value Adapter Basic Example ===\n");

    let store = Arc::new(MemoryStore::new());
    let adapter = KvAdapter::builder(store.clone())
        .time_window_secs(10)
        .build();

    println!("--- Reads before any write ---");
    println!("count: {:?}", adapter.load("payment_api.failure"));
    println!("last failure: {:?}", adapter.load_last_failure_time("payment_api"));
    println!("status: {:?}\n", adapter.load_status("payment_api.status"));

    println!("--- Counting failures ---");
    for _ in 0..3 {
        if let Err(e) = adapter.increment("payment_api.failure") {
            println!("✗ {}", e);
        }
    }
    println!("count after 3 increments: {:?}", adapter.load("payment_api.failure"));
    println!(
        "expiry: {:?} seconds\n",
        store.expiry_of("payment_api.failure")
    );

    println!("--- Tripping ---");
    let _ = adapter.save_last_failure_time("payment_api", 1_760_000_000);
    let _ = adapter.save_status("payment_api.status", Status::Tripped);
    println!("status: {:?}\n", adapter.load_status("payment_api.status"));

    println!("--- Reset ---");
    match adapter.reset() {
        Ok(()) => println!("✓ reset"),
        Err(e) => println!("✗ {}", e),
    }
}
