//! Basic usage examples for scratch_pool

use std::fmt::Write;
use std::time::Duration;

use rand::Rng;
use scratch_pool::{Pool, PoolConfiguration, Pools};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== scratch_pool - Basic Examples ===\n");

    // Example 1: Checkout guard
    checkout_guard();

    // Example 2: Configured pool with retention ceiling
    configured_pool();

    // Example 3: Scoped helpers
    scoped_helpers();

    // Example 4: Generators and timers
    generators_and_timers();

    // Example 5: Metrics
    metrics();
}

fn checkout_guard() {
    println!("1. Checkout Guard:");
    let pool: Pool<Vec<u8>> = Pool::new();

    {
        let mut buf = pool.checkout(16);
        buf[..5].copy_from_slice(b"hello");
        println!("   Got buffer of length {}", buf.len());
        // Buffer automatically returned when dropped
    }

    println!("   Idle after return: {}\n", pool.idle_count());
}

fn configured_pool() {
    println!("2. Configured Pool:");

    let config = PoolConfiguration::new()
        .with_name("hash-scratch")
        .with_default_size(4096)
        .with_max_retained_size(64 * 1024)
        .with_warmup(4);

    let pool: Pool<Vec<u8>> = Pool::with_configuration(config);
    println!("   Warmed idle objects: {}", pool.idle_count());

    let huge = pool.get(1024 * 1024);
    println!("   Returning 1 MiB buffer: {:?}", pool.put(huge));
    println!("   Idle objects: {}\n", pool.idle_count());
}

fn scoped_helpers() {
    println!("3. Scoped Helpers:");
    let pools = Pools::new();

    let key = pools.strings.with_empty(32, |s| {
        write!(s, "session:{:08x}", 0xC0FFEE).unwrap();
    });
    println!("   Built key: {}", key);

    let frame = pools.buffers.with_empty(16, |buf| buf.extend_from_slice(b"payload"));
    println!("   Frozen frame: {:?}\n", frame);
}

fn generators_and_timers() {
    println!("4. Generators and Timers:");
    let pools = Pools::new();

    let roll = pools.rngs.with_rng(|rng| rng.random_range(1..=6));
    println!("   Rolled: {}", roll);

    let timer = pools.timers.get_armed(Duration::from_millis(5));
    timer.wait();
    pools.timers.put(timer);
    let reused = pools.timers.get_stopped();
    println!("   Reused timer has stale value: {}\n", reused.try_fired().is_some());
}

fn metrics() {
    println!("5. Metrics:");
    let pool: Pool<String> = Pool::new();

    for _ in 0..3 {
        let s = pool.get(64);
        pool.put(s);
    }

    for (key, value) in pool.export_metrics() {
        println!("     {}: {}", key, value);
    }
}
