//! Property-based tests for the pool contract.

use proptest::prelude::*;

use scratch_pool::{Pool, PoolConfiguration, ReturnOutcome};

fn bounded_pool(max_retained_size: usize) -> Pool<Vec<u8>> {
    Pool::with_configuration(
        PoolConfiguration::new()
            .with_default_size(64)
            .with_max_retained_size(max_retained_size),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Length equals the request and capacity covers it, fresh or reused.
    #[test]
    fn get_honors_size(first in 0usize..8192, second in 0usize..8192) {
        let pool = bounded_pool(16 * 1024);

        let buf = pool.get(first);
        prop_assert_eq!(buf.len(), first);
        prop_assert!(buf.capacity() >= first);
        pool.put(buf);

        let buf = pool.get(second);
        prop_assert_eq!(buf.len(), second);
        prop_assert!(buf.capacity() >= second);
    }

    /// Whatever the previous borrower wrote is gone after a round trip.
    #[test]
    fn reuse_starts_empty(content in proptest::collection::vec(any::<u8>(), 1..512)) {
        let pool = bounded_pool(4096);

        let mut buf = pool.get_empty(content.len());
        buf.extend_from_slice(&content);
        pool.put(buf);

        let reused = pool.get_empty(1);
        prop_assert!(reused.is_empty());

        let zeroed = pool.get(content.len());
        prop_assert!(zeroed.iter().all(|&b| b == 0));
    }

    /// Objects above the ceiling never come back out of the pool.
    #[test]
    fn oversized_returns_are_never_reused(ceiling in 64usize..4096, excess in 1usize..4096) {
        let pool = bounded_pool(ceiling);

        let oversized = Vec::<u8>::with_capacity(ceiling + excess);
        let capacity = oversized.capacity();
        prop_assert_eq!(pool.put(oversized), ReturnOutcome::Oversized);
        prop_assert_eq!(pool.idle_count(), 0);

        let next = pool.get(ceiling / 2);
        prop_assert!(next.capacity() < capacity);
    }
}

#[test]
fn ceiling_change_then_oversized_put() {
    let pool = bounded_pool(1 << 20);
    pool.set_max_size(1024);
    assert_eq!(pool.max_size(), 1024);

    assert_eq!(pool.put(Vec::<u8>::with_capacity(2048)), ReturnOutcome::Oversized);

    let next = pool.get(100);
    assert!(next.capacity() < 2048);
    assert_eq!(pool.metrics().hits, 0);
}
