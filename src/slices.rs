//! Byte-slice pooling (`Vec<u8>`)

use crate::config::PoolConfiguration;
use crate::pool::Pool;
use crate::poolable::{Materialize, Poolable};

/// Default scratch size for byte slices, sized for streaming file hashing.
pub const DEFAULT_SLICE_SIZE: usize = 32 * 1024;

/// Byte slices above this capacity are not kept.
pub const MAX_RETAINED_SLICE_SIZE: usize = 1024 * 1024;

/// Pool of reusable byte vectors.
pub type BytePool = Pool<Vec<u8>>;

impl Poolable for Vec<u8> {
    fn default_configuration() -> PoolConfiguration {
        PoolConfiguration::new()
            .with_name("bytes")
            .with_default_size(DEFAULT_SLICE_SIZE)
            .with_max_retained_size(MAX_RETAINED_SLICE_SIZE)
    }

    fn allocate(capacity: usize) -> Self {
        Vec::with_capacity(capacity)
    }

    fn capacity(&self) -> usize {
        Vec::capacity(self)
    }

    fn reserve_capacity(&mut self, capacity: usize) {
        self.reserve(capacity.saturating_sub(self.len()));
    }

    fn reset(&mut self) {
        self.clear();
    }

    // Bytes past the old length are zero-filled; callers still overwrite
    // before reading.
    fn fit_length(&mut self, len: usize) {
        self.resize(len, 0);
    }

    fn is_vacant(&self) -> bool {
        Vec::capacity(self) == 0
    }
}

impl Materialize for Vec<u8> {
    type Output = Vec<u8>;

    fn materialize(&self) -> Vec<u8> {
        self.as_slice().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let pool = BytePool::new();
        assert_eq!(pool.name(), "bytes");
        assert_eq!(pool.default_size(), DEFAULT_SLICE_SIZE);
        assert_eq!(pool.max_size(), MAX_RETAINED_SLICE_SIZE);
    }

    #[test]
    fn get_sets_length_and_capacity() {
        let pool = BytePool::new();
        for size in [0, 1, 100, DEFAULT_SLICE_SIZE, 3 * DEFAULT_SLICE_SIZE] {
            let buf = pool.get(size);
            assert_eq!(buf.len(), size);
            assert!(buf.capacity() >= size);
            pool.put(buf);
        }
    }

    #[test]
    fn shrinking_reuse_keeps_capacity() {
        let pool = BytePool::new();
        let buf = pool.get(4096);
        let capacity = buf.capacity();
        pool.put(buf);

        let smaller = pool.get(10);
        assert_eq!(smaller.len(), 10);
        assert_eq!(smaller.capacity(), capacity);
    }

    #[test]
    fn with_empty_collects_appended_bytes() {
        let pool = BytePool::new();
        let out = pool.with_empty(8, |buf| {
            buf.extend_from_slice(b"hello ");
            buf.extend_from_slice(b"world");
        });
        assert_eq!(out, b"hello world");
        assert_eq!(pool.idle_count(), 1);
    }

    #[test]
    fn materialized_copy_is_detached() {
        let buf = vec![1u8, 2, 3];
        let copy = buf.materialize();
        assert_ne!(copy.as_ptr(), buf.as_ptr());
        assert_eq!(copy, buf);
    }
}
