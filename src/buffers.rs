//! Growable buffer pooling (`bytes::BytesMut`)
//!
//! Buffers hand out a frozen [`Bytes`] copy from the scoped helpers, so the
//! result can be shared cheaply without pinning pooled storage.

use bytes::{Bytes, BytesMut};

use crate::config::PoolConfiguration;
use crate::pool::Pool;
use crate::poolable::{Materialize, Poolable};

/// Default buffer capacity for pooled buffers.
pub const DEFAULT_BUFFER_CAPACITY: usize = 8192;

/// Buffers above this capacity are not kept.
pub const MAX_RETAINED_BUFFER_CAPACITY: usize = 1024 * 1024;

/// Pool of reusable `BytesMut` buffers.
pub type BufferPool = Pool<BytesMut>;

impl Poolable for BytesMut {
    fn default_configuration() -> PoolConfiguration {
        PoolConfiguration::new()
            .with_name("buffers")
            .with_default_size(DEFAULT_BUFFER_CAPACITY)
            .with_max_retained_size(MAX_RETAINED_BUFFER_CAPACITY)
    }

    fn allocate(capacity: usize) -> Self {
        BytesMut::with_capacity(capacity)
    }

    fn capacity(&self) -> usize {
        BytesMut::capacity(self)
    }

    fn reserve_capacity(&mut self, capacity: usize) {
        self.reserve(capacity.saturating_sub(self.len()));
    }

    fn reset(&mut self) {
        self.clear();
    }

    fn fit_length(&mut self, len: usize) {
        self.resize(len, 0);
    }

    fn is_vacant(&self) -> bool {
        BytesMut::capacity(self) == 0
    }
}

impl Materialize for BytesMut {
    type Output = Bytes;

    fn materialize(&self) -> Bytes {
        Bytes::copy_from_slice(self)
    }
}
