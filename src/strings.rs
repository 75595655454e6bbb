//! String-builder pooling

use crate::config::PoolConfiguration;
use crate::pool::Pool;
use crate::poolable::{Materialize, Poolable};

/// Default capacity for pooled strings.
pub const DEFAULT_STRING_CAPACITY: usize = 256;

/// Strings above this capacity are not kept.
pub const MAX_RETAINED_STRING_CAPACITY: usize = 64 * 1024;

/// Pool of reusable `String` builders.
///
/// A string has no meaningful "length N" state, so [`Pool::get`] and
/// [`Pool::get_empty`] both return an empty string with the requested capacity.
pub type StringPool = Pool<String>;

impl Poolable for String {
    fn default_configuration() -> PoolConfiguration {
        PoolConfiguration::new()
            .with_name("strings")
            .with_default_size(DEFAULT_STRING_CAPACITY)
            .with_max_retained_size(MAX_RETAINED_STRING_CAPACITY)
    }

    fn allocate(capacity: usize) -> Self {
        String::with_capacity(capacity)
    }

    fn capacity(&self) -> usize {
        String::capacity(self)
    }

    fn reserve_capacity(&mut self, capacity: usize) {
        self.reserve(capacity.saturating_sub(self.len()));
    }

    fn reset(&mut self) {
        self.clear();
    }

    fn is_vacant(&self) -> bool {
        String::capacity(self) == 0
    }
}

impl Materialize for String {
    type Output = String;

    fn materialize(&self) -> String {
        self.as_str().to_owned()
    }
}
