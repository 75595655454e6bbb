//! Retention decisions for objects returned to a pool

use crate::poolable::Poolable;

/// What happened to an object handed to [`Pool::put`](crate::Pool::put).
///
/// # Examples
///
/// ```
/// use scratch_pool::{Pool, PoolConfiguration, ReturnOutcome};
///
/// let pool: Pool<Vec<u8>> =
///     Pool::with_configuration(PoolConfiguration::new().with_max_retained_size(1024));
///
/// assert_eq!(pool.put(Vec::with_capacity(64)), ReturnOutcome::Retained);
/// assert_eq!(pool.put(Vec::with_capacity(4096)), ReturnOutcome::Oversized);
/// assert_eq!(pool.put(Vec::new()), ReturnOutcome::Ignored);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnOutcome {
    /// Reset and cached for reuse
    Retained,

    /// Capacity exceeded the retention ceiling; dropped
    Oversized,

    /// The idle cache was full; dropped
    Overflow,

    /// Zero-value object; nothing to keep
    Ignored,
}

impl ReturnOutcome {
    /// Whether the object is now idle in the pool
    pub fn is_retained(self) -> bool {
        self == ReturnOutcome::Retained
    }
}

/// Decide whether `object` may enter the idle cache under `ceiling`.
///
/// Returns the rejection outcome, or `None` if the object should be reset and
/// offered to the cache. A full cache is only discovered by the push itself.
pub(crate) fn screen<T: Poolable>(object: &T, ceiling: usize) -> Option<ReturnOutcome> {
    if object.is_vacant() {
        return Some(ReturnOutcome::Ignored);
    }

    if T::SIZED && object.capacity() > ceiling {
        return Some(ReturnOutcome::Oversized);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vacant_objects_are_ignored() {
        assert_eq!(screen(&Vec::<u8>::new(), 1024), Some(ReturnOutcome::Ignored));
    }

    #[test]
    fn capacity_at_ceiling_is_kept() {
        let object = Vec::<u8>::with_capacity(1024);
        let ceiling = object.capacity();
        assert_eq!(screen(&object, ceiling), None);
    }

    #[test]
    fn capacity_above_ceiling_is_oversized() {
        let object = Vec::<u8>::with_capacity(2048);
        assert_eq!(screen(&object, 1024), Some(ReturnOutcome::Oversized));
    }

    #[test]
    fn only_retained_counts_as_retained() {
        assert!(ReturnOutcome::Retained.is_retained());
        assert!(!ReturnOutcome::Oversized.is_retained());
        assert!(!ReturnOutcome::Overflow.is_retained());
        assert!(!ReturnOutcome::Ignored.is_retained());
    }
}
