//! Error types for the object pool

use thiserror::Error;

/// Errors reported when a pool configuration is checked strictly.
///
/// Pool operations themselves never fail; these only surface from
/// [`PoolConfiguration::validate`](crate::PoolConfiguration::validate) and
/// [`Pool::try_with_configuration`](crate::Pool::try_with_configuration).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("Maximum retained size must be greater than zero")]
    ZeroRetentionCeiling,

    #[error("Default acquisition size must be greater than zero")]
    ZeroDefaultSize,

    #[error("Idle object capacity must be greater than zero")]
    ZeroIdleCapacity,

    #[error("Default acquisition size {default_size} exceeds the retention ceiling {max_retained_size}")]
    DefaultExceedsRetention {
        default_size: usize,
        max_retained_size: usize,
    },
}

pub type PoolResult<T> = Result<T, PoolError>;
