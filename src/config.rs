//! Pool configuration options

use std::borrow::Cow;

use crate::errors::{PoolError, PoolResult};

/// Acquisition size used when neither the caller nor the pooled type supplies one.
pub const DEFAULT_ACQUISITION_SIZE: usize = 4 * 1024;

/// Retention ceiling used when neither the caller nor the pooled type supplies one.
pub const DEFAULT_MAX_RETAINED_SIZE: usize = 1024 * 1024;

/// Number of idle objects a pool keeps unless configured otherwise.
pub const DEFAULT_MAX_IDLE_OBJECTS: usize = 256;

/// Configuration for pool behavior
///
/// # Examples
///
/// ```
/// use scratch_pool::PoolConfiguration;
///
/// let config = PoolConfiguration::new()
///     .with_name("hash-scratch")
///     .with_default_size(32 * 1024)
///     .with_max_retained_size(256 * 1024)
///     .with_max_idle_objects(64)
///     .with_warmup(8);
///
/// assert_eq!(config.default_size, 32 * 1024);
/// assert_eq!(config.warmup_count, Some(8));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfiguration {
    /// Label used in log events and exported metrics
    pub name: Cow<'static, str>,

    /// Size handed out when the caller does not ask for one
    pub default_size: usize,

    /// Objects whose capacity exceeds this are discarded on return
    pub max_retained_size: usize,

    /// Maximum number of idle objects kept by the pool
    pub max_idle_objects: usize,

    /// Number of `default_size` objects to pre-populate on creation
    pub warmup_count: Option<usize>,
}

impl Default for PoolConfiguration {
    fn default() -> Self {
        Self {
            name: Cow::Borrowed("pool"),
            default_size: DEFAULT_ACQUISITION_SIZE,
            max_retained_size: DEFAULT_MAX_RETAINED_SIZE,
            max_idle_objects: DEFAULT_MAX_IDLE_OBJECTS,
            warmup_count: None,
        }
    }
}

impl PoolConfiguration {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pool name
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the default acquisition size
    pub fn with_default_size(mut self, size: usize) -> Self {
        self.default_size = size;
        self
    }

    /// Set the retention ceiling
    ///
    /// # Examples
    ///
    /// ```
    /// use scratch_pool::PoolConfiguration;
    ///
    /// let config = PoolConfiguration::new().with_max_retained_size(1024);
    /// assert_eq!(config.max_retained_size, 1024);
    /// ```
    pub fn with_max_retained_size(mut self, size: usize) -> Self {
        self.max_retained_size = size;
        self
    }

    /// Set the maximum number of idle objects
    pub fn with_max_idle_objects(mut self, count: usize) -> Self {
        self.max_idle_objects = count;
        self
    }

    /// Set warm-up count
    pub fn with_warmup(mut self, count: usize) -> Self {
        self.warmup_count = Some(count);
        self
    }

    /// Replace every zero-valued size with the matching value from `fallback`.
    ///
    /// If `fallback` itself carries a zero, the crate-wide default constant is
    /// used instead, so the result always has positive sizes.
    pub fn normalize(mut self, fallback: &PoolConfiguration) -> Self {
        self.default_size = pick(
            self.default_size,
            fallback.default_size,
            DEFAULT_ACQUISITION_SIZE,
        );
        self.max_retained_size = pick(
            self.max_retained_size,
            fallback.max_retained_size,
            DEFAULT_MAX_RETAINED_SIZE,
        );
        self.max_idle_objects = pick(
            self.max_idle_objects,
            fallback.max_idle_objects,
            DEFAULT_MAX_IDLE_OBJECTS,
        );
        self
    }

    /// Check the configuration without normalizing it
    ///
    /// # Examples
    ///
    /// ```
    /// use scratch_pool::{PoolConfiguration, PoolError};
    ///
    /// let config = PoolConfiguration::new()
    ///     .with_default_size(4096)
    ///     .with_max_retained_size(1024);
    ///
    /// assert!(matches!(
    ///     config.validate(),
    ///     Err(PoolError::DefaultExceedsRetention { .. })
    /// ));
    /// ```
    pub fn validate(&self) -> PoolResult<()> {
        if self.max_retained_size == 0 {
            return Err(PoolError::ZeroRetentionCeiling);
        }
        if self.default_size == 0 {
            return Err(PoolError::ZeroDefaultSize);
        }
        if self.max_idle_objects == 0 {
            return Err(PoolError::ZeroIdleCapacity);
        }
        if self.default_size > self.max_retained_size {
            return Err(PoolError::DefaultExceedsRetention {
                default_size: self.default_size,
                max_retained_size: self.max_retained_size,
            });
        }
        Ok(())
    }
}

fn pick(value: usize, fallback: usize, last_resort: usize) -> usize {
    match (value, fallback) {
        (0, 0) => last_resort,
        (0, fallback) => fallback,
        (value, _) => value,
    }
}
