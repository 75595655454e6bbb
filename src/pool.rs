//! Core recycling pool

use crate::config::PoolConfiguration;
use crate::errors::PoolResult;
use crate::metrics::{MetricsExporter, MetricsTracker, PoolMetrics};
use crate::poolable::{Materialize, Poolable};
use crate::retention::{self, ReturnOutcome};

use arc_swap::ArcSwap;
use crossbeam::queue::ArrayQueue;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, trace};

/// A pooled object that automatically returns to its pool when dropped
pub struct Pooled<'a, T: Poolable> {
    value: Option<T>,
    pool: &'a Pool<T>,
}

impl<'a, T: Poolable> Pooled<'a, T> {
    fn new(value: T, pool: &'a Pool<T>) -> Self {
        Self {
            value: Some(value),
            pool,
        }
    }

    /// Take the inner value without returning it to the pool
    pub fn detach(mut self) -> T {
        self.value.take().expect("Value already taken")
    }
}

impl<T: Poolable> Deref for Pooled<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.value.as_ref().expect("Value already taken")
    }
}

impl<T: Poolable> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.value.as_mut().expect("Value already taken")
    }
}

impl<T: Poolable> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        if let Some(value) = self.value.take() {
            self.pool.put(value);
        }
    }
}

impl<T: Poolable + fmt::Debug> fmt::Debug for Pooled<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pooled")
            .field("value", &self.value)
            .field("pool", &self.pool.name())
            .finish()
    }
}

/// Thread-safe, capacity-bounded pool of reusable objects
///
/// Idle objects live in a lock-free queue. Acquisition never waits: when the
/// queue is empty a new object is constructed. Returned objects are reset and
/// cached unless their capacity exceeds the retention ceiling, in which case
/// they are dropped.
///
/// # Examples
///
/// ```
/// use scratch_pool::Pool;
///
/// let pool: Pool<Vec<u8>> = Pool::new();
///
/// let mut buf = pool.get(16);
/// assert_eq!(buf.len(), 16);
/// buf[0] = 42;
/// pool.put(buf);
///
/// let digest_input = pool.with(4, |buf| buf.copy_from_slice(b"abcd"));
/// assert_eq!(digest_input, b"abcd");
/// ```
pub struct Pool<T: Poolable> {
    idle: ArcSwap<ArrayQueue<T>>,
    name: Cow<'static, str>,
    default_size: usize,
    max_retained_size: AtomicUsize,
    fallback_max_retained_size: usize,
    max_idle_objects: usize,
    metrics: MetricsTracker,
}

impl<T: Poolable> Pool<T> {
    /// Create a pool using the defaults of `T`
    pub fn new() -> Self {
        Self::with_configuration(T::default_configuration())
    }

    /// Create a pool, replacing zero-valued sizes with the defaults of `T`
    pub fn with_configuration(config: PoolConfiguration) -> Self {
        let fallback = Self::fallback_configuration();
        Self::build(config.normalize(&fallback), fallback.max_retained_size)
    }

    /// Create a pool, rejecting a configuration that would need normalizing
    ///
    /// # Examples
    ///
    /// ```
    /// use scratch_pool::{Pool, PoolConfiguration, PoolError};
    ///
    /// let config = PoolConfiguration::new().with_max_retained_size(0);
    /// let result = Pool::<String>::try_with_configuration(config);
    /// assert!(matches!(result, Err(PoolError::ZeroRetentionCeiling)));
    /// ```
    pub fn try_with_configuration(config: PoolConfiguration) -> PoolResult<Self> {
        config.validate()?;
        let fallback = Self::fallback_configuration();
        Ok(Self::build(config, fallback.max_retained_size))
    }

    fn fallback_configuration() -> PoolConfiguration {
        T::default_configuration().normalize(&PoolConfiguration::default())
    }

    fn build(config: PoolConfiguration, fallback_max_retained_size: usize) -> Self {
        let pool = Self {
            idle: ArcSwap::from_pointee(ArrayQueue::new(config.max_idle_objects)),
            name: config.name,
            default_size: config.default_size,
            max_retained_size: AtomicUsize::new(config.max_retained_size),
            fallback_max_retained_size,
            max_idle_objects: config.max_idle_objects,
            metrics: MetricsTracker::new(),
        };

        debug!(
            pool = %pool.name,
            default_size = pool.default_size,
            max_retained_size = config.max_retained_size,
            max_idle_objects = pool.max_idle_objects,
            "pool created"
        );

        if let Some(count) = config.warmup_count {
            pool.warm(count, pool.default_size);
        }

        pool
    }

    /// Get an object whose observable length is `size`
    ///
    /// Capacity is at least `size`. Kinds without a meaningful length (strings,
    /// generators, timers) come back empty.
    pub fn get(&self, size: usize) -> T {
        let mut object = self.acquire(size);
        object.fit_length(size);
        object
    }

    /// Get an object sized to the configured default
    pub fn get_default(&self) -> T {
        self.get(self.default_size)
    }

    /// Get an empty object with at least `min_capacity` capacity, for
    /// append-style construction
    pub fn get_empty(&self, min_capacity: usize) -> T {
        self.acquire(min_capacity)
    }

    fn acquire(&self, min_capacity: usize) -> T {
        self.acquire_with(min_capacity, || T::allocate(min_capacity))
    }

    /// Pop an idle object grown to `min_capacity`, or build one with `create`
    pub(crate) fn acquire_with<F>(&self, min_capacity: usize, create: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self.idle.load().pop() {
            Some(mut object) => {
                self.metrics.record_hit();
                if object.capacity() < min_capacity {
                    object.reserve_capacity(min_capacity);
                }
                object
            }
            None => {
                self.metrics.record_miss();
                create()
            }
        }
    }

    /// Return an object to the pool
    ///
    /// Zero-value objects are ignored. Objects above the retention ceiling are
    /// dropped. Everything else is reset and offered to the current idle cache;
    /// if that cache is full the object is dropped. Never blocks.
    pub fn put(&self, mut object: T) -> ReturnOutcome {
        if let Some(rejected) = retention::screen(&object, self.max_size()) {
            if rejected == ReturnOutcome::Oversized {
                trace!(
                    pool = %self.name,
                    capacity = object.capacity(),
                    max_retained_size = self.max_size(),
                    "discarding oversized object"
                );
            }
            self.metrics.record_return(rejected);
            return rejected;
        }

        object.reset();

        let outcome = match self.idle.load().push(object) {
            Ok(()) => ReturnOutcome::Retained,
            Err(_dropped) => {
                trace!(pool = %self.name, "idle cache full, discarding object");
                ReturnOutcome::Overflow
            }
        };
        self.metrics.record_return(outcome);
        outcome
    }

    /// Change the retention ceiling for future returns
    ///
    /// Zero restores the built-in default. Objects already idle are kept; call
    /// [`drain`](Self::drain) to shed them.
    pub fn set_max_size(&self, max_retained_size: usize) {
        let max_retained_size = if max_retained_size == 0 {
            self.fallback_max_retained_size
        } else {
            max_retained_size
        };
        self.max_retained_size.store(max_retained_size, Ordering::Relaxed);
        debug!(pool = %self.name, max_retained_size, "retention ceiling changed");
    }

    /// Current retention ceiling
    pub fn max_size(&self) -> usize {
        self.max_retained_size.load(Ordering::Relaxed)
    }

    /// Configured default acquisition size
    pub fn default_size(&self) -> usize {
        self.default_size
    }

    /// Pre-populate the pool with `count` objects of `size` capacity
    ///
    /// No-op when `count` is zero, or when `size` is zero for sized kinds.
    /// Stops once the idle cache is full; nothing is allocated past that point.
    pub fn warm(&self, count: usize, size: usize) {
        if count == 0 || (T::SIZED && size == 0) {
            return;
        }

        let room = self.max_idle_objects.saturating_sub(self.idle_count());
        let mut retained = 0;
        for _ in 0..count.min(room) {
            match self.put(T::allocate(size)) {
                ReturnOutcome::Retained => retained += 1,
                ReturnOutcome::Overflow => break,
                ReturnOutcome::Oversized | ReturnOutcome::Ignored => {}
            }
        }

        debug!(pool = %self.name, requested = count, retained, size, "pool warmed");
    }

    /// Replace the idle cache with an empty one, returning how many idle
    /// objects were abandoned
    ///
    /// Objects checked out at the time return to the new cache.
    pub fn drain(&self) -> usize {
        let previous = self
            .idle
            .swap(Arc::new(ArrayQueue::new(self.max_idle_objects)));
        let abandoned = previous.len();
        self.metrics.record_drain();
        debug!(pool = %self.name, abandoned, "pool drained");
        abandoned
    }

    /// Borrow an object of length `size` that returns itself on drop
    pub fn checkout(&self, size: usize) -> Pooled<'_, T> {
        Pooled::new(self.get(size), self)
    }

    /// Borrow an empty object that returns itself on drop
    pub fn checkout_empty(&self, min_capacity: usize) -> Pooled<'_, T> {
        Pooled::new(self.get_empty(min_capacity), self)
    }

    /// Run `f` on an object of length `size` and return a copy of its content
    ///
    /// The object goes back to the pool on every exit path, including a panic
    /// inside `f`, which then continues to unwind.
    pub fn with<F>(&self, size: usize, f: F) -> T::Output
    where
        T: Materialize,
        F: FnOnce(&mut T),
    {
        let mut object = self.checkout(size);
        f(&mut *object);
        object.materialize()
    }

    /// Run `f` on an empty object and return a copy of what it built
    ///
    /// # Examples
    ///
    /// ```
    /// use scratch_pool::Pool;
    /// use std::fmt::Write;
    ///
    /// let pool: Pool<String> = Pool::new();
    /// let id = pool.with_empty(32, |s| {
    ///     write!(s, "job-{:04}", 7).unwrap();
    /// });
    /// assert_eq!(id, "job-0007");
    /// ```
    pub fn with_empty<F>(&self, min_capacity: usize, f: F) -> T::Output
    where
        T: Materialize,
        F: FnOnce(&mut T),
    {
        let mut object = self.checkout_empty(min_capacity);
        f(&mut *object);
        object.materialize()
    }

    /// Run `f` on an object of length `size` and return whatever it computes
    pub fn scoped<F, R>(&self, size: usize, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        let mut object = self.checkout(size);
        f(&mut *object)
    }

    /// Pool name used in logs and metrics
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of idle objects
    pub fn idle_count(&self) -> usize {
        self.idle.load().len()
    }

    /// Get pool metrics
    pub fn metrics(&self) -> PoolMetrics {
        self.metrics
            .snapshot(self.idle_count(), self.max_idle_objects, self.max_size())
    }

    /// Export metrics
    pub fn export_metrics(&self) -> HashMap<String, String> {
        self.metrics().export()
    }

    /// Export metrics in Prometheus format, labelled with the pool name
    pub fn export_metrics_prometheus(&self, tags: Option<&HashMap<String, String>>) -> String {
        MetricsExporter::export_prometheus(&self.metrics(), &self.name, tags)
    }
}

impl<T: Poolable> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Poolable> fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("name", &self.name)
            .field("default_size", &self.default_size)
            .field("max_retained_size", &self.max_size())
            .field("max_idle_objects", &self.max_idle_objects)
            .field("idle", &self.idle_count())
            .finish()
    }
}
