//! Pseudo-random generator pooling
//!
//! Constructing a cryptographically seeded generator is far more expensive
//! than drawing a few numbers from it, so ID-style hot paths borrow one from
//! the pool instead.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::config::PoolConfiguration;
use crate::pool::Pool;
use crate::poolable::Poolable;

/// A pooled [`StdRng`] that remembers whether it was seeded deterministically.
///
/// Implements [`RngCore`], so everything in [`rand::Rng`] is available.
#[derive(Debug, Clone)]
pub struct PooledRng {
    inner: StdRng,
    deterministic: bool,
}

impl PooledRng {
    /// Create a generator seeded from the thread-local entropy generator
    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_rng(&mut rand::rng()),
            deterministic: false,
        }
    }

    /// Create a generator producing a reproducible sequence for `seed`
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            deterministic: true,
        }
    }

    /// Restart the sequence from `seed`
    pub fn reseed(&mut self, seed: u64) {
        *self = Self::from_seed(seed);
    }

    /// Whether the current sequence came from an explicit seed
    pub fn is_deterministic(&self) -> bool {
        self.deterministic
    }
}

impl RngCore for PooledRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.inner.fill_bytes(dst);
    }
}

impl Poolable for PooledRng {
    const SIZED: bool = false;

    fn default_configuration() -> PoolConfiguration {
        PoolConfiguration::new().with_name("rng").with_max_idle_objects(64)
    }

    fn allocate(_capacity: usize) -> Self {
        Self::from_entropy()
    }

    fn capacity(&self) -> usize {
        0
    }

    fn reserve_capacity(&mut self, _capacity: usize) {}

    // A reproducible seed must not follow the generator to its next borrower.
    fn reset(&mut self) {
        if self.deterministic {
            *self = Self::from_entropy();
        }
    }
}

/// Pool of reusable random generators.
pub type RngPool = Pool<PooledRng>;

impl Pool<PooledRng> {
    /// Get an entropy-seeded generator
    pub fn get_rng(&self) -> PooledRng {
        self.get(0)
    }

    /// Get a generator producing the reproducible sequence for `seed`
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::Rng;
    /// use scratch_pool::RngPool;
    ///
    /// let pool = RngPool::new();
    /// let mut a = pool.get_with_seed(7);
    /// let mut b = pool.get_with_seed(7);
    /// assert_eq!(a.random::<u64>(), b.random::<u64>());
    /// ```
    pub fn get_with_seed(&self, seed: u64) -> PooledRng {
        let mut rng = self.acquire_with(0, || PooledRng::from_seed(seed));
        if !rng.is_deterministic() {
            rng.reseed(seed);
        }
        rng
    }

    /// Borrow a generator for the duration of `f`
    pub fn with_rng<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut PooledRng) -> R,
    {
        self.scoped(0, f)
    }
}
