//! Traits that teach a [`Pool`](crate::Pool) how to build, size and reset one kind of object

use crate::config::PoolConfiguration;

/// An object kind that can be recycled by a [`Pool`](crate::Pool).
///
/// The pool core only ever calls these hooks; everything kind-specific (how to
/// allocate, what "empty" means, how to stop a timer) lives in the impl.
pub trait Poolable: Send + Sized + 'static {
    /// Whether acquisition sizes mean anything for this kind.
    ///
    /// Unsized kinds (generators, timers) report zero capacity, are never
    /// discarded for size and can be warmed with a size of zero.
    const SIZED: bool = true;

    /// Configuration used by [`Pool::new`](crate::Pool::new) and as the
    /// fallback when normalizing a caller-supplied configuration.
    fn default_configuration() -> PoolConfiguration;

    /// Construct a fresh, empty object with room for at least `capacity` units.
    fn allocate(capacity: usize) -> Self;

    /// Current capacity, compared against the retention ceiling on return.
    fn capacity(&self) -> usize;

    /// Grow so that `capacity()` is at least `capacity`. The object is empty
    /// when this is called.
    fn reserve_capacity(&mut self, capacity: usize);

    /// Clear all observable content while keeping allocated capacity.
    fn reset(&mut self);

    /// Bring an empty object to the observable length `len`.
    ///
    /// Called by [`Pool::get`](crate::Pool::get) after capacity has been
    /// reserved. Kinds without a meaningful length keep the default no-op.
    fn fit_length(&mut self, _len: usize) {}

    /// Whether this is the zero value of its kind, which `put` silently ignores.
    fn is_vacant(&self) -> bool {
        false
    }
}

/// Produces a copy of a pooled object's content that does not share storage
/// with the pool.
///
/// This is the only way [`Pool::with`](crate::Pool::with) lets data out of a
/// pooled object.
pub trait Materialize {
    type Output;

    fn materialize(&self) -> Self::Output;
}
