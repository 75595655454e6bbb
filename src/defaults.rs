//! Process-wide pools behind free functions
//!
//! The instance is created on first use and lives for the rest of the process.
//! `drain` and `set_max_size` on [`global()`] affect every caller.

use std::sync::OnceLock;
use std::time::Duration;

use bytes::{Bytes, BytesMut};

use crate::registry::Pools;
use crate::retention::ReturnOutcome;
use crate::rng::PooledRng;
use crate::timer::Timer;

static GLOBAL_POOLS: OnceLock<Pools> = OnceLock::new();

/// Get the process-wide pools.
pub fn global() -> &'static Pools {
    GLOBAL_POOLS.get_or_init(Pools::new)
}

/// Get a byte vector of length `size`.
pub fn get_bytes(size: usize) -> Vec<u8> {
    global().bytes.get(size)
}

/// Get an empty byte vector with at least `min_capacity` capacity.
pub fn get_bytes_empty(min_capacity: usize) -> Vec<u8> {
    global().bytes.get_empty(min_capacity)
}

/// Return a byte vector.
pub fn put_bytes(buf: Vec<u8>) -> ReturnOutcome {
    global().bytes.put(buf)
}

/// Fill a pooled byte vector of length `size` and return a copy.
pub fn with_bytes<F: FnOnce(&mut Vec<u8>)>(size: usize, f: F) -> Vec<u8> {
    global().bytes.with(size, f)
}

/// Append into a pooled byte vector and return a copy.
pub fn with_bytes_empty<F: FnOnce(&mut Vec<u8>)>(min_capacity: usize, f: F) -> Vec<u8> {
    global().bytes.with_empty(min_capacity, f)
}

/// Get a buffer of length `size`.
pub fn get_buffer(size: usize) -> BytesMut {
    global().buffers.get(size)
}

/// Get an empty buffer with at least `min_capacity` capacity.
pub fn get_buffer_empty(min_capacity: usize) -> BytesMut {
    global().buffers.get_empty(min_capacity)
}

/// Return a buffer.
pub fn put_buffer(buf: BytesMut) -> ReturnOutcome {
    global().buffers.put(buf)
}

/// Fill a pooled buffer of length `size` and return a frozen copy.
pub fn with_buffer<F: FnOnce(&mut BytesMut)>(size: usize, f: F) -> Bytes {
    global().buffers.with(size, f)
}

/// Append into a pooled buffer and return a frozen copy.
pub fn with_buffer_empty<F: FnOnce(&mut BytesMut)>(min_capacity: usize, f: F) -> Bytes {
    global().buffers.with_empty(min_capacity, f)
}

/// Get an empty string builder with at least `min_capacity` capacity.
pub fn get_string(min_capacity: usize) -> String {
    global().strings.get_empty(min_capacity)
}

/// Return a string builder.
pub fn put_string(s: String) -> ReturnOutcome {
    global().strings.put(s)
}

/// Build a string in a pooled builder and return an owned copy.
///
/// # Examples
///
/// ```
/// let greeting = scratch_pool::with_string(16, |s| {
///     s.push_str("hello, ");
///     s.push_str("pool");
/// });
/// assert_eq!(greeting, "hello, pool");
/// ```
pub fn with_string<F: FnOnce(&mut String)>(min_capacity: usize, f: F) -> String {
    global().strings.with_empty(min_capacity, f)
}

/// Get an entropy-seeded random generator.
pub fn get_rng() -> PooledRng {
    global().rngs.get_rng()
}

/// Get a random generator producing the sequence for `seed`.
pub fn get_rng_with_seed(seed: u64) -> PooledRng {
    global().rngs.get_with_seed(seed)
}

/// Return a random generator.
pub fn put_rng(rng: PooledRng) -> ReturnOutcome {
    global().rngs.put(rng)
}

/// Borrow a random generator for the duration of `f`.
pub fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut PooledRng) -> R,
{
    global().rngs.with_rng(f)
}

/// Get a timer armed to fire after `duration`.
pub fn get_timer(duration: Duration) -> Timer {
    global().timers.get_armed(duration)
}

/// Get a timer that is not armed.
pub fn get_stopped_timer() -> Timer {
    global().timers.get_stopped()
}

/// Return a timer; it is stopped and drained first.
pub fn put_timer(timer: Timer) -> ReturnOutcome {
    global().timers.put(timer)
}
