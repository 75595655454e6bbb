//! # scratch_pool
//!
//! Capacity-bounded, lock-free recycling pools for the scratch objects that hot
//! paths keep allocating: byte vectors, `BytesMut` buffers, string builders,
//! random generators and one-shot timers.
//!
//! ## Features
//!
//! - One generic [`Pool`] with the same contract for every kind: `get`,
//!   `get_empty`, `put`, `warm`, `drain`, `set_max_size`
//! - Retention ceiling: returned objects above `max_size()` are dropped so one
//!   oversized use does not bloat the pool
//! - Scoped helpers (`with`, `with_empty`, `scoped`) that release on every exit
//!   path, panics included, and hand back a pool-independent copy
//! - RAII checkout guard ([`Pooled`])
//! - Timers are stopped and drained on return; deterministically seeded
//!   generators are re-seeded on return
//! - Metrics and Prometheus text export
//! - An explicit [`Pools`] registry plus process-wide free functions
//!
//! ## Quick Start
//!
//! ```rust
//! use scratch_pool::Pool;
//!
//! let pool: Pool<Vec<u8>> = Pool::new();
//! {
//!     let mut buf = pool.checkout(1024);
//!     buf[0] = 0xFF;
//!     // Buffer automatically returned when `buf` goes out of scope
//! }
//! assert_eq!(pool.idle_count(), 1);
//! ```

mod buffers;
mod config;
pub mod defaults;
mod errors;
mod metrics;
mod pool;
mod poolable;
mod registry;
mod retention;
mod rng;
mod slices;
mod strings;
mod timer;

pub use buffers::{BufferPool, DEFAULT_BUFFER_CAPACITY, MAX_RETAINED_BUFFER_CAPACITY};
pub use config::{
    PoolConfiguration, DEFAULT_ACQUISITION_SIZE, DEFAULT_MAX_IDLE_OBJECTS,
    DEFAULT_MAX_RETAINED_SIZE,
};
pub use defaults::{
    get_buffer, get_buffer_empty, get_bytes, get_bytes_empty, get_rng, get_rng_with_seed,
    get_stopped_timer, get_string, get_timer, global, put_buffer, put_bytes, put_rng, put_string,
    put_timer, with_buffer, with_buffer_empty, with_bytes, with_bytes_empty, with_rng, with_string,
};
pub use errors::{PoolError, PoolResult};
pub use metrics::{MetricsExporter, PoolMetrics};
pub use pool::{Pool, Pooled};
pub use poolable::{Materialize, Poolable};
pub use registry::Pools;
pub use retention::ReturnOutcome;
pub use rng::{PooledRng, RngPool};
pub use slices::{BytePool, DEFAULT_SLICE_SIZE, MAX_RETAINED_SLICE_SIZE};
pub use strings::{StringPool, DEFAULT_STRING_CAPACITY, MAX_RETAINED_STRING_CAPACITY};
pub use timer::{Timer, TimerPool};
