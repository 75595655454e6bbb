//! A set of pools, one per pooled kind

use std::collections::HashMap;

use bytes::BytesMut;

use crate::metrics::PoolMetrics;
use crate::pool::Pool;
use crate::rng::PooledRng;
use crate::timer::Timer;

/// One pool per pooled kind, constructed once and passed to whatever needs it
///
/// Tests and embedders create their own `Pools` to stay isolated; the
/// process-wide instance behind [`crate::defaults`] is just another `Pools`.
///
/// # Examples
///
/// ```
/// use scratch_pool::Pools;
///
/// let pools = Pools::new();
/// let line = pools.strings.with_empty(64, |s| s.push_str("ready"));
/// assert_eq!(line, "ready");
///
/// pools.drain_all();
/// assert_eq!(pools.strings.idle_count(), 0);
/// ```
#[derive(Debug, Default)]
pub struct Pools {
    pub bytes: Pool<Vec<u8>>,
    pub buffers: Pool<BytesMut>,
    pub strings: Pool<String>,
    pub rngs: Pool<PooledRng>,
    pub timers: Pool<Timer>,
}

impl Pools {
    /// Create every pool with its kind's defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain every pool, returning the total number of idle objects abandoned
    pub fn drain_all(&self) -> usize {
        self.bytes.drain()
            + self.buffers.drain()
            + self.strings.drain()
            + self.rngs.drain()
            + self.timers.drain()
    }

    /// Metrics for every pool, keyed by pool name
    pub fn metrics(&self) -> HashMap<String, PoolMetrics> {
        [
            (self.bytes.name(), self.bytes.metrics()),
            (self.buffers.name(), self.buffers.metrics()),
            (self.strings.name(), self.strings.metrics()),
            (self.rngs.name(), self.rngs.metrics()),
            (self.timers.name(), self.timers.metrics()),
        ]
        .into_iter()
        .map(|(name, metrics)| (name.to_string(), metrics))
        .collect()
    }

    /// Prometheus exposition for every pool
    pub fn export_metrics_prometheus(&self, tags: Option<&HashMap<String, String>>) -> String {
        [
            self.bytes.export_metrics_prometheus(tags),
            self.buffers.export_metrics_prometheus(tags),
            self.strings.export_metrics_prometheus(tags),
            self.rngs.export_metrics_prometheus(tags),
            self.timers.export_metrics_prometheus(tags),
        ]
        .concat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pools_are_independent() {
        let a = Pools::new();
        let b = Pools::new();

        a.bytes.warm(2, 64);
        assert_eq!(a.bytes.idle_count(), 2);
        assert_eq!(b.bytes.idle_count(), 0);
    }

    #[test]
    fn drain_all_counts_everything() {
        let pools = Pools::new();
        pools.bytes.warm(1, 64);
        pools.strings.warm(2, 64);
        pools.timers.warm(3, 0);

        assert_eq!(pools.drain_all(), 6);
    }

    #[test]
    fn metrics_keyed_by_name() {
        let pools = Pools::new();
        let metrics = pools.metrics();
        for name in ["bytes", "buffers", "strings", "rng", "timers"] {
            assert!(metrics.contains_key(name), "missing {name}");
        }
    }

    #[test]
    fn prometheus_covers_all_pools() {
        let output = Pools::new().export_metrics_prometheus(None);
        assert!(output.contains("pool=\"buffers\""));
        assert!(output.contains("pool=\"timers\""));
    }
}
