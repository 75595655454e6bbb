//! Metrics collection and export for pools

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::retention::ReturnOutcome;

/// Metrics snapshot for a pool
///
/// # Examples
///
/// ```
/// use scratch_pool::Pool;
///
/// let pool: Pool<Vec<u8>> = Pool::new();
///
/// let buf = pool.get(128);
/// pool.put(buf);
/// let _again = pool.get(64);
///
/// let metrics = pool.metrics();
/// assert_eq!(metrics.misses, 1);
/// assert_eq!(metrics.hits, 1);
/// assert_eq!(metrics.retained, 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PoolMetrics {
    /// Acquisitions served from an idle object
    pub hits: usize,

    /// Acquisitions that had to construct a new object
    pub misses: usize,

    /// Returns that were reset and cached
    pub retained: usize,

    /// Returns dropped for exceeding the retention ceiling
    pub oversized: usize,

    /// Returns dropped because the idle cache was full
    pub overflowed: usize,

    /// Returns of zero-value objects
    pub ignored: usize,

    /// Number of times the idle cache was drained
    pub drains: usize,

    /// Objects currently idle
    pub idle_objects: usize,

    /// Maximum number of idle objects
    pub max_idle_objects: usize,

    /// Current retention ceiling
    pub max_retained_size: usize,
}

impl PoolMetrics {
    /// Fraction of acquisitions served from the cache (0.0 to 1.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Export metrics as a HashMap
    pub fn export(&self) -> HashMap<String, String> {
        let mut metrics = HashMap::new();
        metrics.insert("hits".to_string(), self.hits.to_string());
        metrics.insert("misses".to_string(), self.misses.to_string());
        metrics.insert("retained".to_string(), self.retained.to_string());
        metrics.insert("oversized".to_string(), self.oversized.to_string());
        metrics.insert("overflowed".to_string(), self.overflowed.to_string());
        metrics.insert("ignored".to_string(), self.ignored.to_string());
        metrics.insert("drains".to_string(), self.drains.to_string());
        metrics.insert("idle_objects".to_string(), self.idle_objects.to_string());
        metrics.insert("max_idle_objects".to_string(), self.max_idle_objects.to_string());
        metrics.insert("max_retained_size".to_string(), self.max_retained_size.to_string());
        metrics.insert("hit_rate".to_string(), format!("{:.2}", self.hit_rate()));
        metrics
    }
}

/// Metrics exporter for Prometheus format
#[derive(Debug)]
pub struct MetricsExporter;

impl MetricsExporter {
    /// Export metrics in Prometheus exposition format
    ///
    /// # Examples
    ///
    /// ```
    /// use scratch_pool::Pool;
    /// use std::collections::HashMap;
    ///
    /// let pool: Pool<String> = Pool::new();
    ///
    /// let mut tags = HashMap::new();
    /// tags.insert("service".to_string(), "api".to_string());
    ///
    /// let output = pool.export_metrics_prometheus(Some(&tags));
    /// assert!(output.contains("scratchpool_objects_idle"));
    /// assert!(output.contains("service=\"api\""));
    /// ```
    pub fn export_prometheus(
        metrics: &PoolMetrics,
        pool_name: &str,
        tags: Option<&HashMap<String, String>>,
    ) -> String {
        let mut output = String::new();
        let labels = Self::format_labels(pool_name, tags);

        let series = [
            // Gauge metrics
            ("objects_idle", "gauge", "Current idle objects", metrics.idle_objects),
            ("objects_idle_max", "gauge", "Maximum idle objects", metrics.max_idle_objects),
            ("retained_size_max", "gauge", "Retention ceiling", metrics.max_retained_size),
            // Counter metrics
            ("hits_total", "counter", "Acquisitions served from the cache", metrics.hits),
            ("misses_total", "counter", "Acquisitions that built a new object", metrics.misses),
            ("returns_retained_total", "counter", "Objects returned and cached", metrics.retained),
            ("returns_oversized_total", "counter", "Returns above the ceiling", metrics.oversized),
            ("returns_overflowed_total", "counter", "Returns to a full cache", metrics.overflowed),
            ("drains_total", "counter", "Cache drains", metrics.drains),
        ];

        for (name, kind, help, value) in series {
            Self::write_metric(&mut output, &labels, name, kind, help, value);
        }

        output
    }

    fn write_metric(
        output: &mut String,
        labels: &str,
        name: &str,
        kind: &str,
        help: &str,
        value: usize,
    ) {
        output.push_str(&format!("# HELP scratchpool_{} {}\n", name, help));
        output.push_str(&format!("# TYPE scratchpool_{} {}\n", name, kind));
        output.push_str(&format!("scratchpool_{}{{{}}} {}\n", name, labels, value));
    }

    fn format_labels(pool_name: &str, tags: Option<&HashMap<String, String>>) -> String {
        let mut labels = vec![format!("pool=\"{}\"", pool_name)];

        if let Some(tags) = tags {
            let mut tags: Vec<_> = tags.iter().collect();
            tags.sort();
            for (key, value) in tags {
                labels.push(format!("{}=\"{}\"", key, value));
            }
        }

        labels.join(",")
    }
}

/// Internal metrics tracker
#[derive(Debug, Default)]
pub(crate) struct MetricsTracker {
    pub hits: AtomicUsize,
    pub misses: AtomicUsize,
    pub retained: AtomicUsize,
    pub oversized: AtomicUsize,
    pub overflowed: AtomicUsize,
    pub ignored: AtomicUsize,
    pub drains: AtomicUsize,
}

impl MetricsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_drain(&self) {
        self.drains.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_return(&self, outcome: ReturnOutcome) {
        let counter = match outcome {
            ReturnOutcome::Retained => &self.retained,
            ReturnOutcome::Oversized => &self.oversized,
            ReturnOutcome::Overflow => &self.overflowed,
            ReturnOutcome::Ignored => &self.ignored,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self, idle: usize, max_idle: usize, max_retained_size: usize) -> PoolMetrics {
        PoolMetrics {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            retained: self.retained.load(Ordering::Relaxed),
            oversized: self.oversized.load(Ordering::Relaxed),
            overflowed: self.overflowed.load(Ordering::Relaxed),
            ignored: self.ignored.load(Ordering::Relaxed),
            drains: self.drains.load(Ordering::Relaxed),
            idle_objects: idle,
            max_idle_objects: max_idle,
            max_retained_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_rate_handles_no_traffic() {
        let metrics = MetricsTracker::new().snapshot(0, 8, 1024);
        assert_eq!(metrics.hit_rate(), 0.0);
    }

    #[test]
    fn hit_rate() {
        let tracker = MetricsTracker::new();
        for _ in 0..3 {
            tracker.record_hit();
        }
        tracker.record_miss();

        let metrics = tracker.snapshot(0, 8, 1024);
        assert!((metrics.hit_rate() - 0.75).abs() < 0.001);
        assert_eq!(metrics.export()["hit_rate"], "0.75");
    }

    #[test]
    fn returns_land_in_matching_counter() {
        let tracker = MetricsTracker::new();
        tracker.record_return(ReturnOutcome::Retained);
        tracker.record_return(ReturnOutcome::Oversized);
        tracker.record_return(ReturnOutcome::Oversized);
        tracker.record_return(ReturnOutcome::Overflow);
        tracker.record_return(ReturnOutcome::Ignored);

        let metrics = tracker.snapshot(1, 8, 1024);
        assert_eq!(metrics.retained, 1);
        assert_eq!(metrics.oversized, 2);
        assert_eq!(metrics.overflowed, 1);
        assert_eq!(metrics.ignored, 1);
    }

    #[test]
    fn prometheus_labels_are_sorted() {
        let metrics = MetricsTracker::new().snapshot(2, 8, 1024);
        let mut tags = HashMap::new();
        tags.insert("zone".to_string(), "b".to_string());
        tags.insert("app".to_string(), "a".to_string());

        let output = MetricsExporter::export_prometheus(&metrics, "bytes", Some(&tags));
        let expected = "scratchpool_objects_idle{pool=\"bytes\",app=\"a\",zone=\"b\"} 2\n";
        assert!(output.contains(expected));
        assert!(output.contains("# TYPE scratchpool_hits_total counter\n"));
    }

    #[test]
    fn prometheus_writes_every_series() {
        let tracker = MetricsTracker::new();
        tracker.record_hit();
        tracker.record_miss();
        tracker.record_miss();
        tracker.record_return(ReturnOutcome::Oversized);
        tracker.record_drain();

        let metrics = tracker.snapshot(3, 8, 1024);
        let output = MetricsExporter::export_prometheus(&metrics, "strings", None);

        let samples: Vec<&str> = output.lines().filter(|line| !line.starts_with('#')).collect();
        assert_eq!(samples.len(), 9);
        assert_eq!(output.matches("# HELP ").count(), 9);
        assert_eq!(output.matches(" gauge\n").count(), 3);
        assert_eq!(output.matches(" counter\n").count(), 6);

        for sample in [
            "scratchpool_objects_idle{pool=\"strings\"} 3",
            "scratchpool_objects_idle_max{pool=\"strings\"} 8",
            "scratchpool_retained_size_max{pool=\"strings\"} 1024",
            "scratchpool_hits_total{pool=\"strings\"} 1",
            "scratchpool_misses_total{pool=\"strings\"} 2",
            "scratchpool_returns_retained_total{pool=\"strings\"} 0",
            "scratchpool_returns_oversized_total{pool=\"strings\"} 1",
            "scratchpool_returns_overflowed_total{pool=\"strings\"} 0",
            "scratchpool_drains_total{pool=\"strings\"} 1",
        ] {
            assert!(samples.contains(&sample), "missing {sample}");
        }
    }
}
