//! One-shot timer pooling
//!
//! A [`Timer`] delivers a single [`Instant`] on its channel once its deadline
//! passes. The pool stops every returned timer and drains a fired-but-unread
//! value without blocking, so the next borrower never sees a stale wake-up.

use std::time::{Duration, Instant};

use crossbeam::channel::{self, Receiver};

use crate::config::PoolConfiguration;
use crate::pool::Pool;
use crate::poolable::Poolable;

/// A resettable one-shot timer.
///
/// # Examples
///
/// ```
/// use scratch_pool::Timer;
/// use std::time::Duration;
///
/// let mut timer = Timer::stopped();
/// assert!(!timer.is_armed());
///
/// timer.reset(Duration::from_millis(1));
/// assert!(timer.wait().is_some());
/// ```
#[derive(Debug)]
pub struct Timer {
    rx: Receiver<Instant>,
    arming: Arming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arming {
    Stopped,
    At(Instant),
    // Deadline past what `Instant` can represent; armed but never fires.
    Never,
}

impl Timer {
    /// Create a timer that fires after `duration`
    pub fn new(duration: Duration) -> Self {
        let mut timer = Self::stopped();
        timer.reset(duration);
        timer
    }

    /// Create a timer that is not armed
    pub fn stopped() -> Self {
        Self {
            rx: channel::never(),
            arming: Arming::Stopped,
        }
    }

    /// Arm the timer to fire after `duration`, discarding any pending value
    ///
    /// Returns whether the timer was armed and had not yet fired. A duration
    /// too large to add to the current instant (such as `Duration::MAX`) arms
    /// a timer that never fires.
    pub fn reset(&mut self, duration: Duration) -> bool {
        let was_pending = self.stop();
        match Instant::now().checked_add(duration) {
            Some(deadline) => {
                self.arming = Arming::At(deadline);
                self.rx = channel::at(deadline);
            }
            None => {
                self.arming = Arming::Never;
                self.rx = channel::never();
            }
        }
        was_pending
    }

    /// Prevent the timer from firing
    ///
    /// Returns `true` if the call stopped a pending timer, `false` if the timer
    /// had already fired or was never armed. After `false`, a fired value may
    /// still be waiting on [`channel`](Self::channel).
    pub fn stop(&mut self) -> bool {
        match std::mem::replace(&mut self.arming, Arming::Stopped) {
            Arming::At(deadline) if Instant::now() < deadline => {
                self.rx = channel::never();
                true
            }
            Arming::Never => true,
            Arming::At(_) | Arming::Stopped => false,
        }
    }

    /// Receiving end that yields the firing instant once
    pub fn channel(&self) -> &Receiver<Instant> {
        &self.rx
    }

    /// Deadline of the armed timer, `None` if stopped or never firing
    pub fn deadline(&self) -> Option<Instant> {
        match self.arming {
            Arming::At(deadline) => Some(deadline),
            Arming::Stopped | Arming::Never => None,
        }
    }

    /// Whether the timer is armed and has not yet reached its deadline
    pub fn is_armed(&self) -> bool {
        match self.arming {
            Arming::At(deadline) => Instant::now() < deadline,
            Arming::Never => true,
            Arming::Stopped => false,
        }
    }

    /// Block until the timer fires
    ///
    /// Returns `None` without blocking when the timer is stopped. A timer
    /// armed with an unrepresentable deadline blocks forever.
    pub fn wait(&self) -> Option<Instant> {
        if self.arming == Arming::Stopped {
            return None;
        }
        self.rx.recv().ok()
    }

    /// Take the fired value if there is one, without blocking
    pub fn try_fired(&self) -> Option<Instant> {
        self.rx.try_recv().ok()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::stopped()
    }
}

impl Poolable for Timer {
    const SIZED: bool = false;

    fn default_configuration() -> PoolConfiguration {
        PoolConfiguration::new().with_name("timers").with_max_idle_objects(128)
    }

    fn allocate(_capacity: usize) -> Self {
        Self::stopped()
    }

    fn capacity(&self) -> usize {
        0
    }

    fn reserve_capacity(&mut self, _capacity: usize) {}

    fn reset(&mut self) {
        if !self.stop() {
            let _ = self.try_fired();
        }
    }
}

/// Pool of reusable timers.
pub type TimerPool = Pool<Timer>;

impl Pool<Timer> {
    /// Get a timer armed to fire after `duration`
    pub fn get_armed(&self, duration: Duration) -> Timer {
        let mut timer = self.get(0);
        timer.reset(duration);
        timer
    }

    /// Get a timer that is not armed
    pub fn get_stopped(&self) -> Timer {
        self.get(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn fires_once() {
        let timer = Timer::new(Duration::from_millis(5));
        assert!(timer.wait().is_some());
        assert!(timer.try_fired().is_none());
    }

    #[test]
    fn stop_before_deadline() {
        let mut timer = Timer::new(Duration::from_secs(60));
        assert!(timer.is_armed());
        assert!(timer.stop());
        assert!(!timer.is_armed());
        assert!(timer.try_fired().is_none());
        assert!(!timer.stop());
    }

    #[test]
    fn stop_after_fire_leaves_value_pending() {
        let mut timer = Timer::new(Duration::from_millis(1));
        thread::sleep(Duration::from_millis(20));
        assert!(!timer.stop());
        assert!(timer.try_fired().is_some());
    }

    #[test]
    fn unbounded_duration_never_fires() {
        let pool = TimerPool::new();

        let mut timer = pool.get_armed(Duration::MAX);
        assert!(timer.is_armed());
        assert!(timer.deadline().is_none());
        assert!(timer.try_fired().is_none());
        assert!(timer.stop());
        assert!(!timer.is_armed());

        timer.reset(Duration::MAX);
        pool.put(timer);

        let reused = pool.get_stopped();
        assert!(!reused.is_armed());
        assert!(reused.wait().is_none());
    }

    #[test]
    fn rearming_unbounded_timer_reports_pending() {
        let mut timer = Timer::new(Duration::MAX);
        assert!(timer.reset(Duration::from_millis(1)));
        assert!(timer.wait().is_some());
    }

    #[test]
    fn stopped_timer_does_not_block_wait() {
        assert!(Timer::stopped().wait().is_none());
    }

    #[test]
    fn fired_timer_is_drained_on_return() {
        let pool = TimerPool::new();

        let timer = pool.get_armed(Duration::from_millis(1));
        thread::sleep(Duration::from_millis(20));
        pool.put(timer);

        let reused = pool.get_stopped();
        assert_eq!(pool.metrics().hits, 1);
        assert!(reused.try_fired().is_none());
        assert!(!reused.is_armed());
    }

    #[test]
    fn pending_timer_is_stopped_on_return() {
        let pool = TimerPool::new();

        pool.put(pool.get_armed(Duration::from_millis(10)));
        let reused = pool.get_stopped();

        thread::sleep(Duration::from_millis(30));
        assert!(reused.try_fired().is_none());
    }

    #[test]
    fn reused_timer_can_be_rearmed() {
        let pool = TimerPool::new();
        pool.put(pool.get_armed(Duration::from_millis(1)));

        let timer = pool.get_armed(Duration::from_millis(2));
        assert!(timer.deadline().is_some());
        assert!(timer.wait().is_some());
    }
}
