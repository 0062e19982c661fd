use std::time::{Duration, Instant};

use streamlens_foundation::SharedClock;

/// Paces the capture loop to a fixed tick interval.
///
/// Each cycle sleeps only for whatever is left of the interval after the
/// work already done, so a slow read does not stack delay onto the next
/// tick. A cycle that overruns the interval starts the next one
/// immediately.
pub struct FrameScheduler {
    interval: Duration,
    clock: SharedClock,
}

impl FrameScheduler {
    pub fn new(interval: Duration, clock: SharedClock) -> Self {
        Self { interval, clock }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Sleeps out the remainder of the tick that began at `cycle_started`.
    pub fn pace(&self, cycle_started: Instant) {
        let elapsed = self.clock.now().saturating_duration_since(cycle_started);
        if let Some(remaining) = self.interval.checked_sub(elapsed) {
            if !remaining.is_zero() {
                self.clock.sleep(remaining);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use streamlens_foundation::{Clock, TestClock};

    use super::*;

    #[test]
    fn fast_cycle_sleeps_out_the_interval() {
        let clock = Arc::new(TestClock::new());
        let scheduler = FrameScheduler::new(Duration::from_millis(33), clock.clone());

        let started = clock.now();
        clock.advance(Duration::from_millis(10));
        scheduler.pace(started);

        assert_eq!(clock.now() - started, Duration::from_millis(33));
    }

    #[test]
    fn overrunning_cycle_does_not_sleep() {
        let clock = Arc::new(TestClock::new());
        let scheduler = FrameScheduler::new(Duration::from_millis(33), clock.clone());

        let started = clock.now();
        clock.advance(Duration::from_millis(50));
        scheduler.pace(started);

        assert_eq!(clock.now() - started, Duration::from_millis(50));
    }
}
