//! Time source abstraction.
//!
//! Tick pacing and reconnect backoff both sleep on the session thread, so
//! every time access goes through a [`Clock`]. Tests swap in a [`TestClock`]
//! and drive backoff sequences without waiting wall-clock time.

use std::time::{Duration, Instant};

pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;

    fn sleep(&self, duration: Duration);
}

/// Wall-clock implementation used outside of tests.
pub struct RealClock;

impl Default for RealClock {
    fn default() -> Self {
        Self::new()
    }
}

impl RealClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for RealClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Virtual clock for deterministic tests. Sleeping advances virtual time
/// immediately instead of blocking.
pub struct TestClock {
    current_time: std::sync::Mutex<Instant>,
}

impl Default for TestClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClock {
    pub fn new() -> Self {
        Self {
            current_time: std::sync::Mutex::new(Instant::now()),
        }
    }

    /// Advance the virtual clock by the specified duration.
    pub fn advance(&self, duration: Duration) {
        let mut time = self.current_time.lock().unwrap();
        *time += duration;
    }
}

impl Clock for TestClock {
    fn now(&self) -> Instant {
        *self.current_time.lock().unwrap()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
        std::thread::yield_now();
    }
}

/// Clock handle shared between a session and its worker thread.
pub type SharedClock = std::sync::Arc<dyn Clock + Send + Sync>;

pub fn real_clock() -> SharedClock {
    std::sync::Arc::new(RealClock::new())
}
