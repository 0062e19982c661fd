use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared counters for cross-thread session monitoring.
///
/// Cheap to clone; every clone observes the same underlying counters. The
/// session worker writes, anything holding a clone reads.
#[derive(Clone)]
pub struct SessionMetrics {
    // Capture cycle outcomes
    pub frames_read: Arc<AtomicU64>,
    pub read_failures: Arc<AtomicU64>,
    pub frames_analyzed: Arc<AtomicU64>,
    pub conversion_failures: Arc<AtomicU64>,

    // Reconnection tracking
    pub reconnect_attempts: Arc<AtomicU64>, // current consecutive count, resets on a good read
    pub reconnects: Arc<AtomicU64>,         // successful reopens
    pub disconnects: Arc<AtomicU64>,        // entries into the reconnect path

    // Frame rate tracking
    pub capture_fps: Arc<AtomicU64>, // frames per second * 10

    // Activity indicators
    pub last_frame_time: Arc<RwLock<Option<Instant>>>,
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self {
            frames_read: Arc::new(AtomicU64::new(0)),
            read_failures: Arc::new(AtomicU64::new(0)),
            frames_analyzed: Arc::new(AtomicU64::new(0)),
            conversion_failures: Arc::new(AtomicU64::new(0)),

            reconnect_attempts: Arc::new(AtomicU64::new(0)),
            reconnects: Arc::new(AtomicU64::new(0)),
            disconnects: Arc::new(AtomicU64::new(0)),

            capture_fps: Arc::new(AtomicU64::new(0)),

            last_frame_time: Arc::new(RwLock::new(None)),
        }
    }
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_frame_read(&self) {
        self.frames_read.fetch_add(1, Ordering::Relaxed);
        *self.last_frame_time.write() = Some(Instant::now());
    }

    pub fn record_read_failure(&self) {
        self.read_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_analysis(&self) {
        self.frames_analyzed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_conversion_failure(&self) {
        self.conversion_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn set_reconnect_attempts(&self, attempts: u32) {
        self.reconnect_attempts
            .store(attempts as u64, Ordering::Relaxed);
    }

    pub fn record_disconnect(&self) {
        self.disconnects.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_reconnect(&self) {
        self.reconnects.fetch_add(1, Ordering::Relaxed);
    }

    pub fn update_capture_fps(&self, fps: f64) {
        self.capture_fps.store((fps * 10.0) as u64, Ordering::Relaxed);
    }

    /// Time since the last successful read, if any read has succeeded.
    pub fn frame_age(&self) -> Option<Duration> {
        self.last_frame_time.read().map(|t| t.elapsed())
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            frames_read: self.frames_read.load(Ordering::Relaxed),
            read_failures: self.read_failures.load(Ordering::Relaxed),
            frames_analyzed: self.frames_analyzed.load(Ordering::Relaxed),
            conversion_failures: self.conversion_failures.load(Ordering::Relaxed),
            reconnect_attempts: self.reconnect_attempts.load(Ordering::Relaxed),
            reconnects: self.reconnects.load(Ordering::Relaxed),
            disconnects: self.disconnects.load(Ordering::Relaxed),
            capture_fps: self.capture_fps.load(Ordering::Relaxed) as f64 / 10.0,
        }
    }
}

/// Point-in-time copy of the session counters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsSnapshot {
    pub frames_read: u64,
    pub read_failures: u64,
    pub frames_analyzed: u64,
    pub conversion_failures: u64,
    pub reconnect_attempts: u64,
    pub reconnects: u64,
    pub disconnects: u64,
    pub capture_fps: f64,
}

#[derive(Debug)]
pub struct FpsTracker {
    last_update: Instant,
    frame_count: u64,
}

impl FpsTracker {
    pub fn new() -> Self {
        Self {
            last_update: Instant::now(),
            frame_count: 0,
        }
    }

    /// Count one frame. Returns a rate estimate at most once per second.
    pub fn tick(&mut self) -> Option<f64> {
        self.frame_count += 1;
        let elapsed = self.last_update.elapsed();

        if elapsed >= Duration::from_secs(1) {
            let fps = self.frame_count as f64 / elapsed.as_secs_f64();
            self.last_update = Instant::now();
            self.frame_count = 0;
            Some(fps)
        } else {
            None
        }
    }
}

impl Default for FpsTracker {
    fn default() -> Self {
        Self::new()
    }
}
