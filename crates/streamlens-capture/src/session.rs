//! Capture session lifecycle: one worker thread per stream, driven by a
//! fixed tick, with inline reconnection and periodic quality analysis.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender};
use parking_lot::RwLock;
use streamlens_foundation::{
    real_clock, CaptureState, SessionError, SharedClock, SourceError, StateCell,
};
use streamlens_quality::{QualityAnalyzer, QualityReport};
use streamlens_telemetry::{FpsTracker, SessionMetrics};
use tracing::{debug, error, info, warn};

use crate::config::SessionConfig;
use crate::convert;
use crate::events::SessionEvent;
use crate::frame::VideoFrame;
use crate::scheduler::FrameScheduler;
use crate::source::{StreamConnector, StreamSource};

/// State shared between a session handle and its worker thread.
struct SessionShared {
    state: StateCell,
    running: AtomicBool,
    capturing: AtomicBool,
    connected: AtomicBool,
    last_report: RwLock<Option<QualityReport>>,
}

impl SessionShared {
    fn new() -> Self {
        Self {
            state: StateCell::default(),
            running: AtomicBool::new(false),
            capturing: AtomicBool::new(false),
            connected: AtomicBool::new(false),
            last_report: RwLock::new(None),
        }
    }
}

struct WorkerHandle {
    thread: JoinHandle<()>,
    /// Disconnects when the worker exits, however it exits.
    done_rx: Receiver<()>,
}

/// A capture session for one stream URL.
///
/// `start()` opens the stream and hands it to a dedicated worker thread
/// that reads on a fixed tick, publishes display frames and quality
/// reports as [`SessionEvent`]s, and reconnects on its own when reads
/// fail. The handle itself stays cheap: state and counters are shared
/// snapshots, safe to poll from a UI thread.
///
/// A session that has stopped or failed can be started again with a
/// fresh `start()` call.
pub struct StreamSession {
    url: String,
    config: SessionConfig,
    connector: Arc<dyn StreamConnector>,
    clock: SharedClock,
    shared: Arc<SessionShared>,
    metrics: SessionMetrics,
    events_tx: Sender<SessionEvent>,
    events_rx: Receiver<SessionEvent>,
    worker: Option<WorkerHandle>,
}

impl StreamSession {
    pub fn new(
        url: impl Into<String>,
        config: SessionConfig,
        connector: Arc<dyn StreamConnector>,
    ) -> Self {
        let (events_tx, events_rx) = unbounded();
        Self {
            url: url.into(),
            config,
            connector,
            clock: real_clock(),
            shared: Arc::new(SessionShared::new()),
            metrics: SessionMetrics::new(),
            events_tx,
            events_rx,
            worker: None,
        }
    }

    /// Replaces the wall clock, letting tests drive pacing and backoff.
    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> CaptureState {
        self.shared.state.get()
    }

    pub fn is_capturing(&self) -> bool {
        self.shared.capturing.load(Ordering::SeqCst)
    }

    pub fn is_connected(&self) -> bool {
        self.shared.connected.load(Ordering::SeqCst)
    }

    /// Shared counter handle; stays valid after the session stops.
    pub fn metrics(&self) -> SessionMetrics {
        self.metrics.clone()
    }

    /// Receiver for session events. Clones share one queue, so keep a
    /// single receiver per consumer; events are not broadcast.
    pub fn events(&self) -> Receiver<SessionEvent> {
        self.events_rx.clone()
    }

    /// Most recent quality report, if any analysis has run.
    pub fn last_report(&self) -> Option<QualityReport> {
        self.shared.last_report.read().clone()
    }

    /// Opens the stream and starts the capture worker.
    ///
    /// On open failure no worker is started: the error is returned,
    /// mirrored as an [`SessionEvent::ErrorOccurred`], and the session
    /// stays idle so the caller decides when to try again. Calling
    /// `start()` while already capturing is a no-op.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.shared.capturing.load(Ordering::SeqCst) {
            warn!("Capture already running for {}", self.url);
            return Ok(());
        }
        self.reap_finished_worker();

        info!("Starting capture for {}", self.url);
        let source = match self.connector.open(&self.url, &self.config.source_options) {
            Ok(source) => source,
            Err(source_err) => {
                let err = SessionError::OpenFailed {
                    url: self.url.clone(),
                    source: source_err,
                };
                error!("{}", err);
                let _ = self.events_tx.send(SessionEvent::ErrorOccurred(err.clone()));
                return Err(err);
            }
        };

        self.shared.running.store(true, Ordering::SeqCst);
        self.shared.capturing.store(true, Ordering::SeqCst);
        self.shared.connected.store(true, Ordering::SeqCst);
        self.shared.state.set(CaptureState::Capturing);
        self.metrics.set_reconnect_attempts(0);

        let (done_tx, done_rx) = bounded(0);
        let worker = SessionWorker {
            url: self.url.clone(),
            config: self.config.clone(),
            connector: Arc::clone(&self.connector),
            source: Some(source),
            analyzer: QualityAnalyzer::new(self.config.analyzer.clone()),
            scheduler: FrameScheduler::new(self.config.frame_interval, Arc::clone(&self.clock)),
            clock: Arc::clone(&self.clock),
            shared: Arc::clone(&self.shared),
            metrics: self.metrics.clone(),
            events: self.events_tx.clone(),
            fps: FpsTracker::new(),
            reconnect_attempts: 0,
            skip_counter: 0,
        };

        let thread = std::thread::Builder::new()
            .name("stream-capture".to_string())
            .spawn(move || {
                // Dropped on exit, including panics, so stop() never hangs.
                let _done = done_tx;
                worker.run();
            })
            .map_err(|e| {
                self.shared.running.store(false, Ordering::SeqCst);
                self.shared.capturing.store(false, Ordering::SeqCst);
                self.shared.connected.store(false, Ordering::SeqCst);
                self.shared.state.set(CaptureState::Stopped);
                SessionError::Fatal(format!("failed to spawn capture worker: {e}"))
            })?;

        self.worker = Some(WorkerHandle { thread, done_rx });
        Ok(())
    }

    /// Stops the session and waits for the worker to exit.
    ///
    /// The wait is bounded by `stop_timeout`; a worker stuck in a slow
    /// read is abandoned rather than blocking the caller forever. Safe to
    /// call repeatedly and on a session that never started.
    pub fn stop(&mut self) {
        self.shared.running.store(false, Ordering::SeqCst);
        let Some(handle) = self.worker.take() else {
            return;
        };

        info!("Stopping capture for {}", self.url);
        match handle.done_rx.recv_timeout(self.config.stop_timeout) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                let _ = handle.thread.join();
                info!("Capture stopped for {}", self.url);
            }
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    "Capture worker for {} did not exit within {:?}, abandoning it",
                    self.url, self.config.stop_timeout
                );
                // The detached thread exits once its current cycle
                // observes the cleared running flag.
            }
        }
    }

    /// Joins a worker that already failed out on its own.
    fn reap_finished_worker(&mut self) {
        if let Some(handle) = self.worker.take() {
            let _ = handle.thread.join();
        }
    }
}

impl Drop for StreamSession {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Everything the worker thread owns. Lives entirely on that thread once
/// spawned; all outward communication goes through `shared`, `metrics`
/// and the event channel.
struct SessionWorker {
    url: String,
    config: SessionConfig,
    connector: Arc<dyn StreamConnector>,
    source: Option<Box<dyn StreamSource>>,
    analyzer: QualityAnalyzer,
    scheduler: FrameScheduler,
    clock: SharedClock,
    shared: Arc<SessionShared>,
    metrics: SessionMetrics,
    events: Sender<SessionEvent>,
    fps: FpsTracker,
    reconnect_attempts: u32,
    skip_counter: u32,
}

impl SessionWorker {
    fn run(mut self) {
        info!("Connected to {}", self.url);
        let _ = self.events.send(SessionEvent::ConnectionStateChanged {
            connected: true,
            message: format!("Connected to {}", self.url),
        });

        while self.shared.running.load(Ordering::SeqCst) {
            let cycle_started = self.clock.now();
            self.cycle();
            if self.shared.state.get() == CaptureState::Failed {
                break;
            }
            self.scheduler.pace(cycle_started);
        }

        self.finish();
    }

    /// One tick of the capture loop.
    fn cycle(&mut self) {
        match self.shared.state.get() {
            CaptureState::Capturing => self.capture_tick(),
            CaptureState::Reconnecting => self.reconnect_tick(),
            _ => {}
        }
    }

    fn capture_tick(&mut self) {
        let result = match self.source.as_mut() {
            Some(source) => source.read_frame(),
            None => Err(SourceError::NoFrame),
        };
        match result {
            Ok(frame) => self.handle_frame(frame),
            Err(err) => self.connection_lost(err),
        }
    }

    fn handle_frame(&mut self, frame: VideoFrame) {
        // A good read clears the consecutive-attempt budget.
        self.reconnect_attempts = 0;
        self.metrics.set_reconnect_attempts(0);
        self.metrics.record_frame_read();
        if let Some(fps) = self.fps.tick() {
            self.metrics.update_capture_fps(fps);
        }

        match convert::to_display(&frame) {
            Ok(display) => {
                let _ = self.events.send(SessionEvent::FrameProduced(display));
            }
            Err(err) => {
                warn!("Display conversion failed for {}: {}", self.url, err);
                self.metrics.record_conversion_failure();
            }
        }

        self.skip_counter += 1;
        if self.skip_counter >= self.config.analysis_interval {
            self.skip_counter = 0;
            let report = self.analyzer.analyze(&frame.as_view());
            self.metrics.record_analysis();
            debug!("Quality for {}: {}", self.url, report.message());
            *self.shared.last_report.write() = Some(report.clone());
            let _ = self.events.send(SessionEvent::QualityComputed(report));
        }
    }

    fn connection_lost(&mut self, err: SourceError) {
        warn!("Frame read failed for {}: {}", self.url, err);
        self.metrics.record_read_failure();
        self.metrics.record_disconnect();
        self.shared.connected.store(false, Ordering::SeqCst);
        self.shared.state.set(CaptureState::Reconnecting);
        let _ = self.events.send(SessionEvent::ConnectionLost);
        // The first attempt runs on this same tick instead of waiting a
        // full interval.
        self.reconnect_tick();
    }

    fn reconnect_tick(&mut self) {
        if self.reconnect_attempts >= self.config.max_reconnect_attempts {
            let err = SessionError::RetriesExhausted {
                url: self.url.clone(),
                attempts: self.reconnect_attempts,
            };
            error!("{}", err);
            self.shared.state.set(CaptureState::Failed);
            let _ = self.events.send(SessionEvent::ErrorOccurred(err));
            return;
        }

        self.reconnect_attempts += 1;
        self.metrics.set_reconnect_attempts(self.reconnect_attempts);
        // Drop the dead connection before dialing a new one.
        self.source = None;

        let delay = self.config.reconnect_backoff * self.reconnect_attempts;
        info!(
            "Reconnect attempt {}/{} for {} after {:?}",
            self.reconnect_attempts, self.config.max_reconnect_attempts, self.url, delay
        );
        self.clock.sleep(delay);

        if !self.shared.running.load(Ordering::SeqCst) {
            return;
        }

        match self.connector.open(&self.url, &self.config.source_options) {
            Ok(source) => {
                self.source = Some(source);
                self.shared.state.set(CaptureState::Capturing);
                self.shared.connected.store(true, Ordering::SeqCst);
                self.metrics.record_reconnect();
                info!("Reconnected to {}", self.url);
                let _ = self.events.send(SessionEvent::ConnectionStateChanged {
                    connected: true,
                    message: format!("Reconnected to {}", self.url),
                });
            }
            Err(err) => {
                warn!(
                    "Reconnect attempt {} failed for {}: {}",
                    self.reconnect_attempts, self.url, err
                );
                let _ = self.events.send(SessionEvent::ConnectionStateChanged {
                    connected: false,
                    message: format!(
                        "Reconnect attempt {} failed: {}",
                        self.reconnect_attempts, err
                    ),
                });
            }
        }
    }

    fn finish(&mut self) {
        self.source = None;
        let was_connected = self.shared.connected.swap(false, Ordering::SeqCst);

        if self.shared.state.get() != CaptureState::Failed {
            self.shared.state.set(CaptureState::Stopped);
            if was_connected {
                let _ = self.events.send(SessionEvent::ConnectionStateChanged {
                    connected: false,
                    message: format!("Disconnected from {}", self.url),
                });
            }
        }
        // The capturing flag gates start(), so it clears only after every
        // other shared write has landed. A worker abandoned by a timed-out
        // stop() must not race a restarted session.
        self.shared.capturing.store(false, Ordering::SeqCst);
        debug!("Capture worker for {} exited", self.url);
    }
}
