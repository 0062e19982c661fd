use streamlens_foundation::SessionError;
use streamlens_quality::QualityReport;

use crate::frame::DisplayFrame;

/// Everything a session reports back to its consumer.
///
/// Events are delivered in the order they were produced on the session
/// thread. The channel is unbounded, so a slow consumer delays nothing on
/// the capture side.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A display-ready frame, one per successful read that converts cleanly.
    FrameProduced(DisplayFrame),
    /// Quality analysis result, produced on the analysis cadence.
    QualityComputed(QualityReport),
    /// Connection came up or went down, with a human-readable reason.
    ConnectionStateChanged { connected: bool, message: String },
    /// A non-retriable failure. The session stops driving itself after this.
    ErrorOccurred(SessionError),
    /// A read failed and the session is about to start reconnecting.
    ConnectionLost,
}
