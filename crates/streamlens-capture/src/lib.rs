pub mod config;
pub mod convert;
pub mod events;
pub mod frame;
pub mod scheduler;
pub mod session;
pub mod source;
pub mod synthetic;

// Public API
pub use config::SessionConfig;
pub use convert::{to_display, ConvertError};
pub use events::SessionEvent;
pub use frame::{DisplayFormat, DisplayFrame, VideoFrame};
pub use scheduler::FrameScheduler;
pub use session::StreamSession;
pub use source::{SourceOptions, StreamConnector, StreamSource};
pub use synthetic::SyntheticConnector;

// Everything a consumer needs to handle events without naming the
// sibling crates directly.
pub use streamlens_foundation::{CaptureState, SessionError, SourceError};
pub use streamlens_quality::{PixelFormat, QualityReport, QualityStatus};
pub use streamlens_telemetry::{MetricsSnapshot, SessionMetrics};
