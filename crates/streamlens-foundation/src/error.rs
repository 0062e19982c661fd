use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by a capture session to its consumer.
///
/// Transient read failures never appear here; they are absorbed by the
/// reconnect path and reported as connection-state events instead.
#[derive(Error, Debug, Clone)]
pub enum SessionError {
    #[error("failed to open stream {url}: {source}")]
    OpenFailed { url: String, source: SourceError },

    #[error("gave up on {url} after {attempts} reconnect attempts")]
    RetriesExhausted { url: String, attempts: u32 },

    #[error("fatal error, cannot recover: {0}")]
    Fatal(String),
}

/// Errors produced by a stream backend.
#[derive(Error, Debug, Clone)]
pub enum SourceError {
    #[error("failed to open {target}: {reason}")]
    OpenFailed { target: String, reason: String },

    #[error("no frame available")]
    NoFrame,

    #[error("read failed: {0}")]
    ReadFailed(String),

    #[error("stream ended")]
    StreamEnded,

    #[error("unsupported frame format: {0}")]
    UnsupportedFormat(String),
}

#[derive(Debug, Clone)]
pub enum RecoveryStrategy {
    Retry { max_attempts: u32, delay: Duration },
    Restart,
    Ignore,
    Fatal,
}

impl SessionError {
    /// What a consumer can usefully do after receiving this error.
    pub fn recovery_strategy(&self) -> RecoveryStrategy {
        match self {
            // A fresh start() is required; the session never auto-restarts.
            SessionError::OpenFailed { .. } => RecoveryStrategy::Restart,
            SessionError::RetriesExhausted { .. } => RecoveryStrategy::Restart,
            SessionError::Fatal(_) => RecoveryStrategy::Fatal,
        }
    }
}

impl SourceError {
    /// How a running session treats this failure mid-capture.
    pub fn recovery_strategy(&self) -> RecoveryStrategy {
        match self {
            SourceError::NoFrame | SourceError::ReadFailed(_) | SourceError::StreamEnded => {
                RecoveryStrategy::Retry {
                    max_attempts: 5,
                    delay: Duration::from_secs(1),
                }
            }
            SourceError::UnsupportedFormat(_) => RecoveryStrategy::Ignore,
            SourceError::OpenFailed { .. } => RecoveryStrategy::Restart,
        }
    }
}
