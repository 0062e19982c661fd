use streamlens_foundation::SourceError;

use crate::frame::VideoFrame;

/// Options applied when opening a stream.
#[derive(Debug, Clone)]
pub struct SourceOptions {
    /// Decoder-side frames buffered ahead of the reader. Default: 1, which
    /// keeps reads close to live at the cost of dropped frames under load.
    pub buffered_frames: u32,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self { buffered_frames: 1 }
    }
}

/// An open stream that frames can be pulled from.
///
/// Implementations are driven from a single session worker thread, so
/// `read_frame` may block briefly but must not assume it is called at any
/// particular rate.
pub trait StreamSource: Send {
    fn read_frame(&mut self) -> Result<VideoFrame, SourceError>;
}

/// Factory for stream connections.
///
/// `open` is called once on start and again for every reconnect attempt,
/// so it must be safe to call repeatedly against the same target.
pub trait StreamConnector: Send + Sync {
    fn open(&self, url: &str, options: &SourceOptions)
        -> Result<Box<dyn StreamSource>, SourceError>;
}
