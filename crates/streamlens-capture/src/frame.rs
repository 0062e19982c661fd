use streamlens_quality::{FrameView, PixelFormat};

/// One raw frame as handed over by a stream backend.
///
/// The buffer is owned so the frame can outlive the decoder's internal
/// storage. `stride` is the byte distance between row starts; backends
/// that pad rows report a stride larger than `width * channels`.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub stride: usize,
}

impl VideoFrame {
    /// Frame with tightly packed rows.
    pub fn packed(data: Vec<u8>, width: u32, height: u32, format: PixelFormat) -> Self {
        let stride = width as usize * format.channels();
        Self {
            data,
            width,
            height,
            format,
            stride,
        }
    }

    /// Minimum buffer length for the declared geometry. The last row does
    /// not need trailing padding.
    pub fn expected_len(&self) -> usize {
        if self.width == 0 || self.height == 0 {
            return 0;
        }
        self.stride * (self.height as usize - 1) + self.width as usize * self.format.channels()
    }

    pub fn is_complete(&self) -> bool {
        self.data.len() >= self.expected_len()
    }

    /// Borrowed view for analysis.
    pub fn as_view(&self) -> FrameView<'_> {
        FrameView::with_stride(&self.data, self.width, self.height, self.format, self.stride)
    }
}

/// Pixel layout of a display-ready frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayFormat {
    Gray8,
    Rgb8,
    Rgba8,
}

impl DisplayFormat {
    pub fn channels(&self) -> usize {
        match self {
            DisplayFormat::Gray8 => 1,
            DisplayFormat::Rgb8 => 3,
            DisplayFormat::Rgba8 => 4,
        }
    }
}

/// Frame converted for presentation: tightly packed, channel order fixed,
/// backed by its own buffer so the consumer can hold it for as long as it
/// likes without pinning capture-side memory.
#[derive(Debug, Clone)]
pub struct DisplayFrame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: DisplayFormat,
}

impl DisplayFrame {
    pub fn stride(&self) -> usize {
        self.width as usize * self.format.channels()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_frame_reports_tight_stride() {
        let frame = VideoFrame::packed(vec![0u8; 12 * 4 * 3], 12, 4, PixelFormat::Bgr8);
        assert_eq!(frame.stride, 36);
        assert_eq!(frame.expected_len(), 12 * 4 * 3);
        assert!(frame.is_complete());
    }

    #[test]
    fn padded_last_row_is_not_required() {
        // 8 px wide gray rows padded out to 16 bytes.
        let frame = VideoFrame {
            data: vec![0u8; 16 * 3 + 8],
            width: 8,
            height: 4,
            format: PixelFormat::Gray8,
            stride: 16,
        };
        assert_eq!(frame.expected_len(), 56);
        assert!(frame.is_complete());
    }

    #[test]
    fn short_buffer_is_incomplete() {
        let frame = VideoFrame::packed(vec![0u8; 10], 8, 8, PixelFormat::Gray8);
        assert!(!frame.is_complete());
    }
}
