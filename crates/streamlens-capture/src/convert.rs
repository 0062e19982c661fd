use streamlens_quality::PixelFormat;
use thiserror::Error;

use crate::frame::{DisplayFormat, DisplayFrame, VideoFrame};

#[derive(Error, Debug, Clone)]
pub enum ConvertError {
    #[error("frame buffer truncated: expected at least {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
}

/// Converts a raw frame into a display-ready copy.
///
/// Single-channel input stays grayscale, three-channel BGR becomes RGB,
/// four-channel BGRA becomes RGBA. Row padding is stripped and the output
/// always owns an independent buffer, so later reuse of the source frame's
/// storage by a decoder cannot corrupt what the consumer is showing.
pub fn to_display(frame: &VideoFrame) -> Result<DisplayFrame, ConvertError> {
    if !frame.is_complete() {
        return Err(ConvertError::Truncated {
            expected: frame.expected_len(),
            actual: frame.data.len(),
        });
    }

    let width = frame.width as usize;
    let height = frame.height as usize;
    let channels = frame.format.channels();
    let row_bytes = width * channels;

    let (format, data) = match frame.format {
        PixelFormat::Gray8 => {
            let mut out = Vec::with_capacity(width * height);
            for row in 0..height {
                let start = row * frame.stride;
                out.extend_from_slice(&frame.data[start..start + row_bytes]);
            }
            (DisplayFormat::Gray8, out)
        }
        PixelFormat::Bgr8 => {
            let mut out = Vec::with_capacity(width * height * 3);
            for row in 0..height {
                let start = row * frame.stride;
                for px in frame.data[start..start + row_bytes].chunks_exact(3) {
                    out.extend_from_slice(&[px[2], px[1], px[0]]);
                }
            }
            (DisplayFormat::Rgb8, out)
        }
        PixelFormat::Bgra8 => {
            let mut out = Vec::with_capacity(width * height * 4);
            for row in 0..height {
                let start = row * frame.stride;
                for px in frame.data[start..start + row_bytes].chunks_exact(4) {
                    out.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
                }
            }
            (DisplayFormat::Rgba8, out)
        }
    };

    Ok(DisplayFrame {
        data,
        width: frame.width,
        height: frame.height,
        format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bgr_channels_are_swizzled() {
        // Two pixels: pure blue then pure red.
        let frame = VideoFrame::packed(vec![255, 0, 0, 0, 0, 255], 2, 1, PixelFormat::Bgr8);
        let display = to_display(&frame).unwrap();
        assert_eq!(display.format, DisplayFormat::Rgb8);
        assert_eq!(display.data, vec![0, 0, 255, 255, 0, 0]);
    }

    #[test]
    fn bgra_keeps_alpha_in_place() {
        let frame = VideoFrame::packed(vec![10, 20, 30, 200], 1, 1, PixelFormat::Bgra8);
        let display = to_display(&frame).unwrap();
        assert_eq!(display.format, DisplayFormat::Rgba8);
        assert_eq!(display.data, vec![30, 20, 10, 200]);
    }

    #[test]
    fn row_padding_is_stripped() {
        let frame = VideoFrame {
            data: vec![1, 2, 0, 0, 3, 4, 0, 0],
            width: 2,
            height: 2,
            format: PixelFormat::Gray8,
            stride: 4,
        };
        let display = to_display(&frame).unwrap();
        assert_eq!(display.data, vec![1, 2, 3, 4]);
        assert_eq!(display.stride(), 2);
    }

    #[test]
    fn output_buffer_is_independent() {
        let mut frame = VideoFrame::packed(vec![7u8; 16], 4, 4, PixelFormat::Gray8);
        let display = to_display(&frame).unwrap();
        frame.data.fill(0);
        assert!(display.data.iter().all(|&b| b == 7));
    }

    #[test]
    fn truncated_frame_is_refused() {
        let frame = VideoFrame::packed(vec![0u8; 5], 4, 4, PixelFormat::Bgr8);
        match to_display(&frame) {
            Err(ConvertError::Truncated { expected, actual }) => {
                assert_eq!(expected, 48);
                assert_eq!(actual, 5);
            }
            Ok(_) => panic!("expected truncation error"),
        }
    }
}
