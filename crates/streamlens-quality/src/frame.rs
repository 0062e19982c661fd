//! Borrowed frame view consumed by the analyzer.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pixel layout of a decoded frame.
///
/// Decoders for network cameras hand out BGR-ordered rows, so that is the
/// 3-channel layout here; `Bgra8` covers alpha-bearing sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PixelFormat {
    /// Single-channel luminance.
    Gray8,
    /// 3 channels, blue-green-red byte order.
    Bgr8,
    /// 4 channels, blue-green-red-alpha byte order.
    Bgra8,
}

impl PixelFormat {
    pub fn channels(&self) -> usize {
        match self {
            PixelFormat::Gray8 => 1,
            PixelFormat::Bgr8 => 3,
            PixelFormat::Bgra8 => 4,
        }
    }
}

/// Borrowed view over one decoded frame.
///
/// Carries the caller's claims about geometry; the analyzer re-checks them
/// before touching the pixel data, so a view never needs pre-validation.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub data: &'a [u8],
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    /// Bytes per row, including any padding.
    pub stride: usize,
}

impl<'a> FrameView<'a> {
    /// View over a tightly packed buffer (stride = width * channels).
    pub fn packed(data: &'a [u8], width: u32, height: u32, format: PixelFormat) -> Self {
        Self {
            data,
            width,
            height,
            format,
            stride: width as usize * format.channels(),
        }
    }

    pub fn with_stride(
        data: &'a [u8],
        width: u32,
        height: u32,
        format: PixelFormat,
        stride: usize,
    ) -> Self {
        Self {
            data,
            width,
            height,
            format,
            stride,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty() || self.width == 0 || self.height == 0
    }

    /// Bytes the claimed geometry requires of `data`.
    pub fn expected_len(&self) -> usize {
        if self.height == 0 {
            return 0;
        }
        // The last row needs no padding past its pixels.
        self.stride * (self.height as usize - 1) + self.width as usize * self.format.channels()
    }
}
