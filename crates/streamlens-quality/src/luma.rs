//! Grayscale reduction.
//!
//! All four metrics operate on single-channel luminance, so color input is
//! reduced once per analysis and the plane is shared by every metric.

use crate::frame::{FrameView, PixelFormat};
use crate::AnalyzeError;

/// Owned single-channel luminance plane, tightly packed.
pub struct LumaPlane {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl LumaPlane {
    /// Reduce a frame to luminance. BT.601 full-range weights in 8-bit
    /// fixed point: y = (77 r + 150 g + 29 b + 128) >> 8.
    pub fn from_view(view: &FrameView) -> Result<LumaPlane, AnalyzeError> {
        let width = view.width as usize;
        let height = view.height as usize;
        let channels = view.format.channels();

        if view.stride < width * channels {
            return Err(AnalyzeError::BadStride {
                stride: view.stride,
                row_bytes: width * channels,
            });
        }
        if view.data.len() < view.expected_len() {
            return Err(AnalyzeError::BufferTooShort {
                expected: view.expected_len(),
                actual: view.data.len(),
            });
        }

        let mut data = Vec::with_capacity(width * height);
        for row in 0..height {
            let start = row * view.stride;
            let row_bytes = &view.data[start..start + width * channels];
            match view.format {
                PixelFormat::Gray8 => data.extend_from_slice(row_bytes),
                PixelFormat::Bgr8 => {
                    for px in row_bytes.chunks_exact(3) {
                        data.push(luma_bgr(px[0], px[1], px[2]));
                    }
                }
                PixelFormat::Bgra8 => {
                    for px in row_bytes.chunks_exact(4) {
                        data.push(luma_bgr(px[0], px[1], px[2]));
                    }
                }
            }
        }

        Ok(LumaPlane {
            data,
            width,
            height,
        })
    }

    #[cfg(test)]
    pub(crate) fn from_raw(data: Vec<u8>, width: usize, height: usize) -> LumaPlane {
        debug_assert_eq!(data.len(), width * height);
        LumaPlane {
            data,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.data
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }
}

#[inline]
fn luma_bgr(b: u8, g: u8, r: u8) -> u8 {
    let y = 77 * r as u32 + 150 * g as u32 + 29 * b as u32 + 128;
    (y >> 8) as u8
}
