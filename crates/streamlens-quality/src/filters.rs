//! Spatial kernels shared by the noise and sharpness metrics.

use crate::luma::LumaPlane;

/// 5-tap binomial row/column weights, sum 16. Two passes give the 5x5 blur.
const BINOMIAL_5: [u32; 5] = [1, 4, 6, 4, 1];

/// Separable 5x5 binomial blur with replicated borders. Output has the same
/// geometry as the input; a uniform plane passes through unchanged.
pub fn binomial_blur_5(plane: &LumaPlane) -> Vec<u8> {
    let w = plane.width();
    let h = plane.height();
    let src = plane.pixels();

    let mut tmp = vec![0u8; w * h];
    for y in 0..h {
        let row = &src[y * w..(y + 1) * w];
        let out = &mut tmp[y * w..(y + 1) * w];
        for x in 0..w {
            let mut sum = 8u32; // rounding bias, then >> 4
            for (k, weight) in BINOMIAL_5.iter().enumerate() {
                let xi = (x as isize + k as isize - 2).clamp(0, w as isize - 1) as usize;
                sum += weight * row[xi] as u32;
            }
            out[x] = (sum >> 4) as u8;
        }
    }

    let mut blurred = vec![0u8; w * h];
    for y in 0..h {
        for x in 0..w {
            let mut sum = 8u32;
            for (k, weight) in BINOMIAL_5.iter().enumerate() {
                let yi = (y as isize + k as isize - 2).clamp(0, h as isize - 1) as usize;
                sum += weight * tmp[yi * w + x] as u32;
            }
            blurred[y * w + x] = (sum >> 4) as u8;
        }
    }

    blurred
}

/// 4-neighbour Laplacian response over interior pixels. Border pixels carry
/// no response, so the output holds (w-2)*(h-2) values; empty below 3x3.
pub fn laplacian(plane: &LumaPlane) -> Vec<f64> {
    let w = plane.width();
    let h = plane.height();
    if w < 3 || h < 3 {
        return Vec::new();
    }

    let mut responses = Vec::with_capacity((w - 2) * (h - 2));
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let center = plane.get(x, y) as f64;
            let neighbours = plane.get(x, y - 1) as f64
                + plane.get(x, y + 1) as f64
                + plane.get(x - 1, y) as f64
                + plane.get(x + 1, y) as f64;
            responses.push(neighbours - 4.0 * center);
        }
    }
    responses
}

/// Population variance; 0 for an empty slice.
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n
}
