//! Individual frame metrics. Each one is a pure function of a luminance
//! plane and a tuning constant; `QualityAnalyzer` combines them.

use crate::filters;
use crate::luma::LumaPlane;

/// Noise estimate from the residual left over after a small blur.
/// Lower residual means a cleaner frame, so the score is inverted:
/// 100 at zero residual, 0 once the mean residual reaches `max_noise`.
pub fn noise_score(luma: &LumaPlane, max_noise: f64) -> f64 {
    if luma.pixels().is_empty() {
        return 0.0;
    }
    let blurred = filters::binomial_blur_5(luma);
    let total: u64 = luma
        .pixels()
        .iter()
        .zip(&blurred)
        .map(|(&a, &b)| (a as i32 - b as i32).unsigned_abs() as u64)
        .sum();
    let mean_abs_diff = total as f64 / luma.pixels().len() as f64;
    (100.0 - (mean_abs_diff / max_noise) * 100.0).clamp(0.0, 100.0)
}

/// Dynamic range against an ideal span. A full 0..255 swing usually means
/// clipped highlights rather than rich contrast, so it is penalized.
pub fn contrast_score(luma: &LumaPlane, ideal_contrast: f64) -> f64 {
    let pixels = luma.pixels();
    if pixels.is_empty() {
        return 0.0;
    }
    let mut min = u8::MAX;
    let mut max = u8::MIN;
    for &p in pixels {
        min = min.min(p);
        max = max.max(p);
    }
    let range = (max - min) as f64;
    let mut score = ((range / ideal_contrast) * 100.0).clamp(0.0, 100.0);
    if range > 250.0 {
        score *= 0.8;
    }
    score
}

/// Edge strength as Laplacian-response variance, against an ideal variance.
pub fn sharpness_score(luma: &LumaPlane, ideal_sharpness: f64) -> f64 {
    let responses = filters::laplacian(luma);
    let variance = filters::population_variance(&responses);
    ((variance / ideal_sharpness) * 100.0).clamp(0.0, 100.0)
}

/// Percentage of pixels at or above the brightness cutoff.
pub fn overexposed_percent(luma: &LumaPlane, threshold: u8) -> f64 {
    let pixels = luma.pixels();
    if pixels.is_empty() {
        return 0.0;
    }
    let hot = pixels.iter().filter(|&&p| p >= threshold).count();
    ((hot as f64 / pixels.len() as f64) * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn uniform(value: u8, w: usize, h: usize) -> LumaPlane {
        LumaPlane::from_raw(vec![value; w * h], w, h)
    }

    fn checkerboard(w: usize, h: usize) -> LumaPlane {
        let mut data = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                data.push(if (x + y) % 2 == 0 { 255 } else { 0 });
            }
        }
        LumaPlane::from_raw(data, w, h)
    }

    #[test]
    fn flat_frame_scores_clean_but_dull() {
        let plane = uniform(128, 640, 480);
        assert_abs_diff_eq!(noise_score(&plane, 50.0), 100.0);
        assert_abs_diff_eq!(contrast_score(&plane, 160.0), 0.0);
        assert_abs_diff_eq!(sharpness_score(&plane, 400.0), 0.0);
        assert_abs_diff_eq!(overexposed_percent(&plane, 245), 0.0);
    }

    #[test]
    fn heavy_noise_clamps_to_zero() {
        // Alternating extremes leave a residual far past max_noise.
        let plane = checkerboard(32, 32);
        assert_eq!(noise_score(&plane, 50.0), 0.0);
    }

    #[test]
    fn checkerboard_saturates_sharpness() {
        let plane = checkerboard(32, 32);
        assert_eq!(sharpness_score(&plane, 400.0), 100.0);
    }

    #[test]
    fn contrast_penalty_applies_only_past_250() {
        let mut data = vec![0u8; 100];
        data[0] = 250;
        let at_limit = LumaPlane::from_raw(data.clone(), 10, 10);
        assert_abs_diff_eq!(contrast_score(&at_limit, 160.0), 100.0);

        data[0] = 251;
        let past_limit = LumaPlane::from_raw(data, 10, 10);
        assert_abs_diff_eq!(contrast_score(&past_limit, 160.0), 80.0);
    }

    #[test]
    fn moderate_range_scales_against_ideal() {
        let mut data = vec![60u8; 100];
        data[0] = 140; // range 80 of ideal 160
        let plane = LumaPlane::from_raw(data, 10, 10);
        assert_abs_diff_eq!(contrast_score(&plane, 160.0), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn half_bright_frame_reports_half_overexposed() {
        let mut data = vec![0u8; 64 * 64];
        for p in data.iter_mut().take(64 * 32) {
            *p = 255;
        }
        let plane = LumaPlane::from_raw(data, 64, 64);
        assert_abs_diff_eq!(overexposed_percent(&plane, 245), 50.0);
    }

    #[test]
    fn cutoff_is_inclusive() {
        let plane = uniform(245, 16, 16);
        assert_abs_diff_eq!(overexposed_percent(&plane, 245), 100.0);
        let below = uniform(244, 16, 16);
        assert_abs_diff_eq!(overexposed_percent(&below, 245), 0.0);
    }
}
