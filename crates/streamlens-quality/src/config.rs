//! Configuration for frame quality scoring.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tuning constants for the analyzer.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnalyzerConfig {
    /// Weight of the noise score in the overall score.
    /// Default: 0.25
    pub noise_weight: f64,

    /// Weight of the contrast score in the overall score.
    /// Default: 0.25
    pub contrast_weight: f64,

    /// Weight of the sharpness score in the overall score.
    /// Default: 0.35
    pub sharpness_weight: f64,

    /// Weight of the exposure term (100 - overexposed percent).
    /// Default: 0.15
    pub exposure_weight: f64,

    /// Mean blur residual that maps to a noise score of 0.
    /// Default: 50.0
    pub max_noise: f64,

    /// Luminance range that maps to a contrast score of 100.
    /// Default: 160.0
    pub ideal_contrast: f64,

    /// Laplacian variance that maps to a sharpness score of 100.
    /// Default: 400.0
    pub ideal_sharpness: f64,

    /// Luminance at or above this counts as overexposed.
    /// Default: 245
    pub overexposure_threshold: u8,

    /// Frames narrower or shorter than this are rejected outright.
    /// Default: 10
    pub min_dimension: u32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            noise_weight: 0.25,
            contrast_weight: 0.25,
            sharpness_weight: 0.35,
            exposure_weight: 0.15,
            max_noise: 50.0,
            ideal_contrast: 160.0,
            ideal_sharpness: 400.0,
            overexposure_threshold: 245,
            min_dimension: 10,
        }
    }
}

impl AnalyzerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder::default()
    }

    /// Create configuration tuned for dim or IR-lit scenes.
    pub fn low_light() -> Self {
        Self {
            // Sensor gain makes dark scenes grainy; tolerate more residual.
            max_noise: 80.0,
            // Dim scenes rarely span much range; reward what is there.
            ideal_contrast: 120.0,
            ..Default::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Supported variables:
    /// - `STREAMLENS_MAX_NOISE`: blur residual mapping to score 0
    /// - `STREAMLENS_IDEAL_CONTRAST`: range mapping to score 100
    /// - `STREAMLENS_IDEAL_SHARPNESS`: variance mapping to score 100
    /// - `STREAMLENS_OVEREXPOSURE_THRESHOLD`: luminance cutoff (0-255)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("STREAMLENS_MAX_NOISE") {
            if let Ok(parsed) = val.parse::<f64>() {
                config.max_noise = parsed;
            }
        }

        if let Ok(val) = std::env::var("STREAMLENS_IDEAL_CONTRAST") {
            if let Ok(parsed) = val.parse::<f64>() {
                config.ideal_contrast = parsed;
            }
        }

        if let Ok(val) = std::env::var("STREAMLENS_IDEAL_SHARPNESS") {
            if let Ok(parsed) = val.parse::<f64>() {
                config.ideal_sharpness = parsed;
            }
        }

        if let Ok(val) = std::env::var("STREAMLENS_OVEREXPOSURE_THRESHOLD") {
            if let Ok(parsed) = val.parse::<u8>() {
                config.overexposure_threshold = parsed;
            }
        }

        config
    }
}

/// Builder for AnalyzerConfig.
#[derive(Debug, Default)]
pub struct AnalyzerConfigBuilder {
    noise_weight: Option<f64>,
    contrast_weight: Option<f64>,
    sharpness_weight: Option<f64>,
    exposure_weight: Option<f64>,
    max_noise: Option<f64>,
    ideal_contrast: Option<f64>,
    ideal_sharpness: Option<f64>,
    overexposure_threshold: Option<u8>,
    min_dimension: Option<u32>,
}

impl AnalyzerConfigBuilder {
    pub fn noise_weight(mut self, weight: f64) -> Self {
        self.noise_weight = Some(weight);
        self
    }

    pub fn contrast_weight(mut self, weight: f64) -> Self {
        self.contrast_weight = Some(weight);
        self
    }

    pub fn sharpness_weight(mut self, weight: f64) -> Self {
        self.sharpness_weight = Some(weight);
        self
    }

    pub fn exposure_weight(mut self, weight: f64) -> Self {
        self.exposure_weight = Some(weight);
        self
    }

    pub fn max_noise(mut self, value: f64) -> Self {
        self.max_noise = Some(value);
        self
    }

    pub fn ideal_contrast(mut self, value: f64) -> Self {
        self.ideal_contrast = Some(value);
        self
    }

    pub fn ideal_sharpness(mut self, value: f64) -> Self {
        self.ideal_sharpness = Some(value);
        self
    }

    pub fn overexposure_threshold(mut self, value: u8) -> Self {
        self.overexposure_threshold = Some(value);
        self
    }

    pub fn min_dimension(mut self, value: u32) -> Self {
        self.min_dimension = Some(value);
        self
    }

    pub fn build(self) -> AnalyzerConfig {
        let defaults = AnalyzerConfig::default();

        AnalyzerConfig {
            noise_weight: self.noise_weight.unwrap_or(defaults.noise_weight),
            contrast_weight: self.contrast_weight.unwrap_or(defaults.contrast_weight),
            sharpness_weight: self.sharpness_weight.unwrap_or(defaults.sharpness_weight),
            exposure_weight: self.exposure_weight.unwrap_or(defaults.exposure_weight),
            max_noise: self.max_noise.unwrap_or(defaults.max_noise),
            ideal_contrast: self.ideal_contrast.unwrap_or(defaults.ideal_contrast),
            ideal_sharpness: self.ideal_sharpness.unwrap_or(defaults.ideal_sharpness),
            overexposure_threshold: self
                .overexposure_threshold
                .unwrap_or(defaults.overexposure_threshold),
            min_dimension: self.min_dimension.unwrap_or(defaults.min_dimension),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalyzerConfig::default();

        assert_eq!(config.noise_weight, 0.25);
        assert_eq!(config.contrast_weight, 0.25);
        assert_eq!(config.sharpness_weight, 0.35);
        assert_eq!(config.exposure_weight, 0.15);
        assert_eq!(config.overexposure_threshold, 245);
        assert_eq!(config.min_dimension, 10);
    }

    #[test]
    fn test_config_builder() {
        let config = AnalyzerConfig::builder()
            .max_noise(30.0)
            .ideal_sharpness(600.0)
            .min_dimension(32)
            .build();

        assert_eq!(config.max_noise, 30.0);
        assert_eq!(config.ideal_sharpness, 600.0);
        assert_eq!(config.min_dimension, 32);
        assert_eq!(config.ideal_contrast, 160.0);
    }

    #[test]
    fn test_low_light_preset() {
        let config = AnalyzerConfig::low_light();

        assert_eq!(config.max_noise, 80.0);
        assert_eq!(config.ideal_contrast, 120.0);
        assert_eq!(config.sharpness_weight, 0.35);
    }
}
