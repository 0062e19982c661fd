use std::time::Duration;

use streamlens_quality::AnalyzerConfig;

use crate::source::SourceOptions;

/// Configuration for a capture session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Target spacing between read attempts. Default: 33ms (about 30 fps).
    pub frame_interval: Duration,

    /// Run quality analysis on every Nth successful read. Default: 10,
    /// which at the default tick rate is roughly three reports per second.
    pub analysis_interval: u32,

    /// Reconnect attempts before the session gives up. Default: 5.
    pub max_reconnect_attempts: u32,

    /// Base reconnect delay, multiplied by the attempt number. Default: 1s,
    /// giving 1s, 2s, 3s, 4s, 5s across the default attempt budget.
    pub reconnect_backoff: Duration,

    /// How long `stop()` waits for the worker before abandoning it.
    /// Default: 5s.
    pub stop_timeout: Duration,

    /// Options passed through to the stream backend on every open.
    pub source_options: SourceOptions,

    /// Quality analyzer tuning.
    pub analyzer: AnalyzerConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(33),
            analysis_interval: 10,
            max_reconnect_attempts: 5,
            reconnect_backoff: Duration::from_millis(1000),
            stop_timeout: Duration::from_secs(5),
            source_options: SourceOptions::default(),
            analyzer: AnalyzerConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset:
    /// - STREAMLENS_FRAME_INTERVAL_MS
    /// - STREAMLENS_ANALYSIS_INTERVAL
    /// - STREAMLENS_MAX_RECONNECT_ATTEMPTS
    /// - STREAMLENS_RECONNECT_BACKOFF_MS
    /// and the analyzer variables recognized by [`AnalyzerConfig::from_env`].
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("STREAMLENS_FRAME_INTERVAL_MS") {
            if let Ok(ms) = val.parse::<u64>() {
                config.frame_interval = Duration::from_millis(ms);
            }
        }
        if let Ok(val) = std::env::var("STREAMLENS_ANALYSIS_INTERVAL") {
            if let Ok(every) = val.parse() {
                config.analysis_interval = every;
            }
        }
        if let Ok(val) = std::env::var("STREAMLENS_MAX_RECONNECT_ATTEMPTS") {
            if let Ok(attempts) = val.parse() {
                config.max_reconnect_attempts = attempts;
            }
        }
        if let Ok(val) = std::env::var("STREAMLENS_RECONNECT_BACKOFF_MS") {
            if let Ok(ms) = val.parse::<u64>() {
                config.reconnect_backoff = Duration::from_millis(ms);
            }
        }
        config.analyzer = AnalyzerConfig::from_env();

        config
    }
}
