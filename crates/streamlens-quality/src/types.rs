//! Quality report types.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Verdict for one analyzed frame.
///
/// The five scored buckets are derived from the overall score with inclusive
/// lower bounds; the two rejection markers carry no score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum QualityStatus {
    Excellent,
    Good,
    Fair,
    Poor,
    VeryPoor,
    /// Frame was empty or below the minimum analyzable size.
    InvalidFrame,
    /// Scoring itself failed (truncated buffer, inconsistent stride).
    AnalysisError,
}

impl QualityStatus {
    /// Bucket an overall score. Bounds are inclusive at the lower edge.
    pub fn from_score(score: f64) -> QualityStatus {
        if score >= 80.0 {
            QualityStatus::Excellent
        } else if score >= 60.0 {
            QualityStatus::Good
        } else if score >= 40.0 {
            QualityStatus::Fair
        } else if score >= 20.0 {
            QualityStatus::Poor
        } else {
            QualityStatus::VeryPoor
        }
    }

    /// True for the five scored buckets, false for rejections.
    pub fn is_scored(&self) -> bool {
        !matches!(
            self,
            QualityStatus::InvalidFrame | QualityStatus::AnalysisError
        )
    }

    pub fn label(&self) -> &str {
        match self {
            QualityStatus::Excellent => "Excellent",
            QualityStatus::Good => "Good",
            QualityStatus::Fair => "Fair",
            QualityStatus::Poor => "Poor",
            QualityStatus::VeryPoor => "Very Poor",
            QualityStatus::InvalidFrame => "Invalid frame",
            QualityStatus::AnalysisError => "Analysis error",
        }
    }
}

impl fmt::Display for QualityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Scores for one analyzed frame. All sub-scores lie in [0, 100], higher is
/// better except `overexposed_percent` where lower is better.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QualityReport {
    pub noise_score: f64,
    pub contrast_score: f64,
    pub sharpness_score: f64,
    pub overexposed_percent: f64,
    pub overall_score: f64,
    pub status: QualityStatus,
    pub is_valid: bool,
}

impl QualityReport {
    /// Report for a frame rejected before scoring. Every score is zero.
    pub fn rejected(status: QualityStatus) -> QualityReport {
        QualityReport {
            noise_score: 0.0,
            contrast_score: 0.0,
            sharpness_score: 0.0,
            overexposed_percent: 0.0,
            overall_score: 0.0,
            status,
            is_valid: false,
        }
    }

    /// One-line summary for logs and status bars.
    pub fn message(&self) -> String {
        if self.is_valid {
            format!(
                "{} ({:.1}) noise {:.1}, contrast {:.1}, sharpness {:.1}, overexposed {:.1}%",
                self.status.label(),
                self.overall_score,
                self.noise_score,
                self.contrast_score,
                self.sharpness_score,
                self.overexposed_percent
            )
        } else {
            self.status.label().to_string()
        }
    }
}

impl fmt::Display for QualityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
