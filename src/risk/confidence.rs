//! Assessment confidence from data completeness.
//!
//! Confidence reflects how much of the lookback window is covered by
//! actual records, not a statistical confidence interval. Wellness
//! logs contribute up to 70 points, biometrics up to 30; each stream
//! saturates at a full week of data.

use super::config::{ConfidenceRule, RiskModelConfig};

/// Derives a 0-100 confidence score from record counts.
pub struct ConfidenceEstimator {
    rule: ConfidenceRule,
}

impl ConfidenceEstimator {
    /// Create with the default rule table.
    pub fn new() -> Self {
        Self::with_config(&RiskModelConfig::default())
    }

    /// Create with a custom rule table.
    pub fn with_config(config: &RiskModelConfig) -> Self {
        Self {
            rule: config.confidence,
        }
    }

    /// Confidence for a window with the given record counts, rounded
    /// to 2 decimals.
    pub fn estimate(&self, log_count: usize, bio_count: usize) -> f32 {
        let log_points = ((log_count as f32 / self.rule.saturation_days)
            * self.rule.log_max_points)
            .min(100.0);
        let bio_points = ((bio_count as f32 / self.rule.saturation_days)
            * self.rule.bio_max_points)
            .min(self.rule.bio_max_points);

        // Duplicate log dates can push the sum past 100; the reported
        // range is always 0-100.
        let total = (log_points + bio_points).min(100.0);
        (total * 100.0).round() / 100.0
    }
}

impl Default for ConfidenceEstimator {
    fn default() -> Self {
        Self::new()
    }
}
