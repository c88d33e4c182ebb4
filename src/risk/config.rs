//! Risk model configuration.
//!
//! All weights, thresholds, and band scores the scoring pipeline uses
//! live here as one named structure, so the rule table can be unit
//! tested and swapped without touching the control flow.

use serde::{Deserialize, Serialize};

use super::factors::RiskFactor;

/// Sleep factor rule: low nightly sleep raises risk in two bands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SleepRule {
    /// Mean below this many hours scores the severe band
    pub severe_below: f32,
    pub severe_score: u8,
    /// Mean below this many hours (but above severe) scores the low band
    pub low_below: f32,
    pub low_score: u8,
    /// Mean assumed when the window has no sleep data
    pub default_mean: f32,
}

/// Stress factor rule: high mean stress raises risk in two bands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StressRule {
    /// Mean above this level scores the high band
    pub high_above: f32,
    pub high_score: u8,
    /// Mean above this level (but at most high) scores the elevated band
    pub elevated_above: f32,
    pub elevated_score: u8,
    pub default_mean: f32,
}

/// Hydration factor rule: low mean water intake raises risk in two bands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HydrationRule {
    pub low_below: f32,
    pub low_score: u8,
    pub marginal_below: f32,
    pub marginal_score: u8,
    pub default_mean: f32,
}

/// Activity factor rule: sedentary weeks raise risk.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ActivityRule {
    /// Mean daily exercise below this many minutes scores
    pub low_below_minutes: f32,
    pub low_score: u8,
    pub default_mean: f32,
}

/// HRV factor rule: low heart rate variability raises risk.
///
/// Only applies when the window contains at least one sample with an
/// HRV reading.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HrvRule {
    pub low_below_ms: f32,
    pub low_score: u8,
}

/// Logging-consistency rule: sparse wellness logging raises risk.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConsistencyRule {
    /// Fewer than this many log entries in the window scores
    pub min_log_days: usize,
    pub score: u8,
}

/// Per-factor weights applied when combining raw factor scores.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FactorWeights {
    pub poor_sleep: f32,
    pub high_stress: f32,
    pub low_hydration: f32,
    pub high_hrv_variation: f32,
    pub weather_sensitivity: f32,
    pub low_activity: f32,
    pub irregular_patterns: f32,
}

impl FactorWeights {
    /// Weight for a single factor.
    pub fn weight_for(&self, factor: RiskFactor) -> f32 {
        match factor {
            RiskFactor::PoorSleep => self.poor_sleep,
            RiskFactor::HighStress => self.high_stress,
            RiskFactor::LowHydration => self.low_hydration,
            RiskFactor::HighHrvVariation => self.high_hrv_variation,
            RiskFactor::WeatherSensitivity => self.weather_sensitivity,
            RiskFactor::LowActivity => self.low_activity,
            RiskFactor::IrregularPatterns => self.irregular_patterns,
        }
    }

    /// Sum of all weights. Expected to be 1.0 for a well-formed table.
    pub fn total(&self) -> f32 {
        self.poor_sleep
            + self.high_stress
            + self.low_hydration
            + self.high_hrv_variation
            + self.weather_sensitivity
            + self.low_activity
            + self.irregular_patterns
    }
}

/// Confidence rule: data completeness over the lookback window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConfidenceRule {
    /// Days of data at which each stream saturates
    pub saturation_days: f32,
    /// Maximum points the wellness-log stream contributes
    pub log_max_points: f32,
    /// Maximum points the biometric stream contributes
    pub bio_max_points: f32,
}

/// Thresholds above which a factor earns a recommendation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RecommendationRule {
    pub sleep_above: u8,
    pub stress_above: u8,
    pub hydration_above: u8,
    pub activity_above: u8,
    /// Maximum recommendations returned
    pub max_items: usize,
}

/// Complete rule table for the risk scoring pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskModelConfig {
    /// Days of history each assessment looks back over
    pub lookback_days: i64,
    /// Version string stamped on every assessment
    pub model_version: String,
    pub weights: FactorWeights,
    pub sleep: SleepRule,
    pub stress: StressRule,
    pub hydration: HydrationRule,
    pub activity: ActivityRule,
    pub hrv: HrvRule,
    pub consistency: ConsistencyRule,
    pub confidence: ConfidenceRule,
    pub recommendations: RecommendationRule,
    /// Scores at or above this are moderate risk
    pub moderate_threshold: u8,
    /// Scores at or above this are high risk
    pub high_threshold: u8,
    /// Raw factor scores must exceed this to appear in top factors
    pub top_factor_min_impact: u8,
    /// At most this many top factors are reported
    pub max_top_factors: usize,
}

impl Default for RiskModelConfig {
    fn default() -> Self {
        Self {
            lookback_days: 7,
            model_version: "1.0-simple".to_string(),
            weights: FactorWeights {
                poor_sleep: 0.25,
                high_stress: 0.25,
                low_hydration: 0.15,
                high_hrv_variation: 0.15,
                weather_sensitivity: 0.05,
                low_activity: 0.10,
                irregular_patterns: 0.05,
            },
            sleep: SleepRule {
                severe_below: 6.0,
                severe_score: 40,
                low_below: 7.0,
                low_score: 25,
                default_mean: 7.0,
            },
            stress: StressRule {
                high_above: 7.0,
                high_score: 45,
                elevated_above: 5.0,
                elevated_score: 25,
                default_mean: 5.0,
            },
            hydration: HydrationRule {
                low_below: 4.0,
                low_score: 30,
                marginal_below: 6.0,
                marginal_score: 15,
                default_mean: 6.0,
            },
            activity: ActivityRule {
                low_below_minutes: 15.0,
                low_score: 20,
                default_mean: 0.0,
            },
            hrv: HrvRule {
                low_below_ms: 30.0,
                low_score: 35,
            },
            consistency: ConsistencyRule {
                min_log_days: 5,
                score: 20,
            },
            confidence: ConfidenceRule {
                saturation_days: 7.0,
                log_max_points: 70.0,
                bio_max_points: 30.0,
            },
            recommendations: RecommendationRule {
                sleep_above: 20,
                stress_above: 20,
                hydration_above: 15,
                activity_above: 15,
                max_items: 5,
            },
            moderate_threshold: 30,
            high_threshold: 70,
            top_factor_min_impact: 5,
            max_top_factors: 3,
        }
    }
}
