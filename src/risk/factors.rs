//! Risk factor calculation over a lookback window.
//!
//! Converts a window of wellness logs and biometric samples into a
//! fixed set of named factor scores. Each factor scores 0 when its
//! condition is not met; an entirely empty wellness window scores all
//! factors 0 (no signal).

use serde::{Deserialize, Serialize};

use super::config::RiskModelConfig;
use crate::records::{BiometricSample, WellnessLog};

/// The named risk factors, in fixed declaration order.
///
/// The order here is load-bearing: ties in top-factor ranking are
/// broken by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    PoorSleep,
    HighStress,
    LowHydration,
    HighHrvVariation,
    WeatherSensitivity,
    LowActivity,
    IrregularPatterns,
}

impl RiskFactor {
    /// All factors in declaration order.
    pub const ALL: [RiskFactor; 7] = [
        RiskFactor::PoorSleep,
        RiskFactor::HighStress,
        RiskFactor::LowHydration,
        RiskFactor::HighHrvVariation,
        RiskFactor::WeatherSensitivity,
        RiskFactor::LowActivity,
        RiskFactor::IrregularPatterns,
    ];

    /// Stable snake_case key.
    pub fn key(&self) -> &'static str {
        match self {
            RiskFactor::PoorSleep => "poor_sleep",
            RiskFactor::HighStress => "high_stress",
            RiskFactor::LowHydration => "low_hydration",
            RiskFactor::HighHrvVariation => "high_hrv_variation",
            RiskFactor::WeatherSensitivity => "weather_sensitivity",
            RiskFactor::LowActivity => "low_activity",
            RiskFactor::IrregularPatterns => "irregular_patterns",
        }
    }

    /// Human-readable label reported in assessments.
    pub fn label(&self) -> &'static str {
        match self {
            RiskFactor::PoorSleep => "Insufficient Sleep",
            RiskFactor::HighStress => "High Stress Level",
            RiskFactor::LowHydration => "Low Water Intake",
            RiskFactor::HighHrvVariation => "Irregular Heart Rate",
            RiskFactor::WeatherSensitivity => "Weather Changes",
            RiskFactor::LowActivity => "Low Physical Activity",
            RiskFactor::IrregularPatterns => "Irregular Sleep/Wake Pattern",
        }
    }
}

impl std::fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Raw (pre-weight) scores for every factor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorScores {
    pub poor_sleep: u8,
    pub high_stress: u8,
    pub low_hydration: u8,
    pub high_hrv_variation: u8,
    pub weather_sensitivity: u8,
    pub low_activity: u8,
    pub irregular_patterns: u8,
}

impl FactorScores {
    /// Raw score for a single factor.
    pub fn get(&self, factor: RiskFactor) -> u8 {
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

    /// Iterate (factor, raw score) pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (RiskFactor, u8)> + '_ {
        RiskFactor::ALL.iter().map(move |&f| (f, self.get(f)))
    }
}

/// Calculates factor scores from a lookback window of records.
pub struct RiskFactorCalculator {
    config: RiskModelConfig,
}

impl RiskFactorCalculator {
    /// Create with the default rule table.
    pub fn new() -> Self {
        Self::with_config(RiskModelConfig::default())
    }

    /// Create with a custom rule table.
    pub fn with_config(config: RiskModelConfig) -> Self {
        Self { config }
    }

    /// Score all factors for a window of records.
    ///
    /// Both slices must already be filtered to the lookback window.
    /// An empty wellness window short-circuits to all zeros.
    pub fn calculate(
        &self,
        logs: &[WellnessLog],
        biometrics: &[BiometricSample],
    ) -> FactorScores {
        let mut scores = FactorScores::default();

        if logs.is_empty() {
            return scores;
        }

        let sleep = self.config.sleep;
        let avg_sleep =
            mean(logs.iter().map(|l| l.sleep_hours)).unwrap_or(sleep.default_mean);
        if avg_sleep < sleep.severe_below {
            scores.poor_sleep = sleep.severe_score;
        } else if avg_sleep < sleep.low_below {
            scores.poor_sleep = sleep.low_score;
        }

        let stress = self.config.stress;
        let avg_stress =
            mean(logs.iter().map(|l| l.stress_level as f32)).unwrap_or(stress.default_mean);
        if avg_stress > stress.high_above {
            scores.high_stress = stress.high_score;
        } else if avg_stress > stress.elevated_above {
            scores.high_stress = stress.elevated_score;
        }

        let hydration = self.config.hydration;
        let avg_water =
            mean(logs.iter().map(|l| l.water_intake)).unwrap_or(hydration.default_mean);
        if avg_water < hydration.low_below {
            scores.low_hydration = hydration.low_score;
        } else if avg_water < hydration.marginal_below {
            scores.low_hydration = hydration.marginal_score;
        }

        let activity = self.config.activity;
        let avg_exercise = mean(logs.iter().map(|l| l.exercise_duration as f32))
            .unwrap_or(activity.default_mean);
        if avg_exercise < activity.low_below_minutes {
            scores.low_activity = activity.low_score;
        }

        // HRV only counts when at least one sample carries a reading.
        if let Some(avg_hrv) = mean(biometrics.iter().filter_map(|s| s.hrv)) {
            if avg_hrv < self.config.hrv.low_below_ms {
                scores.high_hrv_variation = self.config.hrv.low_score;
            }
        }

        // weather_sensitivity stays 0: reserved for a future weather
        // data integration.

        if logs.len() < self.config.consistency.min_log_days {
            scores.irregular_patterns = self.config.consistency.score;
        }

        scores
    }
}

impl Default for RiskFactorCalculator {
    fn default() -> Self {
        Self::new()
    }
}

fn mean(values: impl Iterator<Item = f32>) -> Option<f32> {
    let mut sum = 0.0;
    let mut count = 0u32;
    for v in values {
        sum += v;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn log(date: NaiveDate, sleep: f32, stress: u8, water: f32, exercise: u32) -> WellnessLog {
        WellnessLog {
            date,
            sleep_hours: sleep,
            stress_level: stress,
            water_intake: water,
            exercise_duration: exercise,
        }
    }

    fn week_of_logs(sleep: f32, stress: u8, water: f32, exercise: u32) -> Vec<WellnessLog> {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        (0..7)
            .map(|i| log(start + chrono::Duration::days(i), sleep, stress, water, exercise))
            .collect()
    }

    fn sample(hrv: Option<f32>) -> BiometricSample {
        BiometricSample {
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
            heart_rate: 68,
            hrv,
        }
    }

    #[test]
    fn test_empty_window_scores_all_zero() {
        let calc = RiskFactorCalculator::new();
        let scores = calc.calculate(&[], &[sample(Some(20.0))]);
        assert_eq!(scores, FactorScores::default());
    }

    #[test]
    fn test_high_risk_week() {
        let calc = RiskFactorCalculator::new();
        let logs = week_of_logs(5.0, 8, 3.0, 0);

        let scores = calc.calculate(&logs, &[]);

        assert_eq!(scores.poor_sleep, 40);
        assert_eq!(scores.high_stress, 45);
        assert_eq!(scores.low_hydration, 30);
        assert_eq!(scores.low_activity, 20);
        assert_eq!(scores.high_hrv_variation, 0);
        assert_eq!(scores.weather_sensitivity, 0);
        assert_eq!(scores.irregular_patterns, 0);
    }

    #[test]
    fn test_healthy_week_scores_zero() {
        let calc = RiskFactorCalculator::new();
        let logs = week_of_logs(8.0, 3, 8.0, 45);

        let scores = calc.calculate(&logs, &[sample(Some(55.0))]);

        assert_eq!(scores, FactorScores::default());
    }

    #[test]
    fn test_mild_band_thresholds() {
        let calc = RiskFactorCalculator::new();
        // Sleep in [6, 7), stress in (5, 7], water in [4, 6)
        let logs = week_of_logs(6.5, 6, 5.0, 30);

        let scores = calc.calculate(&logs, &[]);

        assert_eq!(scores.poor_sleep, 25);
        assert_eq!(scores.high_stress, 25);
        assert_eq!(scores.low_hydration, 15);
        assert_eq!(scores.low_activity, 0);
    }

    #[test]
    fn test_hrv_requires_readings() {
        let calc = RiskFactorCalculator::new();
        let logs = week_of_logs(8.0, 3, 8.0, 45);

        // Samples present but none carry an HRV value
        let scores = calc.calculate(&logs, &[sample(None), sample(None)]);
        assert_eq!(scores.high_hrv_variation, 0);

        // Low HRV reading flips the factor
        let scores = calc.calculate(&logs, &[sample(None), sample(Some(22.0))]);
        assert_eq!(scores.high_hrv_variation, 35);

        // Healthy HRV does not
        let scores = calc.calculate(&logs, &[sample(Some(48.0))]);
        assert_eq!(scores.high_hrv_variation, 0);
    }

    #[test]
    fn test_sparse_logging_flags_irregular_patterns() {
        let calc = RiskFactorCalculator::new();
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let logs: Vec<WellnessLog> = (0..4)
            .map(|i| log(start + chrono::Duration::days(i), 8.0, 3, 8.0, 45))
            .collect();

        let scores = calc.calculate(&logs, &[]);

        assert_eq!(scores.irregular_patterns, 20);
    }
}
