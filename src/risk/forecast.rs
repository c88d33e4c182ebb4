//! Daily risk assessment and the 7-day forecast.
//!
//! Composes the factor calculator, scorer, confidence estimator, and
//! recommendation generator for a sequence of target dates. Each date
//! is assessed independently from the records preceding it; forecast
//! days never see invented future data, so days far past the last
//! recorded log degenerate toward the empty-window defaults.

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::config::RiskModelConfig;
use super::confidence::ConfidenceEstimator;
use super::factors::RiskFactorCalculator;
use super::recommendations::RecommendationGenerator;
use super::scorer::{FactorImpact, RiskLevel, RiskScorer};
use crate::records::{BiometricSample, WellnessLog};

/// A single day's risk assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Date the assessment is for
    pub date: NaiveDate,
    /// Overall risk score, 0-100
    pub risk_score: u8,
    /// Categorical risk level
    pub risk_level: RiskLevel,
    /// Up to 3 strongest contributing factors
    pub top_factors: Vec<FactorImpact>,
    /// Data-completeness confidence, 0-100
    pub confidence: f32,
    /// Up to 5 actionable recommendations
    pub recommendations: Vec<String>,
    /// Version of the rule table that produced this assessment
    pub model_version: String,
}

/// Produces risk assessments for target dates.
pub struct ForecastGenerator {
    config: RiskModelConfig,
    factors: RiskFactorCalculator,
    scorer: RiskScorer,
    confidence: ConfidenceEstimator,
    recommendations: RecommendationGenerator,
}

impl ForecastGenerator {
    /// Create with the default rule table.
    pub fn new() -> Self {
        Self::with_config(RiskModelConfig::default())
    }

    /// Create with a custom rule table.
    pub fn with_config(config: RiskModelConfig) -> Self {
        Self {
            factors: RiskFactorCalculator::with_config(config.clone()),
            scorer: RiskScorer::with_config(config.clone()),
            confidence: ConfidenceEstimator::with_config(&config),
            recommendations: RecommendationGenerator::with_config(config.clone()),
            config,
        }
    }

    /// Assess risk for a single target date.
    ///
    /// The record slices may span any range; the half-open lookback
    /// window `[target - lookback_days, target)` is applied here.
    pub fn assess(
        &self,
        target_date: NaiveDate,
        logs: &[WellnessLog],
        biometrics: &[BiometricSample],
    ) -> RiskAssessment {
        let window_start = target_date - Duration::days(self.config.lookback_days);

        let window_logs: Vec<WellnessLog> = logs
            .iter()
            .filter(|l| l.date >= window_start && l.date < target_date)
            .copied()
            .collect();

        let bio_from = window_start.and_time(NaiveTime::MIN).and_utc();
        let bio_to = target_date.and_time(NaiveTime::MIN).and_utc();
        let window_bio: Vec<BiometricSample> = biometrics
            .iter()
            .filter(|s| s.timestamp >= bio_from && s.timestamp < bio_to)
            .copied()
            .collect();

        let scores = self.factors.calculate(&window_logs, &window_bio);
        let risk_score = self.scorer.score(&scores);
        let risk_level = self.scorer.level(risk_score);

        RiskAssessment {
            date: target_date,
            risk_score,
            risk_level,
            top_factors: self.scorer.top_factors(&scores),
            confidence: self.confidence.estimate(window_logs.len(), window_bio.len()),
            recommendations: self.recommendations.generate(&scores, risk_level),
            model_version: self.config.model_version.clone(),
        }
    }

    /// Lazily assess the next 7 days, starting from `today`.
    ///
    /// Stateless and restartable: iterating twice yields identical
    /// assessments for the same record slices.
    pub fn predict_next_7_days<'a>(
        &'a self,
        today: NaiveDate,
        logs: &'a [WellnessLog],
        biometrics: &'a [BiometricSample],
    ) -> impl Iterator<Item = RiskAssessment> + 'a {
        (0..7).map(move |offset| self.assess(today + Duration::days(offset), logs, biometrics))
    }
}

impl Default for ForecastGenerator {
    fn default() -> Self {
        Self::new()
    }
}
