//! Risk score combination and classification.

use serde::{Deserialize, Serialize};

use super::config::RiskModelConfig;
use super::factors::{FactorScores, RiskFactor};

/// Categorical risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Stable lowercase key used in persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        }
    }

    /// Get display label.
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A factor's contribution as reported in an assessment.
///
/// `impact` is the raw (pre-weight) factor score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorImpact {
    /// Human-readable factor label
    pub factor: String,
    /// Raw factor score
    pub impact: u8,
}

/// Combines factor scores into an overall risk score and level.
pub struct RiskScorer {
    config: RiskModelConfig,
}

impl RiskScorer {
    /// Create with the default rule table.
    pub fn new() -> Self {
        Self::with_config(RiskModelConfig::default())
    }

    /// Create with a custom rule table.
    pub fn with_config(config: RiskModelConfig) -> Self {
        Self { config }
    }

    /// Weighted overall risk score, clamped to 0-100 and truncated.
    pub fn score(&self, scores: &FactorScores) -> u8 {
        let weighted: f32 = scores
            .iter()
            .map(|(factor, raw)| raw as f32 * self.config.weights.weight_for(factor))
            .sum();

        weighted.clamp(0.0, 100.0) as u8
    }

    /// Classify a score into its risk level.
    pub fn level(&self, score: u8) -> RiskLevel {
        if score < self.config.moderate_threshold {
            RiskLevel::Low
        } else if score < self.config.high_threshold {
            RiskLevel::Moderate
        } else {
            RiskLevel::High
        }
    }

    /// Top contributing factors, strongest first.
    ///
    /// Sorted descending by raw score; the stable sort breaks ties by
    /// factor declaration order. Only scores above the minimum impact
    /// are reported, at most `max_top_factors` of them.
    pub fn top_factors(&self, scores: &FactorScores) -> Vec<FactorImpact> {
        let mut ranked: Vec<(RiskFactor, u8)> = scores.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        ranked
            .into_iter()
            .filter(|&(_, raw)| raw > self.config.top_factor_min_impact)
            .take(self.config.max_top_factors)
            .map(|(factor, raw)| FactorImpact {
                factor: factor.label().to_string(),
                impact: raw,
            })
            .collect()
    }
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new()
    }
}
