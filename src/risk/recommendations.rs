//! Actionable recommendations from factor scores.
//!
//! A fixed rule list evaluated in order against raw factor values.
//! High-risk days always append the rescue-medication and
//! trigger-avoidance reminders; a day with nothing to flag gets a
//! single keep-it-up message.

use super::config::RiskModelConfig;
use super::factors::FactorScores;
use super::scorer::RiskLevel;

const SLEEP_TIP: &str = "Try to get 7-8 hours of quality sleep tonight";
const STRESS_TIP: &str = "Practice stress-reduction techniques (meditation, deep breathing)";
const HYDRATION_TIP: &str = "Drink at least 8 glasses of water today";
const ACTIVITY_TIP: &str = "Aim for 30 minutes of light exercise";
const RESCUE_MEDICATION_TIP: &str = "Keep your rescue medication handy";
const AVOID_TRIGGERS_TIP: &str = "Avoid known triggers today";
const MAINTAIN_TIP: &str = "Continue your healthy habits!";

/// Maps factor scores and risk level to an ordered suggestion list.
pub struct RecommendationGenerator {
    config: RiskModelConfig,
}

impl RecommendationGenerator {
    /// Create with the default rule table.
    pub fn new() -> Self {
        Self::with_config(RiskModelConfig::default())
    }

    /// Create with a custom rule table.
    pub fn with_config(config: RiskModelConfig) -> Self {
        Self { config }
    }

    /// Generate recommendations in rule-evaluation order, truncated to
    /// the configured maximum.
    pub fn generate(&self, scores: &FactorScores, level: RiskLevel) -> Vec<String> {
        let rule = self.config.recommendations;
        let mut recommendations = Vec::new();

        if scores.poor_sleep > rule.sleep_above {
            recommendations.push(SLEEP_TIP.to_string());
        }
        if scores.high_stress > rule.stress_above {
            recommendations.push(STRESS_TIP.to_string());
        }
        if scores.low_hydration > rule.hydration_above {
            recommendations.push(HYDRATION_TIP.to_string());
        }
        if scores.low_activity > rule.activity_above {
            recommendations.push(ACTIVITY_TIP.to_string());
        }

        if level == RiskLevel::High {
            recommendations.push(RESCUE_MEDICATION_TIP.to_string());
            recommendations.push(AVOID_TRIGGERS_TIP.to_string());
        }

        if recommendations.is_empty() {
            recommendations.push(MAINTAIN_TIP.to_string());
        }

        recommendations.truncate(rule.max_items);
        recommendations
    }
}

impl Default for RecommendationGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_day_gets_maintain_message() {
        let generator = RecommendationGenerator::new();

        let recs = generator.generate(&FactorScores::default(), RiskLevel::Low);

        assert_eq!(recs, vec![MAINTAIN_TIP.to_string()]);
    }

    #[test]
    fn test_factor_rules_fire_in_order() {
        let generator = RecommendationGenerator::new();
        let scores = FactorScores {
            poor_sleep: 40,
            low_hydration: 30,
            ..Default::default()
        };

        let recs = generator.generate(&scores, RiskLevel::Low);

        assert_eq!(recs, vec![SLEEP_TIP.to_string(), HYDRATION_TIP.to_string()]);
    }

    #[test]
    fn test_high_risk_appends_both_reminders() {
        let generator = RecommendationGenerator::new();
        let scores = FactorScores {
            high_stress: 45,
            ..Default::default()
        };

        let recs = generator.generate(&scores, RiskLevel::High);

        assert_eq!(
            recs,
            vec![
                STRESS_TIP.to_string(),
                RESCUE_MEDICATION_TIP.to_string(),
                AVOID_TRIGGERS_TIP.to_string(),
            ]
        );
    }

    #[test]
    fn test_truncates_to_five() {
        let generator = RecommendationGenerator::new();
        let scores = FactorScores {
            poor_sleep: 40,
            high_stress: 45,
            low_hydration: 30,
            low_activity: 20,
            ..Default::default()
        };

        let recs = generator.generate(&scores, RiskLevel::High);

        // Four factor rules plus two high-risk reminders, capped at 5.
        assert_eq!(recs.len(), 5);
        assert_eq!(recs[4], RESCUE_MEDICATION_TIP.to_string());
    }

    #[test]
    fn test_threshold_is_strictly_greater() {
        let generator = RecommendationGenerator::new();
        let scores = FactorScores {
            poor_sleep: 20,
            low_activity: 15,
            ..Default::default()
        };

        // Scores equal to the threshold do not fire.
        let recs = generator.generate(&scores, RiskLevel::Low);
        assert_eq!(recs, vec![MAINTAIN_TIP.to_string()]);
    }
}
