//! Rule-based migraine risk engine.
//!
//! This module turns a trailing window of wellness and biometric
//! records into a daily risk assessment:
//! - Factor scoring (sleep, stress, hydration, activity, HRV, logging
//!   consistency)
//! - Weighted score combination and risk level classification
//! - Data-completeness confidence
//! - Actionable recommendations
//! - 7-day forecast orchestration
//!
//! The engine is deterministic and explainable by design: no trained
//! model, just a named rule table (`RiskModelConfig`).

pub mod config;
pub mod confidence;
pub mod factors;
pub mod forecast;
pub mod recommendations;
pub mod scorer;

// Re-exports for convenience
pub use config::{FactorWeights, RiskModelConfig};
pub use confidence::ConfidenceEstimator;
pub use factors::{FactorScores, RiskFactor, RiskFactorCalculator};
pub use forecast::{ForecastGenerator, RiskAssessment};
pub use recommendations::RecommendationGenerator;
pub use scorer::{FactorImpact, RiskLevel, RiskScorer};
