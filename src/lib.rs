//! AuraTrack - Migraine Tracking Engine
//!
//! A self-hosted migraine tracking engine built in Rust. Turns per-user
//! health time series (wellness logs, biometric samples, episode
//! events) into daily risk assessments with contributing factors and
//! recommendations, plus periodic pattern and trigger analytics.

pub mod analytics;
pub mod jobs;
pub mod records;
pub mod risk;
pub mod storage;

// Re-export commonly used types
pub use analytics::{AnalyticsAggregator, PeriodAnalytics};
pub use records::{BiometricSample, EpisodeEvent, WellnessLog};
pub use risk::{ForecastGenerator, RiskAssessment, RiskModelConfig};
pub use storage::{Database, HealthStore, ResultsStore};
