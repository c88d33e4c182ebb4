//! Overall health summary view.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::mean;
use crate::records::{EpisodeEvent, WellnessLog};

/// Episode statistics for the summary period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeStats {
    pub total: u32,
    /// Mean severity; 0 when the period has no episodes
    pub avg_severity: f32,
}

/// Wellness log statistics for the summary period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WellnessStats {
    pub avg_sleep: f32,
    pub avg_stress: f32,
    pub avg_water: f32,
    pub log_count: u32,
}

/// Combined episode and wellness summary over a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSummary {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub episodes: EpisodeStats,
    pub wellness: WellnessStats,
}

/// Summarize already-windowed records for display.
///
/// Unlike period analytics, the summary view is always produced and
/// defaults empty averages to 0.
pub fn summarize(
    period_start: NaiveDate,
    period_end: NaiveDate,
    episodes: &[EpisodeEvent],
    logs: &[WellnessLog],
) -> HealthSummary {
    HealthSummary {
        period_start,
        period_end,
        episodes: EpisodeStats {
            total: episodes.len() as u32,
            avg_severity: mean(episodes.iter().map(|e| e.severity as f32)).unwrap_or(0.0),
        },
        wellness: WellnessStats {
            avg_sleep: mean(logs.iter().map(|l| l.sleep_hours)).unwrap_or(0.0),
            avg_stress: mean(logs.iter().map(|l| l.stress_level as f32)).unwrap_or(0.0),
            avg_water: mean(logs.iter().map(|l| l.water_intake)).unwrap_or(0.0),
            log_count: logs.len() as u32,
        },
    }
}
