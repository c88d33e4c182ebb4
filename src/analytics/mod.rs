//! Retrospective analytics over episode and wellness records.
//!
//! This module provides the aggregation side of the engine:
//! - Period analytics (totals, averages, trigger ranking, weekday
//!   pattern, episode-day group means)
//! - Weekly pattern histograms (day-of-week, time-of-day)
//! - Episode-day vs non-episode-day habit comparison
//! - Overall health summary
//!
//! All computations are pure reads over already-fetched windows;
//! missing data yields absent fields, never an error.

pub mod aggregator;
pub mod correlations;
pub mod error;
pub mod patterns;
pub mod summary;
pub mod triggers;

// Re-exports for convenience
pub use aggregator::{AnalyticsAggregator, PeriodAnalytics};
pub use correlations::{compare_episode_days, HabitComparison, HabitMeans};
pub use error::{AnalyticsError, AnalyticsResult};
pub use patterns::{weekly_patterns, TimeOfDay, TimeOfDayHistogram, WeeklyPatterns};
pub use summary::{summarize, HealthSummary};
pub use triggers::{rank_triggers, top_triggers, TriggerCount, TRIGGER_VIEW_LIMIT};

/// Arithmetic mean, `None` for an empty iterator.
pub(crate) fn mean(values: impl Iterator<Item = f32>) -> Option<f32> {
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
