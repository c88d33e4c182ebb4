//! Period analytics aggregation.
//!
//! Summarizes episode and wellness records over an inclusive date
//! window: totals, averages, trigger ranking, weekday pattern, and the
//! episode-day group means reported as the sleep/stress correlation
//! fields.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::{AnalyticsError, AnalyticsResult};
use super::mean;
use super::triggers::{rank_triggers, TriggerCount};
use crate::records::{EpisodeEvent, WellnessLog};

/// Aggregated statistics for one user over one period.
///
/// The `best_*` fields and `worst_time_of_day` are placeholders kept
/// for schema stability; only the worst day of week is computed.
/// Time-of-day exposure comes from the weekly patterns view instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodAnalytics {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    /// Episodes whose start date falls inside the window
    pub total_episodes: u32,
    /// Mean severity across those episodes
    pub avg_severity: Option<f32>,
    /// Mean duration across episodes with a recorded end time
    pub avg_duration_hours: Option<f32>,
    /// Up to 5 most frequent triggers
    pub top_triggers: Vec<TriggerCount>,
    pub best_day_of_week: Option<String>,
    /// Weekday with the most episodes
    pub worst_day_of_week: Option<String>,
    pub best_time_of_day: Option<String>,
    pub worst_time_of_day: Option<String>,
    /// Mean sleep hours on episode days (a group mean, not a
    /// correlation coefficient; the field name is kept for wire
    /// compatibility)
    pub sleep_correlation: Option<f32>,
    /// Mean stress level on episode days (same caveat)
    pub stress_correlation: Option<f32>,
}

/// Computes `PeriodAnalytics` from already-fetched record windows.
pub struct AnalyticsAggregator {
    /// Maximum triggers reported per period
    trigger_limit: usize,
}

impl AnalyticsAggregator {
    /// Create with the default trigger limit (5).
    pub fn new() -> Self {
        Self { trigger_limit: 5 }
    }

    /// Aggregate a user's records over `[period_start, period_end]`,
    /// both ends inclusive.
    ///
    /// Returns `Ok(None)` when no episodes fall inside the window: an
    /// empty period produces no analytics record at all rather than a
    /// zero-filled one.
    pub fn aggregate(
        &self,
        period_start: NaiveDate,
        period_end: NaiveDate,
        episodes: &[EpisodeEvent],
        logs: &[WellnessLog],
    ) -> AnalyticsResult<Option<PeriodAnalytics>> {
        if period_end < period_start {
            return Err(AnalyticsError::InvalidWindow {
                start: period_start,
                end: period_end,
            });
        }

        let mut in_window: Vec<&EpisodeEvent> = episodes
            .iter()
            .filter(|e| {
                let date = e.start_time.date_naive();
                date >= period_start && date <= period_end
            })
            .collect();

        if in_window.is_empty() {
            return Ok(None);
        }

        // Scan in ascending start order so ties resolve the same way
        // regardless of input order.
        in_window.sort_by_key(|e| e.start_time);

        let avg_severity = mean(in_window.iter().map(|e| e.severity as f32));
        let avg_duration_hours = mean(in_window.iter().filter_map(|e| e.duration_hours()));

        let top_triggers = rank_triggers(
            in_window
                .iter()
                .flat_map(|e| e.triggers.iter().map(String::as_str)),
            self.trigger_limit,
        );

        let worst_day_of_week = worst_weekday(&in_window);

        let episode_dates: HashSet<NaiveDate> =
            in_window.iter().map(|e| e.start_time.date_naive()).collect();
        let (sleep_correlation, stress_correlation) =
            episode_day_group_means(logs, period_start, period_end, &episode_dates);

        Ok(Some(PeriodAnalytics {
            period_start,
            period_end,
            total_episodes: in_window.len() as u32,
            avg_severity,
            avg_duration_hours,
            top_triggers,
            best_day_of_week: None,
            worst_day_of_week: Some(worst_day_of_week),
            best_time_of_day: None,
            worst_time_of_day: None,
            sleep_correlation,
            stress_correlation,
        }))
    }
}

impl Default for AnalyticsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Weekday with the highest episode count.
///
/// Ties go to the weekday first encountered in ascending start order.
fn worst_weekday(episodes: &[&EpisodeEvent]) -> String {
    let mut counts: Vec<(String, u32)> = Vec::new();

    for episode in episodes {
        let day = episode.start_time.format("%A").to_string();
        match counts.iter_mut().find(|(name, _)| *name == day) {
            Some((_, count)) => *count += 1,
            None => counts.push((day, 1)),
        }
    }

    let mut worst = (String::new(), 0u32);
    for (day, count) in counts {
        if count > worst.1 {
            worst = (day, count);
        }
    }
    worst.0
}

/// Mean sleep hours and stress level across wellness logs dated on
/// episode days inside the window.
fn episode_day_group_means(
    logs: &[WellnessLog],
    period_start: NaiveDate,
    period_end: NaiveDate,
    episode_dates: &HashSet<NaiveDate>,
) -> (Option<f32>, Option<f32>) {
    let episode_day_logs: Vec<&WellnessLog> = logs
        .iter()
        .filter(|l| {
            l.date >= period_start && l.date <= period_end && episode_dates.contains(&l.date)
        })
        .collect();

    (
        mean(episode_day_logs.iter().map(|l| l.sleep_hours)),
        mean(episode_day_logs.iter().map(|l| l.stress_level as f32)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use crate::records::PainLocation;

    fn episode(
        y: i32,
        m: u32,
        d: u32,
        h: u32,
        severity: u8,
        duration_hours: Option<i64>,
        triggers: &[&str],
    ) -> EpisodeEvent {
        let start = Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap();
        EpisodeEvent {
            id: Uuid::new_v4(),
            start_time: start,
            end_time: duration_hours.map(|hours| start + chrono::Duration::hours(hours)),
            severity,
            pain_location: PainLocation::Both,
            symptoms: vec![],
            triggers: triggers.iter().map(|t| t.to_string()).collect(),
            notes: None,
        }
    }

    fn log(y: i32, m: u32, d: u32, sleep: f32, stress: u8) -> WellnessLog {
        WellnessLog {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            sleep_hours: sleep,
            stress_level: stress,
            water_intake: 6.0,
            exercise_duration: 30,
        }
    }

    fn window() -> (NaiveDate, NaiveDate) {
        (
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        )
    }

    #[test]
    fn test_invalid_window_is_rejected() {
        let aggregator = AnalyticsAggregator::new();
        let (start, end) = window();

        let result = aggregator.aggregate(end, start, &[], &[]);

        assert!(matches!(
            result,
            Err(AnalyticsError::InvalidWindow { .. })
        ));
    }

    #[test]
    fn test_empty_window_produces_no_record() {
        let aggregator = AnalyticsAggregator::new();
        let (start, end) = window();
        // An episode outside the window does not count.
        let outside = episode(2024, 4, 2, 10, 5, None, &[]);

        let result = aggregator.aggregate(start, end, &[outside], &[]).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_totals_and_averages() {
        let aggregator = AnalyticsAggregator::new();
        let (start, end) = window();
        let episodes = vec![
            episode(2024, 3, 5, 10, 4, Some(2), &[]),
            episode(2024, 3, 8, 14, 8, Some(4), &[]),
            episode(2024, 3, 12, 9, 6, None, &[]),
        ];

        let analytics = aggregator
            .aggregate(start, end, &episodes, &[])
            .unwrap()
            .unwrap();

        assert_eq!(analytics.total_episodes, 3);
        assert_eq!(analytics.avg_severity, Some(6.0));
        // Only the two finished episodes contribute to duration.
        assert_eq!(analytics.avg_duration_hours, Some(3.0));
    }

    #[test]
    fn test_trigger_ranking_keeps_first_seen_order_on_ties() {
        let aggregator = AnalyticsAggregator::new();
        let (start, end) = window();
        let episodes = vec![
            episode(2024, 3, 5, 10, 4, None, &["stress", "weather"]),
            episode(2024, 3, 8, 14, 8, None, &["stress", "noise"]),
        ];

        let analytics = aggregator
            .aggregate(start, end, &episodes, &[])
            .unwrap()
            .unwrap();

        assert_eq!(
            analytics.top_triggers,
            vec![
                TriggerCount {
                    trigger: "stress".to_string(),
                    count: 2
                },
                TriggerCount {
                    trigger: "weather".to_string(),
                    count: 1
                },
                TriggerCount {
                    trigger: "noise".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_worst_day_of_week() {
        let aggregator = AnalyticsAggregator::new();
        let (start, end) = window();
        // Two Mondays (Mar 4, Mar 11), one Friday (Mar 8).
        let episodes = vec![
            episode(2024, 3, 4, 10, 5, None, &[]),
            episode(2024, 3, 8, 14, 5, None, &[]),
            episode(2024, 3, 11, 9, 5, None, &[]),
        ];

        let analytics = aggregator
            .aggregate(start, end, &episodes, &[])
            .unwrap()
            .unwrap();

        assert_eq!(analytics.worst_day_of_week.as_deref(), Some("Monday"));
        // Best-day ranking is not computed.
        assert_eq!(analytics.best_day_of_week, None);
        assert_eq!(analytics.best_time_of_day, None);
        assert_eq!(analytics.worst_time_of_day, None);
    }

    #[test]
    fn test_worst_day_tie_goes_to_first_encountered() {
        let aggregator = AnalyticsAggregator::new();
        let (start, end) = window();
        // One Friday (Mar 8) and one Monday (Mar 11): Friday comes
        // first in start order.
        let episodes = vec![
            episode(2024, 3, 11, 9, 5, None, &[]),
            episode(2024, 3, 8, 14, 5, None, &[]),
        ];

        let analytics = aggregator
            .aggregate(start, end, &episodes, &[])
            .unwrap()
            .unwrap();

        assert_eq!(analytics.worst_day_of_week.as_deref(), Some("Friday"));
    }

    #[test]
    fn test_episode_day_group_means() {
        let aggregator = AnalyticsAggregator::new();
        let (start, end) = window();
        let episodes = vec![
            episode(2024, 3, 5, 10, 5, None, &[]),
            episode(2024, 3, 8, 14, 5, None, &[]),
        ];
        let logs = vec![
            log(2024, 3, 5, 5.0, 8),
            log(2024, 3, 6, 8.0, 2),
            log(2024, 3, 8, 6.0, 6),
        ];

        let analytics = aggregator
            .aggregate(start, end, &episodes, &logs)
            .unwrap()
            .unwrap();

        // Means over the two episode-day logs only.
        assert_eq!(analytics.sleep_correlation, Some(5.5));
        assert_eq!(analytics.stress_correlation, Some(7.0));
    }

    #[test]
    fn test_group_means_absent_without_episode_day_logs() {
        let aggregator = AnalyticsAggregator::new();
        let (start, end) = window();
        let episodes = vec![episode(2024, 3, 5, 10, 5, None, &[])];
        let logs = vec![log(2024, 3, 6, 8.0, 2)];

        let analytics = aggregator
            .aggregate(start, end, &episodes, &logs)
            .unwrap()
            .unwrap();

        assert_eq!(analytics.sleep_correlation, None);
        assert_eq!(analytics.stress_correlation, None);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let aggregator = AnalyticsAggregator::new();
        let (start, end) = window();
        let episodes = vec![episode(2024, 3, 5, 10, 5, Some(3), &["stress"])];
        let logs = vec![log(2024, 3, 5, 5.0, 8)];

        let first = aggregator.aggregate(start, end, &episodes, &logs).unwrap();
        let second = aggregator.aggregate(start, end, &episodes, &logs).unwrap();

        assert_eq!(first, second);
    }
}
