//! Episode-day vs non-episode-day habit comparison.
//!
//! Splits wellness logs by whether an episode started on their date
//! and reports group means side by side. These are group means, not
//! statistical correlation coefficients.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::mean;
use crate::records::{EpisodeEvent, WellnessLog};

/// Mean habit values for one group of days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HabitMeans {
    pub avg_sleep: Option<f32>,
    pub avg_stress: Option<f32>,
    pub avg_water: Option<f32>,
}

/// Habit means on episode days versus all other logged days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HabitComparison {
    pub episode_days: HabitMeans,
    pub non_episode_days: HabitMeans,
}

/// Compare habit means between episode days and non-episode days.
///
/// A group with no logs reports absent means rather than zeroes.
pub fn compare_episode_days(
    episodes: &[EpisodeEvent],
    logs: &[WellnessLog],
) -> HabitComparison {
    let episode_dates: HashSet<NaiveDate> =
        episodes.iter().map(|e| e.start_time.date_naive()).collect();

    let (episode_logs, other_logs): (Vec<&WellnessLog>, Vec<&WellnessLog>) = logs
        .iter()
        .partition(|l| episode_dates.contains(&l.date));

    HabitComparison {
        episode_days: group_means(&episode_logs),
        non_episode_days: group_means(&other_logs),
    }
}

fn group_means(logs: &[&WellnessLog]) -> HabitMeans {
    HabitMeans {
        avg_sleep: mean(logs.iter().map(|l| l.sleep_hours)),
        avg_stress: mean(logs.iter().map(|l| l.stress_level as f32)),
        avg_water: mean(logs.iter().map(|l| l.water_intake)),
    }
}
