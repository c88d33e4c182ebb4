//! Weekly pattern view: day-of-week and time-of-day histograms.

use std::collections::BTreeMap;

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::records::EpisodeEvent;

/// Time-of-day bucket an episode onset falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    /// 06:00-11:59
    Morning,
    /// 12:00-16:59
    Afternoon,
    /// 17:00-21:59
    Evening,
    /// 22:00-05:59
    Night,
}

impl TimeOfDay {
    /// Bucket for an hour of day (0-23).
    pub fn from_hour(hour: u32) -> Self {
        if (6..12).contains(&hour) {
            TimeOfDay::Morning
        } else if (12..17).contains(&hour) {
            TimeOfDay::Afternoon
        } else if (17..22).contains(&hour) {
            TimeOfDay::Evening
        } else {
            TimeOfDay::Night
        }
    }

    /// Get display label.
    pub fn label(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
            TimeOfDay::Night => "Night",
        }
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Episode counts per time-of-day bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfDayHistogram {
    pub morning: u32,
    pub afternoon: u32,
    pub evening: u32,
    pub night: u32,
}

impl TimeOfDayHistogram {
    fn increment(&mut self, bucket: TimeOfDay) {
        match bucket {
            TimeOfDay::Morning => self.morning += 1,
            TimeOfDay::Afternoon => self.afternoon += 1,
            TimeOfDay::Evening => self.evening += 1,
            TimeOfDay::Night => self.night += 1,
        }
    }
}

/// Weekly pattern histograms over a set of episodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyPatterns {
    /// Episode count per weekday name, only days with episodes
    pub day_of_week: BTreeMap<String, u32>,
    pub time_of_day: TimeOfDayHistogram,
    pub total_episodes: u32,
}

/// Build the pattern histograms for a set of episodes.
///
/// Windowing is the caller's concern; every episode in the slice is
/// counted.
pub fn weekly_patterns(episodes: &[EpisodeEvent]) -> WeeklyPatterns {
    let mut day_of_week: BTreeMap<String, u32> = BTreeMap::new();
    let mut time_of_day = TimeOfDayHistogram::default();

    for episode in episodes {
        let day = episode.start_time.format("%A").to_string();
        *day_of_week.entry(day).or_insert(0) += 1;
        time_of_day.increment(TimeOfDay::from_hour(episode.start_time.hour()));
    }

    WeeklyPatterns {
        day_of_week,
        time_of_day,
        total_episodes: episodes.len() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use crate::records::PainLocation;

    fn episode_at(d: u32, h: u32) -> EpisodeEvent {
        EpisodeEvent {
            id: Uuid::new_v4(),
            start_time: Utc.with_ymd_and_hms(2024, 3, d, h, 30, 0).unwrap(),
            end_time: None,
            severity: 5,
            pain_location: PainLocation::Front,
            symptoms: vec![],
            triggers: vec![],
            notes: None,
        }
    }

    #[test]
    fn test_time_buckets() {
        assert_eq!(TimeOfDay::from_hour(6), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(11), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(16), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(17), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(21), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(22), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(2), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::Night);
    }

    #[test]
    fn test_histograms() {
        // Mar 4 2024 is a Monday, Mar 5 a Tuesday.
        let episodes = vec![episode_at(4, 8), episode_at(4, 23), episode_at(5, 14)];

        let patterns = weekly_patterns(&episodes);

        assert_eq!(patterns.total_episodes, 3);
        assert_eq!(patterns.day_of_week.get("Monday"), Some(&2));
        assert_eq!(patterns.day_of_week.get("Tuesday"), Some(&1));
        assert_eq!(patterns.day_of_week.get("Sunday"), None);
        assert_eq!(patterns.time_of_day.morning, 1);
        assert_eq!(patterns.time_of_day.afternoon, 1);
        assert_eq!(patterns.time_of_day.night, 1);
        assert_eq!(patterns.time_of_day.evening, 0);
    }

    #[test]
    fn test_empty_episode_set() {
        let patterns = weekly_patterns(&[]);

        assert_eq!(patterns.total_episodes, 0);
        assert!(patterns.day_of_week.is_empty());
        assert_eq!(patterns.time_of_day, TimeOfDayHistogram::default());
    }
}
