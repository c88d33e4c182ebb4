//! Value types for the three health record streams.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A daily wellness log entry.
///
/// One entry per user per date upstream, but duplicates are tolerated
/// downstream and treated as independent samples within a window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WellnessLog {
    /// Date the log covers
    pub date: NaiveDate,
    /// Hours slept the previous night
    pub sleep_hours: f32,
    /// Self-reported stress on a 1-10 scale
    pub stress_level: u8,
    /// Water intake in cups
    pub water_intake: f32,
    /// Exercise duration in minutes
    pub exercise_duration: u32,
}

/// A single biometric reading from a wearable or manual entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiometricSample {
    /// When the reading was taken
    pub timestamp: DateTime<Utc>,
    /// Heart rate in beats per minute
    pub heart_rate: u16,
    /// Heart rate variability in ms, if the device reports it
    pub hrv: Option<f32>,
}

/// Where the head pain is located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PainLocation {
    Left,
    Right,
    Both,
    Front,
    Back,
    All,
}

impl PainLocation {
    /// Get display label.
    pub fn label(&self) -> &'static str {
        match self {
            PainLocation::Left => "Left Side",
            PainLocation::Right => "Right Side",
            PainLocation::Both => "Both Sides",
            PainLocation::Front => "Front",
            PainLocation::Back => "Back",
            PainLocation::All => "All Over",
        }
    }
}

impl std::fmt::Display for PainLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A recorded migraine/headache episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeEvent {
    /// Unique identifier
    pub id: Uuid,
    /// When the episode started
    pub start_time: DateTime<Utc>,
    /// When the episode ended, if it has
    pub end_time: Option<DateTime<Utc>>,
    /// Pain severity on a 1-10 scale
    pub severity: u8,
    /// Pain location
    pub pain_location: PainLocation,
    /// Symptoms observed (e.g. "nausea", "light_sensitivity", "aura")
    pub symptoms: Vec<String>,
    /// Triggers identified for this episode
    pub triggers: Vec<String>,
    /// Free-form notes
    pub notes: Option<String>,
}

impl EpisodeEvent {
    /// Episode duration in hours, rounded to 2 decimals.
    ///
    /// `None` while the episode is ongoing (no end time recorded).
    pub fn duration_hours(&self) -> Option<f32> {
        let end = self.end_time?;
        let hours = (end - self.start_time).num_seconds() as f32 / 3600.0;
        Some((hours * 100.0).round() / 100.0)
    }
}
