//! Health record types.
//!
//! The three per-user record streams the engine reads: daily wellness
//! logs, biometric samples, and migraine episode events.

pub mod types;

pub use types::{BiometricSample, EpisodeEvent, PainLocation, WellnessLog};
