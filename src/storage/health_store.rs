//! Health record storage operations.
//!
//! Provides persistence and range queries for:
//! - User accounts
//! - Wellness logs
//! - Biometric samples
//! - Episode events
//!
//! The engine only ever reads these streams; writes come from the
//! record-capture surface.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::records::{BiometricSample, EpisodeEvent, PainLocation, WellnessLog};
use crate::storage::database::DatabaseError;

/// A tracked user account.
#[derive(Debug, Clone, PartialEq)]
pub struct UserAccount {
    pub id: Uuid,
    pub name: String,
    /// Inactive users are skipped by the batch jobs
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    /// Create a new active account with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            active: true,
            created_at: Utc::now(),
        }
    }
}

/// Store for the per-user health record streams.
pub struct HealthStore<'a> {
    conn: &'a Connection,
}

impl<'a> HealthStore<'a> {
    /// Create a new health store with the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    // ========== Users ==========

    /// Insert a user account.
    pub fn insert_user(&self, user: &UserAccount) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO users (id, name, active, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![
                    user.id.to_string(),
                    user.name,
                    user.active,
                    user.created_at.to_rfc3339(),
                ],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    /// Get a user by ID.
    pub fn get_user(&self, user_id: &Uuid) -> Result<UserAccount, DatabaseError> {
        let result = self.conn.query_row(
            "SELECT id, name, active, created_at FROM users WHERE id = ?1",
            params![user_id.to_string()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, bool>(2)?,
                    row.get::<_, String>(3)?,
                ))
            },
        );

        match result {
            Ok(raw) => parse_user(raw),
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                Err(DatabaseError::NotFound(format!("user {}", user_id)))
            }
            Err(e) => Err(DatabaseError::QueryFailed(e.to_string())),
        }
    }

    /// List all active users.
    pub fn list_active_users(&self) -> Result<Vec<UserAccount>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, name, active, created_at FROM users
                 WHERE active = 1 ORDER BY created_at",
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, bool>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let mut users = Vec::new();
        for row in rows {
            let raw = row.map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
            users.push(parse_user(raw)?);
        }

        Ok(users)
    }

    // ========== Wellness logs ==========

    /// Insert a wellness log entry.
    pub fn insert_wellness_log(
        &self,
        user_id: &Uuid,
        log: &WellnessLog,
    ) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO wellness_logs
                 (user_id, date, sleep_hours, stress_level, water_intake, exercise_duration, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    user_id.to_string(),
                    log.date.format("%Y-%m-%d").to_string(),
                    log.sleep_hours,
                    log.stress_level,
                    log.water_intake,
                    log.exercise_duration,
                    Utc::now().to_rfc3339(),
                ],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    /// Load wellness logs in the half-open date range `[from, to)`,
    /// ascending.
    pub fn wellness_between(
        &self,
        user_id: &Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<WellnessLog>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT date, sleep_hours, stress_level, water_intake, exercise_duration
                 FROM wellness_logs
                 WHERE user_id = ?1 AND date >= ?2 AND date < ?3
                 ORDER BY date",
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let rows = stmt
            .query_map(
                params![
                    user_id.to_string(),
                    from.format("%Y-%m-%d").to_string(),
                    to.format("%Y-%m-%d").to_string(),
                ],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, f32>(1)?,
                        row.get::<_, u8>(2)?,
                        row.get::<_, f32>(3)?,
                        row.get::<_, u32>(4)?,
                    ))
                },
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let mut logs = Vec::new();
        for row in rows {
            let (date_str, sleep_hours, stress_level, water_intake, exercise_duration) =
                row.map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
            logs.push(WellnessLog {
                date: parse_date(&date_str)?,
                sleep_hours,
                stress_level,
                water_intake,
                exercise_duration,
            });
        }

        Ok(logs)
    }

    // ========== Biometric samples ==========

    /// Insert a biometric sample.
    pub fn insert_biometric_sample(
        &self,
        user_id: &Uuid,
        sample: &BiometricSample,
    ) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO biometric_samples (user_id, timestamp, heart_rate, hrv, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    user_id.to_string(),
                    sample.timestamp.to_rfc3339(),
                    sample.heart_rate,
                    sample.hrv,
                    Utc::now().to_rfc3339(),
                ],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    /// Load biometric samples in the half-open time range `[from, to)`,
    /// ascending.
    pub fn biometrics_between(
        &self,
        user_id: &Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<BiometricSample>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT timestamp, heart_rate, hrv FROM biometric_samples
                 WHERE user_id = ?1 AND timestamp >= ?2 AND timestamp < ?3
                 ORDER BY timestamp",
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let rows = stmt
            .query_map(
                params![user_id.to_string(), from.to_rfc3339(), to.to_rfc3339()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, u16>(1)?,
                        row.get::<_, Option<f32>>(2)?,
                    ))
                },
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let mut samples = Vec::new();
        for row in rows {
            let (timestamp_str, heart_rate, hrv) =
                row.map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
            samples.push(BiometricSample {
                timestamp: parse_timestamp(&timestamp_str)?,
                heart_rate,
                hrv,
            });
        }

        Ok(samples)
    }

    // ========== Episode events ==========

    /// Insert an episode event.
    pub fn insert_episode(
        &self,
        user_id: &Uuid,
        episode: &EpisodeEvent,
    ) -> Result<(), DatabaseError> {
        let symptoms_json = serde_json::to_string(&episode.symptoms)
            .map_err(|e| DatabaseError::SerializationError(e.to_string()))?;
        let triggers_json = serde_json::to_string(&episode.triggers)
            .map_err(|e| DatabaseError::SerializationError(e.to_string()))?;

        self.conn
            .execute(
                "INSERT INTO episode_events
                 (id, user_id, start_time, end_time, severity, pain_location,
                  symptoms_json, triggers_json, notes, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    episode.id.to_string(),
                    user_id.to_string(),
                    episode.start_time.to_rfc3339(),
                    episode.end_time.map(|t| t.to_rfc3339()),
                    episode.severity,
                    pain_location_to_str(episode.pain_location),
                    symptoms_json,
                    triggers_json,
                    episode.notes,
                    Utc::now().to_rfc3339(),
                ],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    /// Load episodes whose start date falls in `[start, end]`, both
    /// ends inclusive, ascending by start time.
    pub fn episodes_in_period(
        &self,
        user_id: &Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<EpisodeEvent>, DatabaseError> {
        // Stored timestamps are RFC 3339 in UTC, so plain string
        // comparison against the midnight bounds is exact.
        let from = start.and_time(chrono::NaiveTime::MIN).and_utc();
        let to = (end + chrono::Duration::days(1))
            .and_time(chrono::NaiveTime::MIN)
            .and_utc();

        self.query_episodes(
            "SELECT id, start_time, end_time, severity, pain_location,
                    symptoms_json, triggers_json, notes
             FROM episode_events
             WHERE user_id = ?1 AND start_time >= ?2 AND start_time < ?3
             ORDER BY start_time",
            params![user_id.to_string(), from.to_rfc3339(), to.to_rfc3339()],
        )
    }

    /// Load every episode for a user, ascending by start time.
    pub fn all_episodes(&self, user_id: &Uuid) -> Result<Vec<EpisodeEvent>, DatabaseError> {
        self.query_episodes(
            "SELECT id, start_time, end_time, severity, pain_location,
                    symptoms_json, triggers_json, notes
             FROM episode_events
             WHERE user_id = ?1
             ORDER BY start_time",
            params![user_id.to_string()],
        )
    }

    fn query_episodes(
        &self,
        sql: &str,
        sql_params: impl rusqlite::Params,
    ) -> Result<Vec<EpisodeEvent>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let rows = stmt
            .query_map(sql_params, |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, u8>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, String>(6)?,
                    row.get::<_, Option<String>>(7)?,
                ))
            })
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let mut episodes = Vec::new();
        for row in rows {
            let (id_str, start_str, end_str, severity, pain_str, symptoms_json, triggers_json, notes) =
                row.map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

            let end_time = match end_str {
                Some(s) => Some(parse_timestamp(&s)?),
                None => None,
            };
            let symptoms: Vec<String> = serde_json::from_str(&symptoms_json)
                .map_err(|e| DatabaseError::DeserializationError(e.to_string()))?;
            let triggers: Vec<String> = serde_json::from_str(&triggers_json)
                .map_err(|e| DatabaseError::DeserializationError(e.to_string()))?;

            episodes.push(EpisodeEvent {
                id: parse_uuid(&id_str)?,
                start_time: parse_timestamp(&start_str)?,
                end_time,
                severity,
                pain_location: pain_location_from_str(&pain_str)?,
                symptoms,
                triggers,
                notes,
            });
        }

        Ok(episodes)
    }
}

fn parse_user(
    (id_str, name, active, created_str): (String, String, bool, String),
) -> Result<UserAccount, DatabaseError> {
    Ok(UserAccount {
        id: parse_uuid(&id_str)?,
        name,
        active,
        created_at: parse_timestamp(&created_str)?,
    })
}

fn parse_uuid(s: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(s).map_err(|e| DatabaseError::DeserializationError(e.to_string()))
}

fn parse_date(s: &str) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| DatabaseError::DeserializationError(e.to_string()))
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DatabaseError::DeserializationError(e.to_string()))
}

fn pain_location_to_str(location: PainLocation) -> &'static str {
    match location {
        PainLocation::Left => "left",
        PainLocation::Right => "right",
        PainLocation::Both => "both",
        PainLocation::Front => "front",
        PainLocation::Back => "back",
        PainLocation::All => "all",
    }
}

fn pain_location_from_str(s: &str) -> Result<PainLocation, DatabaseError> {
    match s {
        "left" => Ok(PainLocation::Left),
        "right" => Ok(PainLocation::Right),
        "both" => Ok(PainLocation::Both),
        "front" => Ok(PainLocation::Front),
        "back" => Ok(PainLocation::Back),
        "all" => Ok(PainLocation::All),
        other => Err(DatabaseError::DeserializationError(format!(
            "unknown pain location: {}",
            other
        ))),
    }
}
