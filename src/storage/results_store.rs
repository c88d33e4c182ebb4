//! Storage for engine outputs.
//!
//! Risk assessments and period analytics are upserted by their natural
//! keys: (user, date) and (user, period_start, period_end). Re-running
//! a job for the same window overwrites the previous row in place.

use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::analytics::{PeriodAnalytics, TriggerCount};
use crate::risk::{FactorImpact, RiskAssessment, RiskLevel};
use crate::storage::database::DatabaseError;

/// Store for computed risk assessments and period analytics.
pub struct ResultsStore<'a> {
    conn: &'a Connection,
}

impl<'a> ResultsStore<'a> {
    /// Create a new results store with the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    // ========== Risk assessments ==========

    /// Insert or update the assessment for (user, date).
    pub fn upsert_assessment(
        &self,
        user_id: &Uuid,
        assessment: &RiskAssessment,
    ) -> Result<(), DatabaseError> {
        let now = Utc::now().to_rfc3339();
        let top_factors_json = serde_json::to_string(&assessment.top_factors)
            .map_err(|e| DatabaseError::SerializationError(e.to_string()))?;
        let recommendations_json = serde_json::to_string(&assessment.recommendations)
            .map_err(|e| DatabaseError::SerializationError(e.to_string()))?;

        self.conn
            .execute(
                r#"
                INSERT INTO risk_assessments
                    (user_id, date, risk_score, risk_level, top_factors_json,
                     confidence, recommendations_json, model_version, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)
                ON CONFLICT(user_id, date) DO UPDATE SET
                    risk_score = excluded.risk_score,
                    risk_level = excluded.risk_level,
                    top_factors_json = excluded.top_factors_json,
                    confidence = excluded.confidence,
                    recommendations_json = excluded.recommendations_json,
                    model_version = excluded.model_version,
                    updated_at = excluded.updated_at
                "#,
                params![
                    user_id.to_string(),
                    assessment.date.format("%Y-%m-%d").to_string(),
                    assessment.risk_score,
                    assessment.risk_level.as_str(),
                    top_factors_json,
                    assessment.confidence,
                    recommendations_json,
                    assessment.model_version,
                    now,
                ],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    /// Load the assessment for (user, date), if one was stored.
    pub fn load_assessment(
        &self,
        user_id: &Uuid,
        date: NaiveDate,
    ) -> Result<Option<RiskAssessment>, DatabaseError> {
        let result = self.conn.query_row(
            "SELECT risk_score, risk_level, top_factors_json, confidence,
                    recommendations_json, model_version
             FROM risk_assessments WHERE user_id = ?1 AND date = ?2",
            params![user_id.to_string(), date.format("%Y-%m-%d").to_string()],
            |row| {
                Ok((
                    row.get::<_, u8>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, f32>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                ))
            },
        );

        let (risk_score, level_str, top_factors_json, confidence, recommendations_json, model_version) =
            match result {
                Ok(raw) => raw,
                Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
                Err(e) => return Err(DatabaseError::QueryFailed(e.to_string())),
            };

        let top_factors: Vec<FactorImpact> = serde_json::from_str(&top_factors_json)
            .map_err(|e| DatabaseError::DeserializationError(e.to_string()))?;
        let recommendations: Vec<String> = serde_json::from_str(&recommendations_json)
            .map_err(|e| DatabaseError::DeserializationError(e.to_string()))?;

        Ok(Some(RiskAssessment {
            date,
            risk_score,
            risk_level: risk_level_from_str(&level_str)?,
            top_factors,
            confidence,
            recommendations,
            model_version,
        }))
    }

    // ========== Period analytics ==========

    /// Insert or update the analytics row for (user, period).
    pub fn upsert_period_analytics(
        &self,
        user_id: &Uuid,
        analytics: &PeriodAnalytics,
    ) -> Result<(), DatabaseError> {
        let now = Utc::now().to_rfc3339();
        let top_triggers_json = serde_json::to_string(&analytics.top_triggers)
            .map_err(|e| DatabaseError::SerializationError(e.to_string()))?;

        self.conn
            .execute(
                r#"
                INSERT INTO period_analytics
                    (user_id, period_start, period_end, total_episodes, avg_severity,
                     avg_duration_hours, top_triggers_json, best_day_of_week,
                     worst_day_of_week, best_time_of_day, worst_time_of_day,
                     sleep_correlation, stress_correlation, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?14)
                ON CONFLICT(user_id, period_start, period_end) DO UPDATE SET
                    total_episodes = excluded.total_episodes,
                    avg_severity = excluded.avg_severity,
                    avg_duration_hours = excluded.avg_duration_hours,
                    top_triggers_json = excluded.top_triggers_json,
                    best_day_of_week = excluded.best_day_of_week,
                    worst_day_of_week = excluded.worst_day_of_week,
                    best_time_of_day = excluded.best_time_of_day,
                    worst_time_of_day = excluded.worst_time_of_day,
                    sleep_correlation = excluded.sleep_correlation,
                    stress_correlation = excluded.stress_correlation,
                    updated_at = excluded.updated_at
                "#,
                params![
                    user_id.to_string(),
                    analytics.period_start.format("%Y-%m-%d").to_string(),
                    analytics.period_end.format("%Y-%m-%d").to_string(),
                    analytics.total_episodes,
                    analytics.avg_severity,
                    analytics.avg_duration_hours,
                    top_triggers_json,
                    analytics.best_day_of_week,
                    analytics.worst_day_of_week,
                    analytics.best_time_of_day,
                    analytics.worst_time_of_day,
                    analytics.sleep_correlation,
                    analytics.stress_correlation,
                    now,
                ],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    /// Load the analytics row for (user, period), if one was stored.
    pub fn load_period_analytics(
        &self,
        user_id: &Uuid,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Result<Option<PeriodAnalytics>, DatabaseError> {
        let result = self.conn.query_row(
            "SELECT total_episodes, avg_severity, avg_duration_hours, top_triggers_json,
                    best_day_of_week, worst_day_of_week, best_time_of_day, worst_time_of_day,
                    sleep_correlation, stress_correlation
             FROM period_analytics
             WHERE user_id = ?1 AND period_start = ?2 AND period_end = ?3",
            params![
                user_id.to_string(),
                period_start.format("%Y-%m-%d").to_string(),
                period_end.format("%Y-%m-%d").to_string(),
            ],
            |row| {
                Ok((
                    row.get::<_, u32>(0)?,
                    row.get::<_, Option<f32>>(1)?,
                    row.get::<_, Option<f32>>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, Option<String>>(4)?,
                    row.get::<_, Option<String>>(5)?,
                    row.get::<_, Option<String>>(6)?,
                    row.get::<_, Option<String>>(7)?,
                    row.get::<_, Option<f32>>(8)?,
                    row.get::<_, Option<f32>>(9)?,
                ))
            },
        );

        let raw = match result {
            Ok(raw) => raw,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(DatabaseError::QueryFailed(e.to_string())),
        };

        let (
            total_episodes,
            avg_severity,
            avg_duration_hours,
            top_triggers_json,
            best_day_of_week,
            worst_day_of_week,
            best_time_of_day,
            worst_time_of_day,
            sleep_correlation,
            stress_correlation,
        ) = raw;

        let top_triggers: Vec<TriggerCount> = serde_json::from_str(&top_triggers_json)
            .map_err(|e| DatabaseError::DeserializationError(e.to_string()))?;

        Ok(Some(PeriodAnalytics {
            period_start,
            period_end,
            total_episodes,
            avg_severity,
            avg_duration_hours,
            top_triggers,
            best_day_of_week,
            worst_day_of_week,
            best_time_of_day,
            worst_time_of_day,
            sleep_correlation,
            stress_correlation,
        }))
    }
}

fn risk_level_from_str(s: &str) -> Result<RiskLevel, DatabaseError> {
    match s {
        "low" => Ok(RiskLevel::Low),
        "moderate" => Ok(RiskLevel::Moderate),
        "high" => Ok(RiskLevel::High),
        other => Err(DatabaseError::DeserializationError(format!(
            "unknown risk level: {}",
            other
        ))),
    }
}
