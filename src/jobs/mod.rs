//! Scheduled batch jobs.
//!
//! The external scheduler invokes these once per period; each drives
//! one pass over all active users. Every user's computation is a pure
//! function of that user's record window, so runs are idempotent and
//! users share no state.

use chrono::{Duration, NaiveDate, NaiveTime};
use thiserror::Error;
use uuid::Uuid;

use crate::analytics::{AnalyticsAggregator, AnalyticsError};
use crate::records::{BiometricSample, WellnessLog};
use crate::risk::{ForecastGenerator, RiskAssessment, RiskModelConfig};
use crate::storage::{Database, DatabaseError, HealthStore, ResultsStore};

/// Errors from batch job execution.
#[derive(Debug, Error)]
pub enum JobError {
    /// Storage error.
    #[error("Storage error: {0}")]
    Storage(#[from] DatabaseError),

    /// Analytics error.
    #[error("Analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
}

/// Outcome of one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Users visited
    pub users_processed: u32,
    /// Result rows written
    pub results_written: u32,
    /// Users skipped for lack of data
    pub users_skipped: u32,
}

/// Generate and upsert today's risk assessment for every active user.
pub fn run_daily_forecasts(db: &Database, today: NaiveDate) -> Result<BatchReport, JobError> {
    let health = HealthStore::new(db.connection());
    let results = ResultsStore::new(db.connection());
    let generator = ForecastGenerator::new();

    let mut report = BatchReport::default();
    for user in health.list_active_users()? {
        let (logs, biometrics) = fetch_lookback(&health, &user.id, today)?;
        let assessment = generator.assess(today, &logs, &biometrics);

        tracing::debug!(
            user = %user.id,
            score = assessment.risk_score,
            level = %assessment.risk_level,
            "daily risk assessment"
        );

        results.upsert_assessment(&user.id, &assessment)?;
        report.users_processed += 1;
        report.results_written += 1;
    }

    tracing::info!(
        users = report.users_processed,
        "daily forecast batch complete"
    );
    Ok(report)
}

/// Generate and upsert an assessment for one user and date.
///
/// Surfaces `NotFound` when the user does not exist.
pub fn generate_user_forecast(
    db: &Database,
    user_id: &Uuid,
    target_date: NaiveDate,
) -> Result<RiskAssessment, JobError> {
    let health = HealthStore::new(db.connection());
    let results = ResultsStore::new(db.connection());

    let user = health.get_user(user_id)?;

    let generator = ForecastGenerator::new();
    let (logs, biometrics) = fetch_lookback(&health, &user.id, target_date)?;
    let assessment = generator.assess(target_date, &logs, &biometrics);

    results.upsert_assessment(&user.id, &assessment)?;
    Ok(assessment)
}

/// Compute the 7-day forecast for one user, without persisting it.
pub fn forecast_week(
    db: &Database,
    user_id: &Uuid,
    today: NaiveDate,
) -> Result<Vec<RiskAssessment>, JobError> {
    let health = HealthStore::new(db.connection());
    let user = health.get_user(user_id)?;

    let config = RiskModelConfig::default();
    // One fetch covers every forecast day's lookback window.
    let from = today - Duration::days(config.lookback_days);
    let to = today + Duration::days(7);
    let logs = health.wellness_between(&user.id, from, to)?;
    let biometrics = health.biometrics_between(
        &user.id,
        from.and_time(NaiveTime::MIN).and_utc(),
        to.and_time(NaiveTime::MIN).and_utc(),
    )?;

    let generator = ForecastGenerator::with_config(config);
    Ok(generator.predict_next_7_days(today, &logs, &biometrics).collect())
}

/// Aggregate period analytics over the trailing window for every
/// active user.
///
/// Users with no episodes in the window produce no analytics row.
pub fn run_analytics_aggregation(
    db: &Database,
    end_date: NaiveDate,
    window_days: i64,
) -> Result<BatchReport, JobError> {
    let health = HealthStore::new(db.connection());
    let results = ResultsStore::new(db.connection());
    let aggregator = AnalyticsAggregator::new();

    let period_start = end_date - Duration::days(window_days);

    let mut report = BatchReport::default();
    for user in health.list_active_users()? {
        report.users_processed += 1;

        let episodes = health.episodes_in_period(&user.id, period_start, end_date)?;
        // The aggregation window is inclusive of its end date.
        let logs =
            health.wellness_between(&user.id, period_start, end_date + Duration::days(1))?;

        match aggregator.aggregate(period_start, end_date, &episodes, &logs)? {
            Some(analytics) => {
                results.upsert_period_analytics(&user.id, &analytics)?;
                report.results_written += 1;
            }
            None => {
                tracing::debug!(user = %user.id, "no episodes in window, skipping");
                report.users_skipped += 1;
            }
        }
    }

    tracing::info!(
        users = report.users_processed,
        written = report.results_written,
        skipped = report.users_skipped,
        "analytics aggregation batch complete"
    );
    Ok(report)
}

fn fetch_lookback(
    health: &HealthStore<'_>,
    user_id: &Uuid,
    target_date: NaiveDate,
) -> Result<(Vec<WellnessLog>, Vec<BiometricSample>), JobError> {
    let lookback_days = RiskModelConfig::default().lookback_days;
    let from = target_date - Duration::days(lookback_days);

    let logs = health.wellness_between(user_id, from, target_date)?;
    let biometrics = health.biometrics_between(
        user_id,
        from.and_time(NaiveTime::MIN).and_utc(),
        target_date.and_time(NaiveTime::MIN).and_utc(),
    )?;

    Ok((logs, biometrics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::records::{EpisodeEvent, PainLocation};
    use crate::risk::RiskLevel;
    use crate::storage::UserAccount;

    fn seed_user(db: &Database, name: &str) -> UserAccount {
        let user = UserAccount::new(name);
        HealthStore::new(db.connection()).insert_user(&user).unwrap();
        user
    }

    fn seed_week_of_logs(db: &Database, user: &UserAccount, last: NaiveDate) {
        let health = HealthStore::new(db.connection());
        for i in 0..7 {
            health
                .insert_wellness_log(
                    &user.id,
                    &WellnessLog {
                        date: last - Duration::days(i),
                        sleep_hours: 5.0,
                        stress_level: 8,
                        water_intake: 3.0,
                        exercise_duration: 0,
                    },
                )
                .unwrap();
        }
    }

    #[test]
    fn test_daily_forecast_batch_covers_all_active_users() {
        let db = Database::open_in_memory().unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        let logged = seed_user(&db, "Logged");
        let silent = seed_user(&db, "Silent");
        seed_week_of_logs(&db, &logged, today - Duration::days(1));

        let report = run_daily_forecasts(&db, today).unwrap();
        assert_eq!(report.users_processed, 2);
        assert_eq!(report.results_written, 2);

        let results = ResultsStore::new(db.connection());
        let with_data = results.load_assessment(&logged.id, today).unwrap().unwrap();
        assert_eq!(with_data.risk_score, 27);
        assert_eq!(with_data.confidence, 70.0);

        // A user with no records still gets a (zero-signal) assessment.
        let without_data = results.load_assessment(&silent.id, today).unwrap().unwrap();
        assert_eq!(without_data.risk_score, 0);
        assert_eq!(without_data.risk_level, RiskLevel::Low);
        assert_eq!(without_data.confidence, 0.0);
    }

    #[test]
    fn test_rerunning_daily_batch_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        let user = seed_user(&db, "Dana");
        seed_week_of_logs(&db, &user, today - Duration::days(1));

        run_daily_forecasts(&db, today).unwrap();
        let first = ResultsStore::new(db.connection())
            .load_assessment(&user.id, today)
            .unwrap();

        run_daily_forecasts(&db, today).unwrap();
        let second = ResultsStore::new(db.connection())
            .load_assessment(&user.id, today)
            .unwrap();

        assert_eq!(first, second);

        let count: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM risk_assessments", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_user_forecast_surfaces_not_found() {
        let db = Database::open_in_memory().unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        let result = generate_user_forecast(&db, &Uuid::new_v4(), today);

        assert!(matches!(
            result,
            Err(JobError::Storage(DatabaseError::NotFound(_)))
        ));
    }

    #[test]
    fn test_forecast_week_produces_seven_days() {
        let db = Database::open_in_memory().unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        let user = seed_user(&db, "Dana");
        seed_week_of_logs(&db, &user, today - Duration::days(1));

        let forecast = forecast_week(&db, &user.id, today).unwrap();

        assert_eq!(forecast.len(), 7);
        assert_eq!(forecast[0].date, today);
        assert_eq!(forecast[0].risk_score, 27);
        // Later days see less of the recorded history.
        assert!(forecast[6].confidence < forecast[0].confidence);
    }

    #[test]
    fn test_analytics_batch_skips_users_without_episodes() {
        let db = Database::open_in_memory().unwrap();
        let health = HealthStore::new(db.connection());
        let end = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        let with_episodes = seed_user(&db, "Episodes");
        let without_episodes = seed_user(&db, "None");

        health
            .insert_episode(
                &with_episodes.id,
                &EpisodeEvent {
                    id: Uuid::new_v4(),
                    start_time: Utc.with_ymd_and_hms(2024, 3, 8, 14, 0, 0).unwrap(),
                    end_time: None,
                    severity: 7,
                    pain_location: PainLocation::Right,
                    symptoms: vec![],
                    triggers: vec!["stress".to_string()],
                    notes: None,
                },
            )
            .unwrap();

        let report = run_analytics_aggregation(&db, end, 7).unwrap();

        assert_eq!(report.users_processed, 2);
        assert_eq!(report.results_written, 1);
        assert_eq!(report.users_skipped, 1);

        let results = ResultsStore::new(db.connection());
        let start = end - Duration::days(7);
        let analytics = results
            .load_period_analytics(&with_episodes.id, start, end)
            .unwrap()
            .unwrap();
        assert_eq!(analytics.total_episodes, 1);
        assert_eq!(analytics.worst_day_of_week.as_deref(), Some("Friday"));

        assert_eq!(
            results
                .load_period_analytics(&without_episodes.id, start, end)
                .unwrap(),
            None
        );
    }
}
