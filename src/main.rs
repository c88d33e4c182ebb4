//! AuraTrack - Migraine Tracking Engine
//!
//! Binary entry point: runs the daily batch once. The surrounding
//! scheduler (cron, systemd timer) decides when.

use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use auratrack::jobs;
use auratrack::storage::{config, Database};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting AuraTrack v{}", env!("CARGO_PKG_VERSION"));

    let app_config = config::load_config()?;
    let db = Database::open(&app_config.database_path())?;

    let today = Utc::now().date_naive();

    let forecasts = jobs::run_daily_forecasts(&db, today)?;
    tracing::info!(
        "Generated {} assessments for {} users",
        forecasts.results_written,
        forecasts.users_processed
    );

    let analytics =
        jobs::run_analytics_aggregation(&db, today, app_config.jobs.analytics_window_days)?;
    tracing::info!(
        "Aggregated analytics for {} of {} users ({} without episodes)",
        analytics.results_written,
        analytics.users_processed,
        analytics.users_skipped
    );

    Ok(())
}
