//! Database schema definitions for the tracking engine.

/// SQL schema for creating all database tables.
pub const SCHEMA: &str = r#"
-- Users table
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL
);

-- Daily wellness logs
CREATE TABLE IF NOT EXISTS wellness_logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL REFERENCES users(id),
    date TEXT NOT NULL,
    sleep_hours REAL NOT NULL,
    stress_level INTEGER NOT NULL,
    water_intake REAL NOT NULL,
    exercise_duration INTEGER NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_wellness_logs_user_date ON wellness_logs(user_id, date);

-- Biometric samples
CREATE TABLE IF NOT EXISTS biometric_samples (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL REFERENCES users(id),
    timestamp TEXT NOT NULL,
    heart_rate INTEGER NOT NULL,
    hrv REAL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_biometric_samples_user_ts ON biometric_samples(user_id, timestamp);

-- Migraine episode events
CREATE TABLE IF NOT EXISTS episode_events (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL REFERENCES users(id),
    start_time TEXT NOT NULL,
    end_time TEXT,
    severity INTEGER NOT NULL,
    pain_location TEXT NOT NULL,
    symptoms_json TEXT NOT NULL,
    triggers_json TEXT NOT NULL,
    notes TEXT,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_episode_events_user_start ON episode_events(user_id, start_time);

-- Daily risk assessments, one row per user per date
CREATE TABLE IF NOT EXISTS risk_assessments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL REFERENCES users(id),
    date TEXT NOT NULL,
    risk_score INTEGER NOT NULL,
    risk_level TEXT NOT NULL,
    top_factors_json TEXT NOT NULL,
    confidence REAL NOT NULL,
    recommendations_json TEXT NOT NULL,
    model_version TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE(user_id, date)
);

-- Period analytics, one row per user per window
CREATE TABLE IF NOT EXISTS period_analytics (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL REFERENCES users(id),
    period_start TEXT NOT NULL,
    period_end TEXT NOT NULL,
    total_episodes INTEGER NOT NULL,
    avg_severity REAL,
    avg_duration_hours REAL,
    top_triggers_json TEXT NOT NULL,
    best_day_of_week TEXT,
    worst_day_of_week TEXT,
    best_time_of_day TEXT,
    worst_time_of_day TEXT,
    sleep_correlation REAL,
    stress_correlation REAL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE(user_id, period_start, period_end)
);
"#;

/// SQL for the schema version tracking table.
pub const SCHEMA_VERSION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);
"#;

/// Current schema version.
pub const CURRENT_VERSION: i32 = 1;
