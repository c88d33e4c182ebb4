//! Analytics error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur during analytics aggregation.
///
/// An empty window is a data state, not an error: aggregations return
/// absent fields (or no record at all) instead of failing.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The requested window ends before it starts.
    #[error("Invalid window: period end {end} precedes period start {start}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },
}

/// Result type for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
