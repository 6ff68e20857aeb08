//! Simulator errors

use chrono::NaiveDate;
use thiserror::Error;

/// Result type for simulator operations
pub type SimResult<T> = Result<T, SimError>;

/// Invalid generation requests
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    /// Start date falls after end date
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange {
        start: NaiveDate,
        end: NaiveDate,
    },

    /// Zero readings per hour, or more than a day's count can hold
    #[error("Unusable readings per hour: {readings_per_hour}")]
    InvalidRate {
        readings_per_hour: u32,
    },
}
