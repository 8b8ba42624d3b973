//! Error types for the sales_forecast crate

use crate::strategies::UnavailableReason;
use chrono::NaiveDate;
use series_math::MathError;
use thiserror::Error;

/// Custom error types for the sales_forecast crate
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ForecastError {
    /// The entity has no recorded sales at all
    #[error("Empty history: no sales recorded for this entity")]
    EmptyHistory,

    /// The reference mean is zero, so a relative change cannot be computed
    #[error("Undefined drift: reference mean over {begin}..={end} is zero")]
    UndefinedDrift { begin: NaiveDate, end: NaiveDate },

    /// A window whose begin date falls after its end date
    #[error("Degenerate window: begin {begin} is after end {end}")]
    DegenerateWindow { begin: NaiveDate, end: NaiveDate },

    /// A calendar shift left chrono's representable date range
    #[error("Date out of range: {date} shifted by {shift}")]
    DateOutOfRange { date: NaiveDate, shift: String },

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Realized and forecast values share no index
    #[error("No common dates between realized and forecast series")]
    NoCommonDates,

    /// Error reported by a history source
    #[error("Source error: {0}")]
    Source(String),

    /// Error from mathematical operations
    #[error("Math error: {0}")]
    Math(#[from] MathError),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl ForecastError {
    /// The reason a strategy reports when it hits this error, or `None` when
    /// the error must surface to the caller.
    ///
    /// Degenerate windows and bad parameters are caller bugs.
    pub fn unavailable_reason(&self) -> Option<UnavailableReason> {
        match self {
            ForecastError::EmptyHistory => Some(UnavailableReason::EmptyHistory),
            ForecastError::UndefinedDrift { .. } => Some(UnavailableReason::UndefinedDrift),
            _ => None,
        }
    }

    /// Whether a strategy may treat this error as "try the next strategy"
    pub fn is_recoverable(&self) -> bool {
        self.unavailable_reason().is_some()
    }
}
