//! # Series Math
//!
//! Numeric building blocks for daily sales series.
//! This crate provides the trailing moving average, the summary statistics
//! and the correlation measure used by the forecasting engine. Every function
//! returns a defined number for empty input instead of `NaN`.

use thiserror::Error;

pub mod moving_averages;
pub mod statistics;

/// Errors that can occur in series calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Length mismatch: left has {left} values, right has {right}")]
    LengthMismatch { left: usize, right: usize },
}

/// Result type for series math operations
pub type Result<T> = std::result::Result<T, MathError>;

pub use moving_averages::SimpleMovingAverage;
pub use statistics::{mean, median, pearson_correlation, round_to, sample_std_dev};
