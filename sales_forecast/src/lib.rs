//! # Sales Forecast
//!
//! Daily sales forecasting for a product in a store from its own history and
//! the history of its category.
//!
//! ## Features
//!
//! - Sparse daily series with zero-fill materialization and year-ago remapping
//! - Trailing 7-day smoothing
//! - Year-over-year drift (percentage and additive) and its projection
//! - Correlation gate for blending in category sales
//! - Three strategies tried in order: barcode, category, rolling mean
//! - Accuracy evaluation (median percentage error, residual deviation)
//! - Parallel batch runs over store × barcode × period plans
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use sales_forecast::strategies::{forecast_with_fallback, ForecastInput};
//! use sales_forecast::{ForecastConfig, TimeSeries};
//!
//! let day = |d| NaiveDate::from_ymd_opt(2020, 1, d).unwrap();
//! let history = TimeSeries::from_points((1..=7).map(|d| (day(d), d as f64)));
//!
//! let chained = forecast_with_fallback(
//!     &ForecastInput::new(&history),
//!     day(7),
//!     day(8),
//!     &ForecastConfig::default(),
//! )?;
//!
//! assert_eq!(chained.total(), 4.0);
//! # Ok::<(), sales_forecast::ForecastError>(())
//! ```

pub mod batch;
pub mod config;
pub mod correlation;
pub mod data;
pub mod drift;
pub mod error;
pub mod metrics;
pub mod smoothing;
pub mod strategies;

// Re-export commonly used types
pub use crate::batch::{
    BatchForecaster, BatchPlan, EntityKey, ForecastRecord, HistorySource, Period,
};
pub use crate::config::ForecastConfig;
pub use crate::data::{TimeSeries, Window};
pub use crate::error::{ForecastError, Result};
pub use crate::metrics::{evaluate, AccuracyReport};
pub use crate::strategies::{ForecastOutcome, ForecastStrategy, StrategyKind};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
