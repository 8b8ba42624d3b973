//! # Sales Forecast Workspace
//!
//! Umbrella crate re-exporting the forecasting engine and its math helpers.
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use sales_forecast_workspace::forecast::batch::{
//!     BatchForecaster, BatchPlan, EntityKey, InMemorySource, Period,
//! };
//! use sales_forecast_workspace::forecast::{ForecastConfig, TimeSeries};
//!
//! let day = |d| NaiveDate::from_ymd_opt(2020, 2, d).unwrap();
//! let history = TimeSeries::from_points((9..=15).map(|d| (day(d), 3.0)));
//! let source = InMemorySource::new().with_barcode(EntityKey::new(1, 42), history);
//!
//! let plan = BatchPlan {
//!     stores: vec![1],
//!     barcodes: vec![42],
//!     periods: vec![Period::new(day(15), 7)],
//! };
//! let records = BatchForecaster::new(&ForecastConfig::default())?.run(&source, &plan)?;
//!
//! assert_eq!(records[0].value, 21.0);
//! # Ok::<(), sales_forecast_workspace::forecast::ForecastError>(())
//! ```

pub use sales_forecast as forecast;
pub use series_math as math;

/// Forecast total for a single history with the default strategy chain.
///
/// Returns `0.0` when no strategy can produce a forecast.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use sales_forecast_workspace::{forecast::TimeSeries, forecast_total};
///
/// let day = |d| NaiveDate::from_ymd_opt(2020, 1, d).unwrap();
/// let history = TimeSeries::from_points((1..=7).map(|d| (day(d), 2.0)));
///
/// assert_eq!(forecast_total(&history, day(7), day(10)).unwrap(), 6.0);
/// ```
pub fn forecast_total(
    history: &sales_forecast::TimeSeries,
    now: chrono::NaiveDate,
    for_date: chrono::NaiveDate,
) -> sales_forecast::Result<f64> {
    let config = sales_forecast::ForecastConfig::default();
    let input = sales_forecast::strategies::ForecastInput::new(history);
    let chained =
        sales_forecast::strategies::forecast_with_fallback(&input, now, for_date, &config)?;
    Ok(series_math::round_to(chained.total(), config.round_decimals))
}
