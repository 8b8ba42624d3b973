//! Metrics for evaluating forecast accuracy against realized sales

use crate::batch::{ForecastRecord, RecordKey};
use crate::data::TimeSeries;
use crate::error::{ForecastError, Result};
use series_math::{median, round_to, sample_std_dev};
use std::collections::BTreeMap;

/// Percentage error of one forecast value.
///
/// `|real - forecast| / real * 100`; when nothing was sold the forecast's own
/// magnitude is reported instead.
pub fn percent_error(real: f64, forecast: f64) -> f64 {
    if real != 0.0 {
        (real - forecast).abs() / real * 100.0
    } else {
        forecast.abs()
    }
}

/// Forecast accuracy summary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccuracyReport {
    /// Median of the per-date percentage errors
    pub median_percentage_error: f64,
    /// Sample standard deviation of `real - forecast`
    pub residual_std_dev: f64,
    /// Number of aligned observations
    pub observations: usize,
}

impl std::fmt::Display for AccuracyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Forecast Accuracy ({} observations):", self.observations)?;
        writeln!(f, "  Median error:       {:.2}%", self.median_percentage_error)?;
        writeln!(f, "  Standard deviation: {:.2}", self.residual_std_dev)?;
        Ok(())
    }
}

/// Compares forecasts with realized values
#[derive(Debug, Clone, Copy)]
pub struct AccuracyEvaluator {
    decimals: u32,
}

impl Default for AccuracyEvaluator {
    fn default() -> Self {
        Self { decimals: 2 }
    }
}

impl AccuracyEvaluator {
    /// Evaluator rounding its figures to `decimals` places
    pub fn new(decimals: u32) -> Self {
        Self { decimals }
    }

    /// Per-date percentage errors over the dates both series share
    pub fn percent_errors(&self, real: &TimeSeries, forecast: &TimeSeries) -> TimeSeries {
        real.iter()
            .filter_map(|(date, actual)| {
                forecast
                    .get(date)
                    .map(|predicted| (date, percent_error(actual, predicted)))
            })
            .collect()
    }

    /// Accuracy of `forecast` against `real` over their common dates
    pub fn evaluate(&self, real: &TimeSeries, forecast: &TimeSeries) -> Result<AccuracyReport> {
        let pairs: Vec<(f64, f64)> = real
            .iter()
            .filter_map(|(date, actual)| forecast.get(date).map(|predicted| (actual, predicted)))
            .collect();
        self.evaluate_pairs(&pairs)
    }

    /// Accuracy over already aligned `(real, forecast)` pairs
    pub fn evaluate_pairs(&self, pairs: &[(f64, f64)]) -> Result<AccuracyReport> {
        if pairs.is_empty() {
            return Err(ForecastError::NoCommonDates);
        }

        let errors: Vec<f64> = pairs
            .iter()
            .map(|&(real, forecast)| percent_error(real, forecast))
            .collect();
        let residuals: Vec<f64> = pairs
            .iter()
            .map(|&(real, forecast)| real - forecast)
            .collect();

        Ok(AccuracyReport {
            median_percentage_error: round_to(median(&errors)?, self.decimals),
            residual_std_dev: round_to(sample_std_dev(&residuals), self.decimals),
            observations: pairs.len(),
        })
    }

    /// Accuracy of forecast records against realized records with the same
    /// store, barcode and period
    pub fn evaluate_records(
        &self,
        real: &[ForecastRecord],
        forecast: &[ForecastRecord],
    ) -> Result<AccuracyReport> {
        let predicted: BTreeMap<RecordKey, f64> = forecast
            .iter()
            .map(|record| (record.key(), record.value))
            .collect();

        let pairs: Vec<(f64, f64)> = real
            .iter()
            .filter_map(|record| {
                predicted
                    .get(&record.key())
                    .map(|value| (record.value, *value))
            })
            .collect();

        self.evaluate_pairs(&pairs)
    }
}

/// Evaluate with the default two-decimal rounding
pub fn evaluate(real: &TimeSeries, forecast: &TimeSeries) -> Result<AccuracyReport> {
    AccuracyEvaluator::default().evaluate(real, forecast)
}

/// Evaluate record sets with the default two-decimal rounding
pub fn evaluate_records(
    real: &[ForecastRecord],
    forecast: &[ForecastRecord],
) -> Result<AccuracyReport> {
    AccuracyEvaluator::default().evaluate_records(real, forecast)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_error() {
        assert_eq!(percent_error(100.0, 90.0), 10.0);
        assert_eq!(percent_error(100.0, 110.0), 10.0);
        assert_eq!(percent_error(0.0, 5.0), 5.0);
        assert_eq!(percent_error(0.0, -5.0), 5.0);
        assert_eq!(percent_error(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_empty_pairs() {
        let err = AccuracyEvaluator::default().evaluate_pairs(&[]).unwrap_err();
        assert_eq!(err, ForecastError::NoCommonDates);
    }

    #[test]
    fn test_single_pair_has_zero_spread() {
        let report = AccuracyEvaluator::default()
            .evaluate_pairs(&[(50.0, 40.0)])
            .unwrap();
        assert_eq!(report.median_percentage_error, 20.0);
        assert_eq!(report.residual_std_dev, 0.0);
        assert_eq!(report.observations, 1);
    }
}
