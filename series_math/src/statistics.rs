//! Summary statistics over plain `f64` slices.
//!
//! Thin wrappers around `statrs` that pin down the empty-input behavior the
//! forecasting engine relies on.

use crate::{MathError, Result};
use statrs::statistics::{Data, Median, Statistics};

/// Arithmetic mean, `0.0` for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.mean()
}

/// Median of the values; even-length input averages the two middle values
pub fn median(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot take the median of an empty slice".to_string(),
        ));
    }
    Ok(Data::new(values.to_vec()).median())
}

/// Sample standard deviation (n - 1 denominator).
///
/// A single observation has no spread to estimate, so fewer than two values
/// give `0.0`.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    values.std_dev()
}

/// Pearson correlation coefficient in `[-1, 1]`.
///
/// Fails when the slices differ in length, hold fewer than two points, or
/// either side has zero variance (the coefficient is undefined there).
pub fn pearson_correlation(first: &[f64], second: &[f64]) -> Result<f64> {
    if first.len() != second.len() {
        return Err(MathError::LengthMismatch {
            left: first.len(),
            right: second.len(),
        });
    }
    if first.len() < 2 {
        return Err(MathError::InsufficientData(format!(
            "Correlation needs at least 2 aligned points, have {}",
            first.len()
        )));
    }

    let first_mean = mean(first);
    let second_mean = mean(second);

    let mut covariance = 0.0;
    let mut first_variance = 0.0;
    let mut second_variance = 0.0;
    for (&x, &y) in first.iter().zip(second.iter()) {
        let dx = x - first_mean;
        let dy = y - second_mean;
        covariance += dx * dy;
        first_variance += dx * dx;
        second_variance += dy * dy;
    }

    if first_variance == 0.0 || second_variance == 0.0 {
        return Err(MathError::InvalidInput(
            "Correlation is undefined for a constant series".to_string(),
        ));
    }

    let r = covariance / (first_variance * second_variance).sqrt();
    Ok(r.clamp(-1.0, 1.0))
}

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
