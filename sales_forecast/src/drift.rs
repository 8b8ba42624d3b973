//! Trend drift between two series and its projection onto a reference

use crate::data::{TimeSeries, Window};
use crate::error::{ForecastError, Result};

/// How a "new" window aggregate compares to an "old" one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drift {
    /// `(new_mean / old_mean - 1) * 100`
    pub percentage: f64,
    /// `new_mean - old_mean`
    pub additive: f64,
}

impl Drift {
    /// Drift between two means; fails when `old_mean` is zero
    pub fn between(new_mean: f64, old_mean: f64, window: &Window) -> Result<Self> {
        if old_mean == 0.0 {
            return Err(ForecastError::UndefinedDrift {
                begin: window.begin(),
                end: window.end(),
            });
        }

        Ok(Self {
            percentage: (new_mean / old_mean - 1.0) * 100.0,
            additive: new_mean - old_mean,
        })
    }
}

/// Compares window means of two series
#[derive(Debug, Clone, Copy, Default)]
pub struct DriftComparator;

impl DriftComparator {
    /// Drift of `new` relative to `old`, using each series' entries inside
    /// `window`. An empty slice has mean `0.0`.
    pub fn compare(&self, new: &TimeSeries, old: &TimeSeries, window: &Window) -> Result<Drift> {
        let new_mean = new.slice(window).mean();
        let old_mean = old.slice(window).mean();
        Drift::between(new_mean, old_mean, window)
    }
}

/// Pointwise projection of a reference series by a measured drift.
///
/// Results are not clamped: a steep decline may project negative quantities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// `new(d) = old(d) + shift`
    Additive(f64),
    /// `new(d) = old(d) * (1 + percent / 100)`
    Percentage(f64),
}

impl Projection {
    /// Additive projection by the drift's absolute difference
    pub fn additive(drift: &Drift) -> Self {
        Projection::Additive(drift.additive)
    }

    /// Percentage projection by the drift's relative change
    pub fn percentage(drift: &Drift) -> Self {
        Projection::Percentage(drift.percentage)
    }

    /// Transform a single value
    pub fn apply_to(&self, value: f64) -> f64 {
        match *self {
            Projection::Additive(shift) => value + shift,
            Projection::Percentage(percent) => value * (1.0 + percent / 100.0),
        }
    }

    /// Project the reference entries inside `window`
    pub fn apply(&self, reference: &TimeSeries, window: &Window) -> TimeSeries {
        reference.slice(window).map(|value| self.apply_to(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn window() -> Window {
        Window::new(
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 3).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_drift_between() {
        let drift = Drift::between(15.0, 10.0, &window()).unwrap();
        assert_eq!(drift.percentage, 50.0);
        assert_eq!(drift.additive, 5.0);
    }

    #[test]
    fn test_drift_zero_reference() {
        let err = Drift::between(15.0, 0.0, &window()).unwrap_err();
        assert!(matches!(err, ForecastError::UndefinedDrift { .. }));
    }

    #[test]
    fn test_projection_keeps_negative_values() {
        assert_eq!(Projection::Additive(-5.0).apply_to(2.0), -3.0);
        assert_eq!(Projection::Percentage(-150.0).apply_to(2.0), -1.0);
    }
}
