//! Trailing moving-average smoothing of daily sales

use crate::config::DEFAULT_SMOOTHING_DAYS;
use crate::data::{calendar, TimeSeries, Window};
use crate::error::{ForecastError, Result};
use series_math::SimpleMovingAverage;

/// Trailing N-day moving average.
///
/// The smoothed value of day `d` is the mean of the zero-filled quantities
/// over `[d - (N - 1), d]`. Days with no recorded sale count as zero, so an
/// empty series smooths to `0.0` everywhere rather than `NaN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Smoother {
    period: usize,
}

impl Default for Smoother {
    fn default() -> Self {
        Self {
            period: DEFAULT_SMOOTHING_DAYS,
        }
    }
}

impl Smoother {
    /// Create a smoother averaging over `period` days
    pub fn new(period: usize) -> Result<Self> {
        if period == 0 {
            return Err(ForecastError::InvalidParameter(
                "Smoothing period must be positive".to_string(),
            ));
        }
        Ok(Self { period })
    }

    /// Number of days in each average
    pub fn period(&self) -> usize {
        self.period
    }

    /// Smoothed series with one entry per day of `window`
    pub fn smooth(&self, series: &TimeSeries, window: &Window) -> Result<TimeSeries> {
        let lead_in = calendar::days_before(window.begin(), self.period as u64 - 1)?;
        let mut sma = SimpleMovingAverage::new(self.period)?;
        for day in lead_in.iter_days().take(self.period - 1) {
            sma.update(series.value_or_zero(day));
        }

        let mut smoothed = TimeSeries::new();
        for day in window.days() {
            sma.update(series.value_or_zero(day));
            smoothed.insert(day, sma.value()?);
        }

        Ok(smoothed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_zero_period_rejected() {
        assert!(Smoother::new(0).is_err());
        assert_eq!(Smoother::default().period(), 7);
    }

    #[test]
    fn test_single_sale_spreads_over_a_week() {
        let series = TimeSeries::from_points(vec![(date(2020, 1, 1), 7.0)]);
        let window = Window::new(date(2020, 1, 1), date(2020, 1, 8)).unwrap();
        let smoothed = Smoother::default().smooth(&series, &window).unwrap();

        assert_eq!(smoothed.len(), 8);
        assert_eq!(smoothed.get(date(2020, 1, 1)), Some(1.0));
        assert_eq!(smoothed.get(date(2020, 1, 7)), Some(1.0));
        assert_eq!(smoothed.get(date(2020, 1, 8)), Some(0.0));
    }
}
