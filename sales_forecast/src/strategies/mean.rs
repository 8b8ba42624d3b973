//! Rolling-mean fallback forecast

use crate::config::ForecastConfig;
use crate::data::{calendar, TimeSeries, Window};
use crate::error::{ForecastError, Result};
use crate::strategies::{Forecast, ForecastInput, ForecastOutcome, ForecastStrategy, StrategyKind};
use chrono::NaiveDate;
use series_math::SimpleMovingAverage;

/// Terminal fallback: each day is the mean of the previous N days.
///
/// Days up to `now` use recorded sales (zero when absent). Later days use the
/// forecast values already computed, so the forecast feeds on itself as it
/// moves past `now`.
#[derive(Debug, Clone)]
pub struct MeanStrategy {
    window_days: usize,
}

impl MeanStrategy {
    pub fn new(config: &ForecastConfig) -> Result<Self> {
        if config.mean_window_days == 0 {
            return Err(ForecastError::InvalidParameter(
                "Mean window must be positive".to_string(),
            ));
        }
        Ok(Self {
            window_days: config.mean_window_days,
        })
    }

    // `horizon` must start the day after `now`.
    fn rolling_forecast(
        &self,
        history: &TimeSeries,
        now: NaiveDate,
        horizon: &Window,
    ) -> Result<TimeSeries> {
        let first_known = calendar::days_before(now, self.window_days as u64 - 1)?;
        let mut sma = SimpleMovingAverage::new(self.window_days)?;
        for day in first_known.iter_days().take(self.window_days) {
            sma.update(history.value_or_zero(day));
        }

        let mut forecast = TimeSeries::new();
        for day in horizon.days() {
            let value = sma.value()?;
            forecast.insert(day, value);
            sma.update(value);
        }

        Ok(forecast)
    }
}

impl ForecastStrategy for MeanStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Mean
    }

    fn forecast(
        &self,
        input: &ForecastInput<'_>,
        now: NaiveDate,
        for_date: NaiveDate,
    ) -> Result<ForecastOutcome> {
        let horizon = Window::after(now, for_date)?;
        let series = self.rolling_forecast(input.history, now, &horizon)?;

        Ok(ForecastOutcome::Forecast(Forecast {
            kind: StrategyKind::Mean,
            series,
            basis: None,
        }))
    }
}
