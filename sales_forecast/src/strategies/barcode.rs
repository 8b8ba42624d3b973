//! Year-over-year forecast from the product's own sales

use crate::config::ForecastConfig;
use crate::data::{calendar, TimeSeries, Window};
use crate::drift::{DriftComparator, Projection};
use crate::error::{ForecastError, Result};
use crate::smoothing::Smoother;
use crate::strategies::{
    Forecast, ForecastBasis, ForecastInput, ForecastOutcome, ForecastStrategy, StrategyKind,
    UnavailableReason,
};
use chrono::NaiveDate;

/// Primary strategy: last year's smoothed sales shifted by this year's drift.
///
/// Both years are smoothed from `now - lookback` on. The additive difference
/// between their means over the horizon is added to last year's smoothed
/// series to give the forecast.
#[derive(Debug, Clone)]
pub struct BarcodeStrategy {
    smoother: Smoother,
    lookback_months: u32,
    lead_in_days: u64,
}

impl BarcodeStrategy {
    pub fn new(config: &ForecastConfig) -> Result<Self> {
        Ok(Self {
            smoother: Smoother::new(config.smoothing_days)?,
            lookback_months: config.lookback_months,
            lead_in_days: config.lead_in_days,
        })
    }

    fn project(
        &self,
        history: &TimeSeries,
        now: NaiveDate,
        horizon: &Window,
    ) -> Result<ForecastOutcome> {
        let last_sale = history.last_date().ok_or(ForecastError::EmptyHistory)?;
        if last_sale <= now {
            return Ok(ForecastOutcome::Unavailable(
                UnavailableReason::NoRecentSales { last_sale },
            ));
        }

        let recent_begin = calendar::months_before(now, self.lookback_months)?;
        let materialized = Window::new(
            calendar::days_before(recent_begin, self.lead_in_days)?,
            horizon.end(),
        )?;
        let this_year = history.materialize(&materialized);
        let past_year = history.materialize_with(&materialized, calendar::year_ago)?;

        let recent = Window::new(recent_begin, last_sale.min(horizon.end()))?;
        let this_year_smoothed = self.smoother.smooth(&this_year, &recent)?;
        let past_year_smoothed = self
            .smoother
            .smooth(&past_year, &Window::new(recent_begin, horizon.end())?)?;

        let drift = DriftComparator.compare(&this_year_smoothed, &past_year_smoothed, horizon)?;
        tracing::debug!(
            "Barcode drift over {}..={}: {:+.2} ({:+.2}%)",
            horizon.begin(),
            horizon.end(),
            drift.additive,
            drift.percentage
        );

        let series = Projection::additive(&drift).apply(&past_year_smoothed, horizon);

        Ok(ForecastOutcome::Forecast(Forecast {
            kind: StrategyKind::Barcode,
            series,
            basis: Some(ForecastBasis {
                recent: this_year_smoothed,
                reference: past_year_smoothed,
                drift,
                correlation: None,
            }),
        }))
    }
}

impl ForecastStrategy for BarcodeStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Barcode
    }

    fn forecast(
        &self,
        input: &ForecastInput<'_>,
        now: NaiveDate,
        for_date: NaiveDate,
    ) -> Result<ForecastOutcome> {
        let horizon = Window::after(now, for_date)?;
        self.project(input.history, now, &horizon)
            .or_else(ForecastOutcome::from_error)
    }
}
