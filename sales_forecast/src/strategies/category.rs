//! Category-blended forecast, gated by correlation

use crate::config::ForecastConfig;
use crate::correlation::{CorrelationGate, GateDecision};
use crate::data::{calendar, TimeSeries, Window};
use crate::drift::{DriftComparator, Projection};
use crate::error::Result;
use crate::smoothing::Smoother;
use crate::strategies::{
    Forecast, ForecastBasis, ForecastInput, ForecastOutcome, ForecastStrategy, StrategyKind,
    UnavailableReason,
};
use chrono::NaiveDate;

/// Secondary strategy: last year's category sales scaled to the product.
///
/// Over the trailing month `(now - lookback, now]` the product's smoothed
/// sales are compared with the category's smoothed sales from the same days
/// one year earlier. If the two move together (correlation gate), the
/// category's year-ago series over the horizon is scaled by the product's
/// percentage share of it.
///
/// Correlation is measured over the trailing month only, not the horizon.
#[derive(Debug, Clone)]
pub struct CategoryStrategy {
    smoother: Smoother,
    gate: CorrelationGate,
    lookback_months: u32,
}

impl CategoryStrategy {
    pub fn new(config: &ForecastConfig) -> Result<Self> {
        Ok(Self {
            smoother: Smoother::new(config.smoothing_days)?,
            gate: CorrelationGate::new(config.correlation_threshold),
            lookback_months: config.lookback_months,
        })
    }

    fn blend(
        &self,
        history: &TimeSeries,
        category: &TimeSeries,
        now: NaiveDate,
        horizon: &Window,
    ) -> Result<ForecastOutcome> {
        let trailing = Window::new(
            calendar::days_after(calendar::months_before(now, self.lookback_months)?, 1)?,
            now,
        )?;
        let extended = Window::new(trailing.begin(), horizon.end())?;

        let product = self
            .smoother
            .smooth(&history.materialize(&trailing), &trailing)?;
        let category_past = self.smoother.smooth(
            &category.materialize_with(&extended, calendar::year_ago)?,
            &extended,
        )?;

        let score = match self.gate.evaluate(&product, &category_past, &trailing) {
            GateDecision::Accepted { score } => score,
            GateDecision::Rejected { score } => {
                tracing::debug!("Category gate rejected with score {:?}", score);
                return Ok(ForecastOutcome::Unavailable(
                    UnavailableReason::CorrelationBelowThreshold { score },
                ));
            }
        };

        let drift = DriftComparator.compare(&product, &category_past, &trailing)?;
        tracing::debug!(
            "Category correlation {:.2}, product at {:+.2}% of category",
            score,
            drift.percentage
        );

        let series = Projection::percentage(&drift).apply(&category_past, horizon);

        Ok(ForecastOutcome::Forecast(Forecast {
            kind: StrategyKind::Category,
            series,
            basis: Some(ForecastBasis {
                recent: product,
                reference: category_past,
                drift,
                correlation: Some(score),
            }),
        }))
    }
}

impl ForecastStrategy for CategoryStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Category
    }

    fn forecast(
        &self,
        input: &ForecastInput<'_>,
        now: NaiveDate,
        for_date: NaiveDate,
    ) -> Result<ForecastOutcome> {
        let horizon = Window::after(now, for_date)?;
        let Some(category) = input.category else {
            return Ok(ForecastOutcome::Unavailable(
                UnavailableReason::MissingCategory,
            ));
        };

        self.blend(input.history, category, now, &horizon)
            .or_else(ForecastOutcome::from_error)
    }
}
