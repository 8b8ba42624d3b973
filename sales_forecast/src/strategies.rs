//! Forecast strategies and the fallback chain that composes them.
//!
//! Each strategy turns raw daily history into a forecast for `(now, for_date]`
//! or reports why it cannot. "Cannot" is an ordinary outcome, not an error:
//! the chain simply moves on to the next strategy. Only caller mistakes such
//! as a reversed horizon come back as `Err`.

use crate::config::ForecastConfig;
use crate::data::TimeSeries;
use crate::drift::Drift;
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod barcode;
pub mod category;
pub mod mean;

pub use barcode::BarcodeStrategy;
pub use category::CategoryStrategy;
pub use mean::MeanStrategy;

/// The available forecasting algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Year-over-year drift of the product's own sales
    Barcode,
    /// Last year's category sales scaled to the product
    Category,
    /// Rolling mean of recent days
    Mean,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategyKind::Barcode => "barcode",
            StrategyKind::Category => "category",
            StrategyKind::Mean => "mean",
        };
        f.write_str(name)
    }
}

/// Histories available to a strategy
#[derive(Debug, Clone, Copy)]
pub struct ForecastInput<'a> {
    /// Raw daily sales of the forecast target
    pub history: &'a TimeSeries,
    /// Raw daily sales of the target's category, if known
    pub category: Option<&'a TimeSeries>,
}

impl<'a> ForecastInput<'a> {
    pub fn new(history: &'a TimeSeries) -> Self {
        Self {
            history,
            category: None,
        }
    }

    pub fn with_category(mut self, category: &'a TimeSeries) -> Self {
        self.category = Some(category);
        self
    }
}

/// Intermediate series a forecast was derived from
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastBasis {
    /// Smoothed recent sales of the target
    pub recent: TimeSeries,
    /// Smoothed reference series the forecast was projected from
    pub reference: TimeSeries,
    /// Drift applied to the reference
    pub drift: Drift,
    /// Correlation score, for gated strategies
    pub correlation: Option<f64>,
}

/// A daily forecast and how it was produced
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub kind: StrategyKind,
    /// One value per day of the horizon
    pub series: TimeSeries,
    pub basis: Option<ForecastBasis>,
}

impl Forecast {
    /// Sum of the daily forecast over the horizon
    pub fn total(&self) -> f64 {
        self.series.sum()
    }
}

/// Why a strategy produced no forecast
#[derive(Debug, Clone, PartialEq)]
pub enum UnavailableReason {
    /// No sales recorded at all
    EmptyHistory,
    /// No recorded sales after `now`, so there is nothing to compare
    NoRecentSales { last_sale: NaiveDate },
    /// The reference mean was zero
    UndefinedDrift,
    /// No category history was supplied
    MissingCategory,
    /// Category sales do not track the product closely enough
    CorrelationBelowThreshold { score: Option<f64> },
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::EmptyHistory => write!(f, "empty history"),
            UnavailableReason::NoRecentSales { last_sale } => {
                write!(f, "no sales recorded in range (last sale {})", last_sale)
            }
            UnavailableReason::UndefinedDrift => write!(f, "no comparison basis"),
            UnavailableReason::MissingCategory => write!(f, "no category history"),
            UnavailableReason::CorrelationBelowThreshold { score: Some(score) } => {
                write!(f, "category correlation {:.2} below threshold", score)
            }
            UnavailableReason::CorrelationBelowThreshold { score: None } => {
                write!(f, "category correlation undefined")
            }
        }
    }
}

/// Result of a single strategy run
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastOutcome {
    Forecast(Forecast),
    Unavailable(UnavailableReason),
}

impl ForecastOutcome {
    pub fn forecast(&self) -> Option<&Forecast> {
        match self {
            ForecastOutcome::Forecast(forecast) => Some(forecast),
            ForecastOutcome::Unavailable(_) => None,
        }
    }

    pub fn into_forecast(self) -> Option<Forecast> {
        match self {
            ForecastOutcome::Forecast(forecast) => Some(forecast),
            ForecastOutcome::Unavailable(_) => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, ForecastOutcome::Forecast(_))
    }

    /// Convert a strategy-internal failure into an outcome.
    ///
    /// Recoverable failures become `Unavailable`; anything else is returned
    /// as an error.
    pub(crate) fn from_error(err: ForecastError) -> Result<Self> {
        match err.unavailable_reason() {
            Some(reason) => Ok(ForecastOutcome::Unavailable(reason)),
            None => Err(err),
        }
    }
}

/// Common interface for forecasting strategies
pub trait ForecastStrategy: Send + Sync {
    /// Which algorithm this is
    fn kind(&self) -> StrategyKind;

    /// Forecast daily sales for `(now, for_date]`
    fn forecast(
        &self,
        input: &ForecastInput<'_>,
        now: NaiveDate,
        for_date: NaiveDate,
    ) -> Result<ForecastOutcome>;
}

/// Build the strategy of the given kind from a validated configuration
pub fn strategy_for(
    kind: StrategyKind,
    config: &ForecastConfig,
) -> Result<Box<dyn ForecastStrategy>> {
    config.validate()?;
    Ok(match kind {
        StrategyKind::Barcode => Box::new(BarcodeStrategy::new(config)?),
        StrategyKind::Category => Box::new(CategoryStrategy::new(config)?),
        StrategyKind::Mean => Box::new(MeanStrategy::new(config)?),
    })
}

/// Run a single strategy
pub fn forecast(
    kind: StrategyKind,
    input: &ForecastInput<'_>,
    now: NaiveDate,
    for_date: NaiveDate,
    config: &ForecastConfig,
) -> Result<ForecastOutcome> {
    strategy_for(kind, config)?.forecast(input, now, for_date)
}

/// Result of running the configured strategies in order
#[derive(Debug, Clone, PartialEq)]
pub struct ChainedForecast {
    /// First forecast produced, `None` when every strategy was unavailable
    pub forecast: Option<Forecast>,
    /// Strategies that were tried and skipped, in order
    pub skipped: Vec<(StrategyKind, UnavailableReason)>,
}

impl ChainedForecast {
    /// Total over the horizon; zero when no strategy produced a forecast
    pub fn total(&self) -> f64 {
        self.forecast.as_ref().map(Forecast::total).unwrap_or(0.0)
    }

    /// Strategy that produced the forecast
    pub fn kind(&self) -> Option<StrategyKind> {
        self.forecast.as_ref().map(|forecast| forecast.kind)
    }
}

/// Sequence of strategies tried until one produces a forecast
pub struct StrategyChain {
    strategies: Vec<Box<dyn ForecastStrategy>>,
}

impl fmt::Debug for StrategyChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<StrategyKind> = self.strategies.iter().map(|s| s.kind()).collect();
        f.debug_struct("StrategyChain").field("strategies", &kinds).finish()
    }
}

impl StrategyChain {
    /// Chain following `config.strategy_order`
    pub fn from_config(config: &ForecastConfig) -> Result<Self> {
        config.validate()?;
        let strategies = config
            .strategy_order
            .iter()
            .map(|kind| strategy_for(*kind, config))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { strategies })
    }

    /// Kinds in the order they are tried
    pub fn kinds(&self) -> Vec<StrategyKind> {
        self.strategies.iter().map(|s| s.kind()).collect()
    }

    /// Try each strategy in turn; the first forecast wins
    pub fn forecast(
        &self,
        input: &ForecastInput<'_>,
        now: NaiveDate,
        for_date: NaiveDate,
    ) -> Result<ChainedForecast> {
        let mut skipped = Vec::new();

        for strategy in &self.strategies {
            match strategy.forecast(input, now, for_date)? {
                ForecastOutcome::Forecast(forecast) => {
                    return Ok(ChainedForecast {
                        forecast: Some(forecast),
                        skipped,
                    });
                }
                ForecastOutcome::Unavailable(reason) => {
                    tracing::debug!(
                        "{} strategy unavailable for {}..={}: {}",
                        strategy.kind(),
                        now,
                        for_date,
                        reason
                    );
                    skipped.push((strategy.kind(), reason));
                }
            }
        }

        Ok(ChainedForecast {
            forecast: None,
            skipped,
        })
    }
}

/// Run the configured fallback chain once
pub fn forecast_with_fallback(
    input: &ForecastInput<'_>,
    now: NaiveDate,
    for_date: NaiveDate,
    config: &ForecastConfig,
) -> Result<ChainedForecast> {
    StrategyChain::from_config(config)?.forecast(input, now, for_date)
}
