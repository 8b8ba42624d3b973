//! Batch forecasting over many store/product pairs.
//!
//! A plan names stores, barcodes and periods. Every store × barcode pair is
//! one unit of work: its history is fetched once and reused for all periods.
//! Pairs share nothing, so they run in parallel.

use crate::config::ForecastConfig;
use crate::data::{calendar, TimeSeries, Window};
use crate::error::Result;
use crate::strategies::{ForecastInput, StrategyChain, StrategyKind};
use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use series_math::round_to;
use std::collections::HashMap;

/// A product in a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityKey {
    pub store_id: u64,
    pub barcode: u64,
}

impl EntityKey {
    pub fn new(store_id: u64, barcode: u64) -> Self {
        Self { store_id, barcode }
    }
}

/// Forecast period: the `days` days following `date`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// Reference date ("now")
    pub date: NaiveDate,
    /// Length of the horizon in days
    pub days: u32,
}

impl Period {
    pub fn new(date: NaiveDate, days: u32) -> Self {
        Self { date, days }
    }

    /// Last day of the horizon
    pub fn for_date(&self) -> Result<NaiveDate> {
        calendar::days_after(self.date, self.days as u64)
    }

    /// The horizon `(date, date + days]`: exactly `days` days.
    ///
    /// Realized totals use the same horizon as forecasts, so a realized
    /// period never counts the extra `date + days + 1` day.
    pub fn horizon(&self) -> Result<Window> {
        Window::after(self.date, self.for_date()?)
    }
}

/// What to forecast in a batch run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchPlan {
    pub stores: Vec<u64>,
    pub barcodes: Vec<u64>,
    pub periods: Vec<Period>,
}

impl BatchPlan {
    /// Every store × barcode pair, stores outermost
    pub fn entities(&self) -> Vec<EntityKey> {
        self.stores
            .iter()
            .flat_map(|&store_id| {
                self.barcodes
                    .iter()
                    .map(move |&barcode| EntityKey::new(store_id, barcode))
            })
            .collect()
    }

    /// Number of records the plan produces
    pub fn len(&self) -> usize {
        self.stores.len() * self.barcodes.len() * self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reject zero-length periods before any work starts
    pub fn validate(&self) -> Result<()> {
        for period in &self.periods {
            period.horizon()?;
        }
        Ok(())
    }
}

/// Where a record's value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOrigin {
    /// Sum of recorded sales
    Realized,
    /// Forecast produced by this strategy
    Strategy(StrategyKind),
    /// Every strategy was unavailable; the value is a zero placeholder
    Exhausted,
}

/// Alignment key of a record: store, barcode, period date, period days
pub type RecordKey = (u64, u64, NaiveDate, u32);

/// One total per store, barcode and period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRecord {
    pub store_id: u64,
    pub barcode: u64,
    pub period_date: NaiveDate,
    pub period_days: u32,
    pub value: f64,
    pub origin: RecordOrigin,
}

impl ForecastRecord {
    pub fn key(&self) -> RecordKey {
        (self.store_id, self.barcode, self.period_date, self.period_days)
    }

    /// Whether the value is a placeholder rather than a forecast
    pub fn is_exhausted(&self) -> bool {
        self.origin == RecordOrigin::Exhausted
    }
}

/// Supplier of raw daily sales histories.
///
/// Implementations return all available history; windowing happens in the
/// engine.
pub trait HistorySource: Sync {
    /// Daily sales of the product in the store
    fn barcode_history(&self, entity: &EntityKey) -> Result<TimeSeries>;

    /// Daily sales of the product's category in the store, if it has one
    fn category_history(&self, entity: &EntityKey) -> Result<Option<TimeSeries>>;
}

/// History source backed by preloaded series
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    barcodes: HashMap<EntityKey, TimeSeries>,
    categories: HashMap<EntityKey, TimeSeries>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_barcode(mut self, entity: EntityKey, history: TimeSeries) -> Self {
        self.barcodes.insert(entity, history);
        self
    }

    pub fn with_category(mut self, entity: EntityKey, history: TimeSeries) -> Self {
        self.categories.insert(entity, history);
        self
    }
}

impl HistorySource for InMemorySource {
    fn barcode_history(&self, entity: &EntityKey) -> Result<TimeSeries> {
        Ok(self.barcodes.get(entity).cloned().unwrap_or_default())
    }

    fn category_history(&self, entity: &EntityKey) -> Result<Option<TimeSeries>> {
        Ok(self.categories.get(entity).cloned())
    }
}

/// Runs the strategy chain over a whole plan
#[derive(Debug)]
pub struct BatchForecaster {
    chain: StrategyChain,
    decimals: u32,
}

impl BatchForecaster {
    pub fn new(config: &ForecastConfig) -> Result<Self> {
        Ok(Self {
            chain: StrategyChain::from_config(config)?,
            decimals: config.round_decimals,
        })
    }

    /// Forecast records for one entity, one per period
    pub fn forecast_entity<S>(
        &self,
        source: &S,
        entity: &EntityKey,
        periods: &[Period],
    ) -> Result<Vec<ForecastRecord>>
    where
        S: HistorySource + ?Sized,
    {
        let history = source.barcode_history(entity)?;
        let category = source.category_history(entity)?;

        let mut input = ForecastInput::new(&history);
        if let Some(category) = category.as_ref() {
            input = input.with_category(category);
        }

        periods
            .iter()
            .map(|period| {
                let chained = self.chain.forecast(&input, period.date, period.for_date()?)?;
                let origin = match chained.kind() {
                    Some(kind) => RecordOrigin::Strategy(kind),
                    None => {
                        tracing::warn!(
                            "No forecast for store {} barcode {} on {} (+{} days); reporting 0: {:?}",
                            entity.store_id,
                            entity.barcode,
                            period.date,
                            period.days,
                            chained.skipped
                        );
                        RecordOrigin::Exhausted
                    }
                };

                Ok(ForecastRecord {
                    store_id: entity.store_id,
                    barcode: entity.barcode,
                    period_date: period.date,
                    period_days: period.days,
                    value: round_to(chained.total(), self.decimals),
                    origin,
                })
            })
            .collect()
    }

    /// Forecast every entity and period of the plan.
    ///
    /// Records come back in plan order: store, then barcode, then period.
    pub fn run<S>(&self, source: &S, plan: &BatchPlan) -> Result<Vec<ForecastRecord>>
    where
        S: HistorySource + ?Sized,
    {
        plan.validate()?;
        let entities = plan.entities();
        tracing::info!(
            "Forecasting {} entities over {} periods",
            entities.len(),
            plan.periods.len()
        );

        let records: Vec<ForecastRecord> = entities
            .par_iter()
            .map(|entity| self.forecast_entity(source, entity, &plan.periods))
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .flatten()
            .collect();

        let exhausted = records.iter().filter(|r| r.is_exhausted()).count();
        if exhausted > 0 {
            tracing::warn!(
                "{} of {} records have no forecast",
                exhausted,
                records.len()
            );
        }
        tracing::info!("Batch complete: {} records", records.len());

        Ok(records)
    }

    /// Realized sales totals for every entity and period of the plan
    pub fn realized<S>(&self, source: &S, plan: &BatchPlan) -> Result<Vec<ForecastRecord>>
    where
        S: HistorySource + ?Sized,
    {
        plan.validate()?;

        let records = plan
            .entities()
            .par_iter()
            .map(|entity| {
                let history = source.barcode_history(entity)?;
                plan.periods
                    .iter()
                    .map(|period| {
                        let total = history.slice(&period.horizon()?).sum();
                        Ok(ForecastRecord {
                            store_id: entity.store_id,
                            barcode: entity.barcode,
                            period_date: period.date,
                            period_days: period.days,
                            value: round_to(total, self.decimals),
                            origin: RecordOrigin::Realized,
                        })
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(records.into_iter().flatten().collect())
    }
}
