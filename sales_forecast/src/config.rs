//! Tunable parameters of the forecasting engine.
//!
//! The engine does not read files; callers deserialize a [`ForecastConfig`]
//! from whatever format they use and hand it over. Missing keys fall back to
//! the defaults below.

use crate::correlation::DEFAULT_CORRELATION_THRESHOLD;
use crate::error::{ForecastError, Result};
use crate::strategies::StrategyKind;
use serde::{Deserialize, Serialize};

/// Days in the trailing smoothing window
pub const DEFAULT_SMOOTHING_DAYS: usize = 7;

/// Days averaged by the rolling-mean fallback
pub const DEFAULT_MEAN_WINDOW_DAYS: usize = 7;

/// Longest smoothing, rolling-mean or lead-in window accepted, in days
pub const MAX_WINDOW_DAYS: u64 = 366;

/// Longest lookback accepted, in months
pub const MAX_LOOKBACK_MONTHS: u32 = 120;

fn check_range(name: &str, value: u64, max: u64) -> Result<()> {
    if value == 0 || value > max {
        return Err(ForecastError::InvalidParameter(format!(
            "{} must be within 1..={}, got {}",
            name, max, value
        )));
    }
    Ok(())
}

/// Forecast engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Trailing moving-average period used before any trend comparison
    pub smoothing_days: usize,
    /// Trailing period of the rolling-mean fallback
    pub mean_window_days: usize,
    /// How far back from "now" the recent period starts, in months
    pub lookback_months: u32,
    /// Extra days materialized before the recent period so the first
    /// smoothed day sees a full window
    pub lead_in_days: u64,
    /// Minimum correlation score (0-100) for a category forecast
    pub correlation_threshold: f64,
    /// Strategies tried in order until one produces a forecast
    pub strategy_order: Vec<StrategyKind>,
    /// Decimal places kept in reported totals and accuracy figures
    pub round_decimals: u32,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            smoothing_days: DEFAULT_SMOOTHING_DAYS,
            mean_window_days: DEFAULT_MEAN_WINDOW_DAYS,
            lookback_months: 1,
            lead_in_days: 7,
            correlation_threshold: DEFAULT_CORRELATION_THRESHOLD,
            strategy_order: vec![
                StrategyKind::Barcode,
                StrategyKind::Category,
                StrategyKind::Mean,
            ],
            round_decimals: 2,
        }
    }
}

impl ForecastConfig {
    /// Configuration that only runs the rolling-mean strategy
    pub fn mean_only() -> Self {
        Self {
            strategy_order: vec![StrategyKind::Mean],
            ..Self::default()
        }
    }

    /// Check that every parameter is usable
    pub fn validate(&self) -> Result<()> {
        check_range("smoothing_days", self.smoothing_days as u64, MAX_WINDOW_DAYS)?;
        check_range("mean_window_days", self.mean_window_days as u64, MAX_WINDOW_DAYS)?;
        if self.lead_in_days > MAX_WINDOW_DAYS {
            return Err(ForecastError::InvalidParameter(format!(
                "lead_in_days must be at most {}, got {}",
                MAX_WINDOW_DAYS, self.lead_in_days
            )));
        }
        check_range(
            "lookback_months",
            self.lookback_months as u64,
            MAX_LOOKBACK_MONTHS as u64,
        )?;
        if !self.correlation_threshold.is_finite()
            || !(-100.0..=100.0).contains(&self.correlation_threshold)
        {
            return Err(ForecastError::InvalidParameter(format!(
                "correlation_threshold must be within -100..=100, got {}",
                self.correlation_threshold
            )));
        }
        if self.strategy_order.is_empty() {
            return Err(ForecastError::InvalidParameter(
                "strategy_order must name at least one strategy".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ForecastConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.smoothing_days, 7);
        assert_eq!(config.correlation_threshold, 75.0);
    }

    #[test]
    fn test_mean_only() {
        let config = ForecastConfig::mean_only();
        assert_eq!(config.strategy_order, vec![StrategyKind::Mean]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = ForecastConfig::default();
        config.smoothing_days = 0;
        assert!(matches!(
            config.validate(),
            Err(ForecastError::InvalidParameter(_))
        ));

        let mut config = ForecastConfig::default();
        config.correlation_threshold = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = ForecastConfig::default();
        config.strategy_order.clear();
        assert!(config.validate().is_err());
    }
}
