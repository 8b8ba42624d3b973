//! Correlation gate deciding whether a secondary series can be trusted

use crate::data::{TimeSeries, Window};
use series_math::pearson_correlation;

/// Minimum score for a category-derived forecast.
///
/// Hand-tuned, not fitted to data.
pub const DEFAULT_CORRELATION_THRESHOLD: f64 = 75.0;

/// Outcome of a gate check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateDecision {
    /// The score reached the threshold
    Accepted { score: f64 },
    /// The score fell short, or correlation was undefined (`None`)
    Rejected { score: Option<f64> },
}

impl GateDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, GateDecision::Accepted { .. })
    }

    /// The correlation score, when one could be computed
    pub fn score(&self) -> Option<f64> {
        match *self {
            GateDecision::Accepted { score } => Some(score),
            GateDecision::Rejected { score } => score,
        }
    }
}

/// Pearson correlation between two day-aligned series, scaled to 0-100,
/// compared against a fixed threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationGate {
    threshold: f64,
}

impl Default for CorrelationGate {
    fn default() -> Self {
        Self::new(DEFAULT_CORRELATION_THRESHOLD)
    }
}

impl CorrelationGate {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Correlation × 100 over the dates both series share inside `window`.
    ///
    /// `None` when the coefficient is undefined: fewer than two shared days,
    /// or a series that does not vary.
    pub fn score(&self, first: &TimeSeries, second: &TimeSeries, window: &Window) -> Option<f64> {
        let (left, right) = first.aligned_values(second, window);
        match pearson_correlation(&left, &right) {
            Ok(r) => Some(r * 100.0),
            Err(err) => {
                tracing::debug!("Correlation undefined over {:?}: {}", window, err);
                None
            }
        }
    }

    /// Whether a score passes the threshold
    pub fn admits(&self, score: f64) -> bool {
        score >= self.threshold
    }

    /// Score the two series and decide
    pub fn evaluate(
        &self,
        first: &TimeSeries,
        second: &TimeSeries,
        window: &Window,
    ) -> GateDecision {
        match self.score(first, second, window) {
            Some(score) if self.admits(score) => GateDecision::Accepted { score },
            score => GateDecision::Rejected { score },
        }
    }
}
