//! Prediction types for interval estimation.

use faer::Col;

/// Type of interval to compute for predictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntervalType {
    /// Interval for the mean response E[Y | x₀]; reflects coefficient
    /// uncertainty only.
    #[default]
    Confidence,

    /// Interval for a single new observation at x₀; adds the residual
    /// variance on top.
    Prediction,
}

/// Interval bounds attached to a [`PredictionResult`].
#[derive(Debug, Clone)]
pub struct PredictionInterval {
    /// Lower bounds of the interval.
    pub lower: Col<f64>,
    /// Upper bounds of the interval.
    pub upper: Col<f64>,
    /// Standard errors used for the bounds.
    pub se: Col<f64>,
    /// Which interval was computed.
    pub kind: IntervalType,
    /// Confidence level of the bounds.
    pub level: f64,
}

/// Result of prediction with optional intervals.
#[derive(Debug, Clone)]
pub struct PredictionResult {
    /// Point predictions.
    pub fit: Col<f64>,
    /// Bounds, present only when an interval was requested.
    pub interval: Option<PredictionInterval>,
}

impl PredictionResult {
    /// Create a new prediction result with only point predictions (no intervals).
    pub fn point_only(fit: Col<f64>) -> Self {
        Self {
            fit,
            interval: None,
        }
    }

    /// Create a new prediction result with intervals.
    pub fn with_interval(fit: Col<f64>, interval: PredictionInterval) -> Self {
        Self {
            fit,
            interval: Some(interval),
        }
    }

    /// Lower bounds, if an interval was computed.
    pub fn lower(&self) -> Option<&Col<f64>> {
        self.interval.as_ref().map(|i| &i.lower)
    }

    /// Upper bounds, if an interval was computed.
    pub fn upper(&self) -> Option<&Col<f64>> {
        self.interval.as_ref().map(|i| &i.upper)
    }

    /// Number of predictions.
    pub fn len(&self) -> usize {
        self.fit.nrows()
    }

    /// Returns true if there are no predictions.
    pub fn is_empty(&self) -> bool {
        self.fit.nrows() == 0
    }
}
