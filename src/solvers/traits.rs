//! Core traits for regression estimators.

use crate::core::{IntervalType, NaError, OptionsError, PredictionResult, RegressionResult};
use crate::design::{SchemaError, SchemaMismatch};
use faer::{Col, Mat};
use thiserror::Error;

/// Why summary statistics are undefined for a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DegenerateReason {
    #[error("{n_parameters} parameters but only {n_observations} observations")]
    TooFewObservations {
        n_observations: usize,
        n_parameters: usize,
    },

    #[error("response has zero variance")]
    ConstantResponse,

    #[error("no residual degrees of freedom")]
    NoResidualDegreesOfFreedom,
}

/// Errors that can occur while building, fitting, summarising or predicting.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegressionError {
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("insufficient data: need at least {needed} complete rows, got {got} ({dropped} dropped for missing values)")]
    InsufficientData {
        needed: usize,
        got: usize,
        dropped: usize,
    },

    #[error("rank deficient design ({rank} of {n_columns} columns independent); linearly dependent columns: {dependent_columns:?}")]
    RankDeficiency {
        dependent_columns: Vec<String>,
        rank: usize,
        n_columns: usize,
    },

    #[error("degenerate model: {0}")]
    DegenerateModel(DegenerateReason),

    #[error("schema mismatch: {0}")]
    SchemaMismatch(#[from] SchemaMismatch),

    #[error("dimension mismatch: X has {x_rows} rows but y has {y_len} elements")]
    DimensionMismatch { x_rows: usize, y_len: usize },

    #[error("invalid options: {0}")]
    InvalidOptions(#[from] OptionsError),

    #[error(transparent)]
    MissingValues(#[from] NaError),
}

/// A regression estimator that can be fit to data.
///
/// Fitting returns a separate fitted model that can then make predictions.
pub trait Regressor {
    /// The type of the fitted model.
    type Fitted: FittedRegressor;

    /// Fit the model to the data.
    ///
    /// # Arguments
    /// * `x` - Complete design matrix of shape (n_samples, n_columns),
    ///   including the intercept column if the model has one
    /// * `y` - Target vector of length n_samples
    fn fit(&self, x: &Mat<f64>, y: &Col<f64>) -> Result<Self::Fitted, RegressionError>;
}

/// A fitted regression model that can make predictions.
pub trait FittedRegressor {
    /// Make predictions on new, already encoded, design rows.
    ///
    /// Fails with `SchemaMismatch` if the column count differs from the
    /// number of coefficients.
    fn predict(&self, x: &Mat<f64>) -> Result<Col<f64>, RegressionError>;

    /// Access the regression results (coefficients, residuals, etc.).
    fn result(&self) -> &RegressionResult;

    /// Get the coefficients (convenience method).
    fn coefficients(&self) -> &Col<f64> {
        &self.result().coefficients
    }

    /// Get the intercept (convenience method).
    fn intercept(&self) -> Option<f64> {
        self.result().intercept()
    }

    /// Calculate R² on new data.
    ///
    /// Uses the centered total sum of squares; a constant target is
    /// reported as a degenerate model rather than a made-up score.
    fn score(&self, x: &Mat<f64>, y: &Col<f64>) -> Result<f64, RegressionError> {
        let predictions = self.predict(x)?;
        let n = y.nrows();
        if n != predictions.nrows() {
            return Err(RegressionError::DimensionMismatch {
                x_rows: predictions.nrows(),
                y_len: n,
            });
        }

        let y_mean: f64 = y.iter().sum::<f64>() / n as f64;
        let tss: f64 = y.iter().map(|&yi| (yi - y_mean).powi(2)).sum();
        let rss: f64 = y
            .iter()
            .zip(predictions.iter())
            .map(|(&yi, &pi)| (yi - pi).powi(2))
            .sum();

        if tss == 0.0 {
            return Err(RegressionError::DegenerateModel(
                DegenerateReason::ConstantResponse,
            ));
        }
        Ok(1.0 - rss / tss)
    }

    /// Make predictions with confidence or prediction intervals.
    ///
    /// Follows R's `predict(..., interval = "confidence" | "prediction")`.
    ///
    /// # Arguments
    /// * `x` - Encoded design rows of shape (n_samples, n_columns)
    /// * `interval` - `None` for point predictions only,
    ///   `Some(IntervalType::Confidence)` for the mean response,
    ///   `Some(IntervalType::Prediction)` for new observations
    /// * `level` - Confidence level (e.g., 0.95 for 95% intervals)
    fn predict_with_interval(
        &self,
        x: &Mat<f64>,
        interval: Option<IntervalType>,
        level: f64,
    ) -> Result<PredictionResult, RegressionError>;
}
