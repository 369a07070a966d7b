//! R² inflation under covariates unrelated to the response.

use crate::inference::ModelSummary;
use crate::solvers::{OlsRegressor, RegressionError, Regressor};
use crate::synthetic::{irrelevant_covariates, SyntheticError};
use faer::Mat;
use thiserror::Error;
use tracing::{debug, info};

/// Errors from an [`InflationStudy`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("step must be positive")]
    ZeroStep,

    #[error("at least one predictor is required")]
    NoPredictors,

    #[error("{max_predictors} predictors leave no residual degrees of freedom with n = {n}")]
    TooManyPredictors { n: usize, max_predictors: usize },

    #[error(transparent)]
    Data(#[from] SyntheticError),

    #[error(transparent)]
    Fit(#[from] RegressionError),
}

/// Fit statistics of one model in the study.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InflationPoint {
    pub n_predictors: usize,
    pub r_squared: f64,
    pub adj_r_squared: f64,
}

/// Nested fits y ~ 1 + x₁ + … + x_k on pure noise.
///
/// R² can only grow as columns are added, even though none of them carries
/// information about y; adjusted R² stays near zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InflationStudy {
    pub n: usize,
    pub max_predictors: usize,
    pub step: usize,
    pub seed: u64,
}

impl Default for InflationStudy {
    fn default() -> Self {
        Self {
            n: 1000,
            max_predictors: 300,
            step: 50,
            seed: 1,
        }
    }
}

impl InflationStudy {
    /// Predictor counts visited: 1, step, 2·step, … up to `max_predictors`.
    pub fn predictor_counts(&self) -> Vec<usize> {
        let mut counts = vec![1];
        counts.extend(
            (1..)
                .map(|i| i * self.step)
                .take_while(|&k| k <= self.max_predictors)
                .filter(|&k| k > 1),
        );
        counts
    }

    /// Run the study.
    pub fn run(&self) -> Result<Vec<InflationPoint>, SimulationError> {
        if self.step == 0 {
            return Err(SimulationError::ZeroStep);
        }
        if self.max_predictors == 0 {
            return Err(SimulationError::NoPredictors);
        }
        if self.max_predictors + 1 >= self.n {
            return Err(SimulationError::TooManyPredictors {
                n: self.n,
                max_predictors: self.max_predictors,
            });
        }

        let (covariates, y) = irrelevant_covariates(self.n, self.max_predictors, self.seed)?;
        let regressor = OlsRegressor::default();

        let mut points = Vec::new();
        for k in self.predictor_counts() {
            let x = Mat::from_fn(self.n, k + 1, |i, j| {
                if j == 0 {
                    1.0
                } else {
                    covariates[(i, j - 1)]
                }
            });
            let fitted = regressor.fit(&x, &y)?;
            let summary = ModelSummary::from_fit(&fitted)?;

            debug!(
                k,
                r_squared = summary.r_squared,
                adj_r_squared = summary.adj_r_squared,
                "inflation step"
            );
            points.push(InflationPoint {
                n_predictors: k,
                r_squared: summary.r_squared,
                adj_r_squared: summary.adj_r_squared,
            });
        }

        info!(
            n = self.n,
            models = points.len(),
            final_r_squared = ?points.last().map(|p| p.r_squared),
            "R² inflation study complete"
        );
        Ok(points)
    }
}
