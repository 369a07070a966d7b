//! Coefficient inference calculations.

use crate::solvers::{DegenerateReason, RegressionError};
use faer::{Col, Mat};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Computes inference statistics for regression coefficients.
pub struct CoefficientInference;

impl CoefficientInference {
    /// Compute standard errors for OLS coefficients.
    ///
    /// SE(β_j) = sqrt(σ² * (X'X)^(-1)_{jj})
    pub fn standard_errors(xtx_inverse: &Mat<f64>, mse: f64) -> Col<f64> {
        Col::from_fn(xtx_inverse.nrows(), |j| {
            (mse * xtx_inverse[(j, j)]).max(0.0).sqrt()
        })
    }

    /// Compute t-statistics for coefficients.
    ///
    /// t_j = β_j / SE(β_j). A zero standard error (exact fit) gives ±∞.
    pub fn t_statistics(coefficients: &Col<f64>, std_errors: &Col<f64>) -> Col<f64> {
        Col::from_fn(coefficients.nrows(), |j| coefficients[j] / std_errors[j])
    }

    /// Compute two-sided p-values from t-statistics.
    ///
    /// p_j = 2 * P(|T| > |t_j|) where T ~ t(df)
    pub fn p_values(t_statistics: &Col<f64>, df: f64) -> Result<Col<f64>, RegressionError> {
        let t_dist = t_distribution(df)?;

        Ok(Col::from_fn(t_statistics.nrows(), |j| {
            let t = t_statistics[j];
            if t.is_nan() {
                // 0/0: coefficient and standard error both zero
                1.0
            } else {
                2.0 * (1.0 - t_dist.cdf(t.abs()))
            }
        }))
    }

    /// Two-sided Student t critical value for `confidence_level`.
    pub fn t_critical(df: f64, confidence_level: f64) -> Result<f64, RegressionError> {
        let t_dist = t_distribution(df)?;
        let alpha = 1.0 - confidence_level;
        Ok(t_dist.inverse_cdf(1.0 - alpha / 2.0))
    }

    /// Compute confidence intervals for coefficients.
    ///
    /// CI_j = β_j ± t_{α/2, df} * SE(β_j)
    pub fn confidence_intervals(
        coefficients: &Col<f64>,
        std_errors: &Col<f64>,
        df: f64,
        confidence_level: f64,
    ) -> Result<(Col<f64>, Col<f64>), RegressionError> {
        let t_crit = Self::t_critical(df, confidence_level)?;
        let n = coefficients.nrows();

        let lower = Col::from_fn(n, |j| coefficients[j] - t_crit * std_errors[j]);
        let upper = Col::from_fn(n, |j| coefficients[j] + t_crit * std_errors[j]);

        Ok((lower, upper))
    }
}

/// Standard t distribution with `df` degrees of freedom.
pub(crate) fn t_distribution(df: f64) -> Result<StudentsT, RegressionError> {
    StudentsT::new(0.0, 1.0, df)
        .map_err(|_| RegressionError::DegenerateModel(DegenerateReason::NoResidualDegreesOfFreedom))
}
