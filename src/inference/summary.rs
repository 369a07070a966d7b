//! Model summary statistics.
//!
//! Information criteria use the Gaussian log-likelihood at the maximum
//! likelihood variance `SSE / n`:
//!
//! ```text
//! ℓ   = -n/2 · (ln 2π + ln(SSE/n) + 1)
//! AIC = -2ℓ + 2k
//! BIC = -2ℓ + k · ln n
//! ```
//!
//! with `k = p + 1` (the coefficients plus the residual variance). Every
//! model fit by this crate carries the same `n(ln 2π + 1)` constant, so
//! differences between models are meaningful; the absolute values match
//! R's `AIC()` and `BIC()` on `lm` fits.

use super::coefficient::CoefficientInference;
use crate::solvers::{DegenerateReason, FittedOls, FittedRegressor, RegressionError};
use crate::utils::mean;
use faer::Col;
use statrs::distribution::{ContinuousCDF, FisherSnedecor};

/// Overall F test of the model against the intercept-only (or empty) model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FStatistic {
    /// F statistic.
    pub value: f64,
    /// Numerator degrees of freedom (p - 1 with an intercept, else p).
    pub df_model: usize,
    /// Denominator degrees of freedom (n - p).
    pub df_residual: usize,
    /// Upper-tail p-value.
    pub p_value: f64,
}

/// Inference for a single coefficient.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientSummary {
    /// Design column name.
    pub name: String,
    /// Point estimate.
    pub estimate: f64,
    /// Standard error.
    pub std_error: f64,
    /// t statistic (estimate / std_error).
    pub t_statistic: f64,
    /// Two-sided p-value.
    pub p_value: f64,
    /// Lower confidence bound.
    pub conf_lower: f64,
    /// Upper confidence bound.
    pub conf_upper: f64,
}

/// Read-only summary of a fitted OLS model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSummary {
    /// Coefficient of determination.
    pub r_squared: f64,
    /// R² penalised for the number of parameters.
    pub adj_r_squared: f64,
    /// Overall F test; `None` when the model has no terms besides the
    /// intercept.
    pub f_statistic: Option<FStatistic>,
    /// Gaussian log-likelihood at the MLE of σ².
    pub log_likelihood: f64,
    /// Akaike Information Criterion.
    pub aic: f64,
    /// Small-sample corrected AIC; `None` when n - p - 2 <= 0.
    pub aicc: Option<f64>,
    /// Bayesian Information Criterion.
    pub bic: f64,
    /// Residual standard error sqrt(SSE / (n - p)).
    pub residual_std_error: f64,
    /// Residual sum of squares.
    pub sse: f64,
    /// Total sum of squares (centered with an intercept, raw without).
    pub sst: f64,
    /// Number of observations.
    pub n_observations: usize,
    /// Number of parameters.
    pub n_parameters: usize,
    /// Confidence level of the coefficient intervals.
    pub confidence_level: f64,
    /// Per-coefficient inference, in design column order.
    pub coefficients: Vec<CoefficientSummary>,
}

impl ModelSummary {
    /// Compute the summary of `fitted`.
    ///
    /// The response is recovered from the fit as `ŷ + e`, so SST always
    /// describes the data the model was fit to.
    ///
    /// # Errors
    ///
    /// - `DegenerateModel` if p >= n, or if the response is constant in a
    ///   model with an intercept
    pub fn from_fit(fitted: &FittedOls) -> Result<Self, RegressionError> {
        let result = fitted.result();
        let n = result.n_observations;
        let p = result.n_parameters;

        if p >= n {
            return Err(RegressionError::DegenerateModel(
                DegenerateReason::TooFewObservations {
                    n_observations: n,
                    n_parameters: p,
                },
            ));
        }

        let y = Col::from_fn(n, |i| result.fitted_values[i] + result.residuals[i]);
        let sse = result.rss();
        let sst: f64 = if result.has_intercept {
            let y_mean = mean(&y);
            y.iter().map(|&yi| (yi - y_mean).powi(2)).sum()
        } else {
            y.iter().map(|&yi| yi * yi).sum()
        };
        if sst == 0.0 {
            return Err(RegressionError::DegenerateModel(
                DegenerateReason::ConstantResponse,
            ));
        }

        let n_f = n as f64;
        let df_resid = result.residual_df();
        let df_model = result.model_df();
        let df_total = if result.has_intercept { n - 1 } else { n };

        let r_squared = 1.0 - sse / sst;
        let adj_r_squared = 1.0 - (1.0 - r_squared) * df_total as f64 / df_resid as f64;

        let mse = sse / df_resid as f64;
        let f_statistic = if df_model > 0 {
            let value = ((sst - sse) / df_model as f64) / mse;
            let p_value = FisherSnedecor::new(df_model as f64, df_resid as f64)
                .map(|d| if value.is_finite() { d.sf(value) } else { 0.0 })
                .unwrap_or(f64::NAN);
            Some(FStatistic {
                value,
                df_model,
                df_residual: df_resid,
                p_value,
            })
        } else {
            None
        };

        // Information criteria
        let log_likelihood =
            -0.5 * n_f * ((2.0 * std::f64::consts::PI).ln() + (sse / n_f).ln() + 1.0);
        let k = (p + 1) as f64;
        let aic = 2.0 * k - 2.0 * log_likelihood;
        let bic = k * n_f.ln() - 2.0 * log_likelihood;
        let aicc = (n_f - k - 1.0 > 0.0).then(|| aic + 2.0 * k * (k + 1.0) / (n_f - k - 1.0));

        // Coefficient inference
        let confidence_level = fitted.options().confidence_level;
        let df = df_resid as f64;
        let se = CoefficientInference::standard_errors(&result.xtx_inverse, mse);
        let t_stats = CoefficientInference::t_statistics(&result.coefficients, &se);
        let p_vals = CoefficientInference::p_values(&t_stats, df)?;
        let (lower, upper) =
            CoefficientInference::confidence_intervals(&result.coefficients, &se, df, confidence_level)?;

        let coefficients = result
            .column_names
            .iter()
            .enumerate()
            .map(|(j, name)| CoefficientSummary {
                name: name.clone(),
                estimate: result.coefficients[j],
                std_error: se[j],
                t_statistic: t_stats[j],
                p_value: p_vals[j],
                conf_lower: lower[j],
                conf_upper: upper[j],
            })
            .collect();

        Ok(Self {
            r_squared,
            adj_r_squared,
            f_statistic,
            log_likelihood,
            aic,
            aicc,
            bic,
            residual_std_error: mse.sqrt(),
            sse,
            sst,
            n_observations: n,
            n_parameters: p,
            confidence_level,
            coefficients,
        })
    }

    /// Inference for the named coefficient.
    pub fn coefficient(&self, name: &str) -> Option<&CoefficientSummary> {
        self.coefficients.iter().find(|c| c.name == name)
    }
}
