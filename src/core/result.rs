//! Regression result structures.

use super::na_action::NaInfo;
use faer::{Col, Mat};

/// Core result of an OLS fit.
///
/// One coefficient per design-matrix column, in column order (the intercept
/// is simply the column named `(Intercept)` when present). Built once by the
/// fitter and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct RegressionResult {
    // ========== Core Results ==========
    /// Estimated coefficients, one per design column.
    pub coefficients: Col<f64>,

    /// Residuals (y - fitted_values).
    pub residuals: Col<f64>,

    /// Fitted values (Xβ on the training rows).
    pub fitted_values: Col<f64>,

    /// Names of the design columns the coefficients belong to.
    pub column_names: Vec<String>,

    /// Whether one of the design columns is an intercept.
    pub has_intercept: bool,

    // ========== Dimensions ==========
    /// Number of observations (n).
    pub n_observations: usize,

    /// Number of parameters (p), equal to the number of design columns.
    pub n_parameters: usize,

    /// `(X'X)⁻¹`, kept for standard errors, intervals and leverage.
    pub xtx_inverse: Mat<f64>,

    // ========== NA Handling Information ==========
    /// Missing value handling applied before the fit, when the model was
    /// fit from a design matrix.
    pub na_info: Option<NaInfo>,
}

impl RegressionResult {
    /// Residual degrees of freedom (n - p).
    pub fn residual_df(&self) -> usize {
        self.n_observations.saturating_sub(self.n_parameters)
    }

    /// Model degrees of freedom (p - 1 with an intercept, else p).
    pub fn model_df(&self) -> usize {
        if self.has_intercept {
            self.n_parameters.saturating_sub(1)
        } else {
            self.n_parameters
        }
    }

    /// Residual sum of squares (SSE).
    pub fn rss(&self) -> f64 {
        self.residuals.iter().map(|&r| r.powi(2)).sum()
    }

    /// Residual variance estimate SSE / (n - p), or `None` for an exact fit
    /// with no residual degrees of freedom.
    pub fn mse(&self) -> Option<f64> {
        let df = self.residual_df();
        (df > 0).then(|| self.rss() / df as f64)
    }

    /// Residual standard error sqrt(SSE / (n - p)).
    pub fn residual_std_error(&self) -> Option<f64> {
        self.mse().map(f64::sqrt)
    }

    /// Coefficient of the named design column.
    pub fn coefficient(&self, name: &str) -> Option<f64> {
        self.column_names
            .iter()
            .position(|c| c == name)
            .map(|j| self.coefficients[j])
    }

    /// Intercept coefficient, if the model has one.
    pub fn intercept(&self) -> Option<f64> {
        if !self.has_intercept {
            return None;
        }
        self.coefficient(crate::design::INTERCEPT)
    }

    // ========== NA-Aware Methods ==========

    /// Get residuals expanded to original length (for `NaAction::Exclude`).
    ///
    /// With rows 2 and 3 removed:
    /// - `residuals = [r0, r1, r4]` (length 3)
    /// - `residuals_expanded() = [r0, r1, NaN, NaN, r4]` (length 5)
    pub fn residuals_expanded(&self) -> Col<f64> {
        match &self.na_info {
            Some(info) if info.needs_expansion() => info.expand(&self.residuals),
            _ => self.residuals.clone(),
        }
    }

    /// Get fitted values expanded to original length (for `NaAction::Exclude`).
    pub fn fitted_expanded(&self) -> Col<f64> {
        match &self.na_info {
            Some(info) if info.needs_expansion() => info.expand(&self.fitted_values),
            _ => self.fitted_values.clone(),
        }
    }

    /// Get the number of rows that were removed due to missing values.
    pub fn n_na_removed(&self) -> usize {
        self.na_info.as_ref().map_or(0, |info| info.n_removed)
    }
}
