//! All residual diagnostics of a fit in one place.

use super::{
    compute_leverage, cooks_distance, dffits, externally_studentized_residuals,
    high_leverage_points, influential_cooks, residual_outliers, standardized_residuals,
    studentized_residuals,
};
use crate::design::SchemaMismatch;
use crate::solvers::{DegenerateReason, FittedOls, FittedRegressor, RegressionError};
use faer::{Col, Mat};

/// Cutoff on |externally studentized residual| used by [`RegressionDiagnostics::outliers`].
pub const OUTLIER_THRESHOLD: f64 = 3.0;

/// Per-observation diagnostics of a fitted OLS model.
#[derive(Debug, Clone)]
pub struct RegressionDiagnostics {
    /// Hat values.
    pub leverage: Col<f64>,
    /// eᵢ / s.
    pub standardized: Col<f64>,
    /// eᵢ / (s·sqrt(1 - hᵢᵢ)).
    pub studentized: Col<f64>,
    /// Deleted (externally studentized) residuals.
    pub externally_studentized: Col<f64>,
    /// Cook's distance.
    pub cooks_distance: Col<f64>,
    /// DFFITS.
    pub dffits: Col<f64>,
    n_params: usize,
}

impl RegressionDiagnostics {
    /// Compute diagnostics for `fitted`, given the design matrix it was fit
    /// with (`DesignMatrix::x` for table fits).
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch` / `SchemaMismatch` if `x` is not the fit's
    ///   design
    /// - `DegenerateModel` when there are no residual degrees of freedom
    pub fn from_fit(fitted: &FittedOls, x: &Mat<f64>) -> Result<Self, RegressionError> {
        let result = fitted.result();
        if x.nrows() != result.n_observations {
            return Err(RegressionError::DimensionMismatch {
                x_rows: x.nrows(),
                y_len: result.n_observations,
            });
        }
        if x.ncols() != result.n_parameters {
            return Err(SchemaMismatch::ColumnCount {
                expected: result.n_parameters,
                got: x.ncols(),
            }
            .into());
        }
        let mse = result.mse().ok_or(RegressionError::DegenerateModel(
            DegenerateReason::NoResidualDegreesOfFreedom,
        ))?;

        let p = result.n_parameters;
        let e = &result.residuals;
        let leverage = compute_leverage(x, &result.xtx_inverse);

        Ok(Self {
            standardized: standardized_residuals(e, mse),
            studentized: studentized_residuals(e, &leverage, mse),
            externally_studentized: externally_studentized_residuals(e, &leverage, mse, p),
            cooks_distance: cooks_distance(e, &leverage, mse, p),
            dffits: dffits(e, &leverage, mse, p),
            leverage,
            n_params: p,
        })
    }

    /// Observations with leverage above 2p/n.
    pub fn high_leverage(&self) -> Vec<usize> {
        high_leverage_points(&self.leverage, self.n_params, None)
    }

    /// Observations with |externally studentized residual| above
    /// [`OUTLIER_THRESHOLD`].
    pub fn outliers(&self) -> Vec<usize> {
        residual_outliers(&self.externally_studentized, OUTLIER_THRESHOLD)
    }

    /// Observations with Cook's distance above 4/n.
    pub fn influential(&self) -> Vec<usize> {
        influential_cooks(&self.cooks_distance, None)
    }
}
