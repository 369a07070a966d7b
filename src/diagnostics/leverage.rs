//! Leverage (hat matrix diagonal).

use crate::utils::row_quadratic_form;
use faer::{Col, Mat};

/// Hat values hᵢᵢ = xᵢᵀ(XᵀX)⁻¹xᵢ for every row of the design matrix `x`.
///
/// `xtx_inverse` is the `(XᵀX)⁻¹` stored on a fit, so no second
/// factorisation is needed. Values are clamped to [0, 1] against rounding.
///
/// # Properties
/// - Σ hᵢᵢ = p (number of design columns)
/// - with an intercept, every hᵢᵢ >= 1/n
pub fn compute_leverage(x: &Mat<f64>, xtx_inverse: &Mat<f64>) -> Col<f64> {
    Col::from_fn(x.nrows(), |i| {
        row_quadratic_form(x, i, xtx_inverse).clamp(0.0, 1.0)
    })
}

/// Indices of observations whose leverage exceeds `threshold`
/// (default 2p/n).
pub fn high_leverage_points(
    leverage: &Col<f64>,
    n_params: usize,
    threshold: Option<f64>,
) -> Vec<usize> {
    let n = leverage.nrows();
    let cutoff = threshold.unwrap_or(2.0 * n_params as f64 / n as f64);

    leverage
        .iter()
        .enumerate()
        .filter(|(_, &h)| h > cutoff)
        .map(|(i, _)| i)
        .collect()
}
