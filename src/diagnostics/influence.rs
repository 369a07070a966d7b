//! Influence measures: Cook's distance and DFFITS.

use super::residuals::externally_studentized_residuals;
use faer::Col;

/// Cook's distance Dᵢ = eᵢ² / (p·MSE) · hᵢᵢ / (1 - hᵢᵢ)².
///
/// Measures how far all fitted values move when observation i is dropped.
/// NaN throughout when `mse` is zero or non-finite, or `n_params` is zero.
pub fn cooks_distance(
    residuals: &Col<f64>,
    leverage: &Col<f64>,
    mse: f64,
    n_params: usize,
) -> Col<f64> {
    let n = residuals.nrows();
    if mse <= 0.0 || !mse.is_finite() || n_params == 0 {
        return Col::from_fn(n, |_| f64::NAN);
    }

    let scale = n_params as f64 * mse;
    Col::from_fn(n, |i| {
        let h = leverage[i];
        let one_minus_h = (1.0 - h).max(1e-14);
        let d = residuals[i].powi(2) / scale * h / (one_minus_h * one_minus_h);
        if d.is_finite() {
            d.max(0.0)
        } else {
            f64::NAN
        }
    })
}

/// DFFITSᵢ = tᵢ·sqrt(hᵢᵢ / (1 - hᵢᵢ)), with tᵢ the externally studentized
/// residual.
pub fn dffits(residuals: &Col<f64>, leverage: &Col<f64>, mse: f64, n_params: usize) -> Col<f64> {
    let t = externally_studentized_residuals(residuals, leverage, mse, n_params);
    Col::from_fn(residuals.nrows(), |i| {
        let h = leverage[i];
        t[i] * (h / (1.0 - h).max(1e-14)).sqrt()
    })
}

/// Indices with Cook's distance above `threshold` (default 4/n).
pub fn influential_cooks(cooks_d: &Col<f64>, threshold: Option<f64>) -> Vec<usize> {
    let cutoff = threshold.unwrap_or(4.0 / cooks_d.nrows() as f64);

    cooks_d
        .iter()
        .enumerate()
        .filter(|(_, &d)| d.is_finite() && d > cutoff)
        .map(|(i, _)| i)
        .collect()
}
