//! Standardized and studentized residuals.

use faer::Col;

/// Smallest `1 - hᵢᵢ` used as a divisor.
const MIN_ONE_MINUS_H: f64 = 1e-14;

fn usable(mse: f64) -> bool {
    mse > 0.0 && mse.is_finite()
}

/// Standardized residuals eᵢ / s, with s the residual standard error.
///
/// With a zero or non-finite `mse` every residual is NaN, except exact
/// zeros which stay zero.
pub fn standardized_residuals(residuals: &Col<f64>, mse: f64) -> Col<f64> {
    if !usable(mse) {
        return Col::from_fn(residuals.nrows(), |i| {
            if residuals[i] == 0.0 {
                0.0
            } else {
                f64::NAN
            }
        });
    }

    let s = mse.sqrt();
    Col::from_fn(residuals.nrows(), |i| residuals[i] / s)
}

/// Internally studentized residuals eᵢ / (s·sqrt(1 - hᵢᵢ)).
pub fn studentized_residuals(residuals: &Col<f64>, leverage: &Col<f64>, mse: f64) -> Col<f64> {
    let n = residuals.nrows();
    if !usable(mse) {
        return Col::from_fn(n, |_| f64::NAN);
    }

    let s = mse.sqrt();
    Col::from_fn(n, |i| {
        residuals[i] / (s * (1.0 - leverage[i]).max(MIN_ONE_MINUS_H).sqrt())
    })
}

/// Externally studentized (deleted) residuals eᵢ / (s₍ᵢ₎·sqrt(1 - hᵢᵢ)).
///
/// s₍ᵢ₎ is the residual standard error of the fit without observation i,
/// obtained without refitting from `SSE₍ᵢ₎ = SSE - eᵢ²/(1 - hᵢᵢ)` on
/// n - p - 1 degrees of freedom. Under the model these follow a t
/// distribution with n - p - 1 df. NaN when that df is zero.
pub fn externally_studentized_residuals(
    residuals: &Col<f64>,
    leverage: &Col<f64>,
    mse: f64,
    n_params: usize,
) -> Col<f64> {
    let n = residuals.nrows();
    let df_resid = n.saturating_sub(n_params);
    if df_resid <= 1 || !usable(mse) {
        return Col::from_fn(n, |_| f64::NAN);
    }

    let sse = mse * df_resid as f64;
    let df_deleted = (df_resid - 1) as f64;

    Col::from_fn(n, |i| {
        let e = residuals[i];
        let one_minus_h = (1.0 - leverage[i]).max(MIN_ONE_MINUS_H);
        let mse_deleted = (sse - e * e / one_minus_h) / df_deleted;

        if mse_deleted > 0.0 {
            e / (mse_deleted.sqrt() * one_minus_h.sqrt())
        } else {
            f64::NAN
        }
    })
}

/// Indices of observations with |rᵢ| > `threshold` (commonly 2 or 3).
pub fn residual_outliers(studentized: &Col<f64>, threshold: f64) -> Vec<usize> {
    studentized
        .iter()
        .enumerate()
        .filter(|(_, &r)| r.abs() > threshold)
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standardized_residuals() {
        let residuals = Col::from_fn(10, |i| i as f64 - 4.5);
        let std_resid = standardized_residuals(&residuals, 4.0);

        for i in 0..10 {
            assert!((std_resid[i] - residuals[i] / 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_standardized_with_zero_mse() {
        let residuals = Col::from_fn(3, |i| if i == 0 { 0.0 } else { 1.0 });
        let std_resid = standardized_residuals(&residuals, 0.0);

        assert_eq!(std_resid[0], 0.0);
        assert!(std_resid[1].is_nan());
    }

    #[test]
    fn test_studentized_uniform_leverage() {
        let residuals = Col::from_fn(10, |i| i as f64 - 4.5);
        let leverage = Col::from_fn(10, |_| 0.2);

        let stud = studentized_residuals(&residuals, &leverage, 10.0);
        let factor = 10.0_f64.sqrt() * 0.8_f64.sqrt();
        for i in 0..10 {
            assert!((stud[i] - residuals[i] / factor).abs() < 1e-12);
        }
    }

    #[test]
    fn test_external_exceeds_internal_for_large_residual() {
        let mut residuals = Col::from_fn(20, |i| if i % 2 == 0 { 0.5 } else { -0.5 });
        residuals[7] = 4.0;
        let leverage = Col::from_fn(20, |_| 0.1);
        let sse: f64 = residuals.iter().map(|e| e * e).sum();
        let mse = sse / 18.0;

        let internal = studentized_residuals(&residuals, &leverage, mse);
        let external = externally_studentized_residuals(&residuals, &leverage, mse, 2);

        assert!(external[7].abs() > internal[7].abs());
        assert!(external[0].abs() < internal[0].abs());
    }

    #[test]
    fn test_external_needs_two_residual_df() {
        let residuals = Col::from_fn(3, |i| i as f64);
        let leverage = Col::from_fn(3, |_| 0.5);
        let ext = externally_studentized_residuals(&residuals, &leverage, 1.0, 2);
        assert!(ext.iter().all(|r| r.is_nan()));
    }

    #[test]
    fn test_outlier_detection() {
        let studentized = Col::from_fn(10, |i| if i == 5 { 4.0 } else { (i as f64 - 4.5) * 0.1 });
        assert_eq!(residual_outliers(&studentized, 2.0), vec![5]);
    }
}
