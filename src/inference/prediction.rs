//! Prediction interval calculations.

use super::coefficient::CoefficientInference;
use crate::core::{
    validate_confidence_level, IntervalType, PredictionInterval, PredictionResult,
    RegressionResult,
};
use crate::solvers::{DegenerateReason, RegressionError};
use crate::utils::row_quadratic_form;
use faer::{Col, Mat};

/// Computes confidence or prediction intervals for new design rows.
///
/// # Arguments
/// * `x_new` - Encoded design rows (n_new × p), same layout as the fit
/// * `result` - Result of the fit, providing `(X'X)⁻¹`, σ² and df
/// * `predictions` - Point predictions for `x_new`
/// * `confidence_level` - Confidence level (e.g., 0.95)
/// * `interval_type` - Confidence or Prediction interval
///
/// The standard error of the mean response at x₀ is `σ·sqrt(x₀ᵀ(X'X)⁻¹x₀)`;
/// a prediction interval adds the residual variance: `σ·sqrt(1 + x₀ᵀ(X'X)⁻¹x₀)`.
pub fn compute_prediction_intervals(
    x_new: &Mat<f64>,
    result: &RegressionResult,
    predictions: Col<f64>,
    confidence_level: f64,
    interval_type: IntervalType,
) -> Result<PredictionResult, RegressionError> {
    validate_confidence_level(confidence_level)?;

    let mse = result
        .mse()
        .ok_or(RegressionError::DegenerateModel(
            DegenerateReason::TooFewObservations {
                n_observations: result.n_observations,
                n_parameters: result.n_parameters,
            },
        ))?;
    let df = result.residual_df() as f64;
    let t_crit = CoefficientInference::t_critical(df, confidence_level)?;

    let n_new = x_new.nrows();
    let se = Col::from_fn(n_new, |i| {
        // h = x₀'(X'X)⁻¹x₀, the leverage of the new point
        let h = row_quadratic_form(x_new, i, &result.xtx_inverse).max(0.0);
        let var = match interval_type {
            IntervalType::Confidence => mse * h,
            IntervalType::Prediction => mse * (1.0 + h),
        };
        var.sqrt()
    });

    let lower = Col::from_fn(n_new, |i| predictions[i] - t_crit * se[i]);
    let upper = Col::from_fn(n_new, |i| predictions[i] + t_crit * se[i]);

    Ok(PredictionResult::with_interval(
        predictions,
        PredictionInterval {
            lower,
            upper,
            se,
            kind: interval_type,
            level: confidence_level,
        },
    ))
}
