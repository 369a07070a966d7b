//! Regression diagnostics (leverage, residuals, influence).
//!
//! - **Leverage**: observations with unusual predictor values
//! - **Residuals**: standardized and studentized residuals for outlier detection
//! - **Influence**: Cook's distance and DFFITS for influential point detection
//!
//! # Example
//!
//! ```rust,ignore
//! use ols_toolkit::diagnostics::{compute_leverage, cooks_distance, influential_cooks};
//!
//! let result = fitted.result();
//! let mse = result.mse().unwrap_or(f64::NAN);
//! let leverage = compute_leverage(&design.x, &result.xtx_inverse);
//! let cooks = cooks_distance(&result.residuals, &leverage, mse, result.n_parameters);
//!
//! let influential = influential_cooks(&cooks, None);
//! ```
//!
//! [`RegressionDiagnostics::from_fit`] computes all of them at once.

mod influence;
mod leverage;
mod report;
mod residuals;

pub use influence::{cooks_distance, dffits, influential_cooks};
pub use leverage::{compute_leverage, high_leverage_points};
pub use report::{RegressionDiagnostics, OUTLIER_THRESHOLD};
pub use residuals::{
    externally_studentized_residuals, residual_outliers, standardized_residuals,
    studentized_residuals,
};
