//! Least squares estimation.

mod ols;
mod traits;

pub use ols::{FittedOls, OlsRegressor, OlsRegressorBuilder};
pub use traits::{DegenerateReason, FittedRegressor, RegressionError, Regressor};
