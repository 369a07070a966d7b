//! Ordinary least squares regression with full statistical inference.
//!
//! The crate covers the whole path from an in-memory table of observations
//! to a summarised model: a typed model specification replaces the formula
//! string, the design matrix builder encodes categorical predictors and
//! centers numeric ones, the fitter solves by QR decomposition and reports
//! linearly dependent columns by name, and the summary carries R², the F
//! test, information criteria and coefficient inference.
//!
//! # Example
//!
//! ```rust,ignore
//! use ols_toolkit::prelude::*;
//!
//! let table = ObservationTable::builder()
//!     .numeric_complete("income", &income)
//!     .numeric_complete("age", &age)
//!     .categorical("group", groups)
//!     .build()?;
//!
//! let spec = ModelSpec::builder("income")
//!     .centered("age")
//!     .categorical("group")
//!     .build()?;
//!
//! let design = DesignMatrixBuilder::new(&spec).build(&table)?;
//! let fitted = OlsRegressor::default().fit_design(&design)?;
//! let summary = fitted.summary()?;
//! println!("R² = {:.3}, dropped rows = {}", summary.r_squared, design.dropped_rows());
//!
//! let predictions = fitted
//!     .predictor(&design.schema)?
//!     .predict_with_interval(&new_rows, IntervalType::Prediction, 0.95)?;
//! ```

pub mod core;
pub mod design;
pub mod diagnostics;
pub mod inference;
pub mod simulation;
pub mod solvers;
pub mod synthetic;
pub mod utils;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::{
        Column, ColumnKind, IntervalType, ModelSpec, NaAction, NaInfo, ObservationTable,
        PredictionResult, PredictorKind, RegressionOptions, RegressionResult, Value,
    };
    pub use crate::design::{DesignMatrix, DesignMatrixBuilder, EncodingSchema};
    pub use crate::diagnostics::RegressionDiagnostics;
    pub use crate::inference::{ModelSummary, Predictor};
    pub use crate::simulation::{InflationPoint, InflationStudy};
    pub use crate::solvers::{
        FittedOls, FittedRegressor, OlsRegressor, RegressionError, Regressor,
    };
    pub use crate::synthetic::{GeneratingParams, NoiseModel, SyntheticGenerator};
}

pub use crate::core::{
    IntervalType, ModelSpec, NaAction, NaError, NaInfo, ObservationTable, OptionsError,
    PredictionResult, RegressionOptions, RegressionOptionsBuilder, RegressionResult,
};
pub use crate::design::{SchemaError, SchemaMismatch};
pub use crate::solvers::{
    DegenerateReason, FittedOls, FittedRegressor, OlsRegressor, RegressionError, Regressor,
};
