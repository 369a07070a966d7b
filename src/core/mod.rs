//! Core types for regression analysis.

mod na_action;
mod options;
mod prediction;
mod result;
mod spec;
mod table;

pub use na_action::{DroppedRow, NaAction, NaError, NaHandler, NaInfo};
pub use options::{
    validate_confidence_level, OptionsError, RegressionOptions, RegressionOptionsBuilder,
};
pub use prediction::{IntervalType, PredictionInterval, PredictionResult};
pub use result::RegressionResult;
pub use spec::{ModelSpec, ModelSpecBuilder, PredictorKind, PredictorSpec};
pub use table::{Column, ColumnKind, ObservationTable, ObservationTableBuilder, Row, Value};
