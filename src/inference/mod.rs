//! Statistical inference (standard errors, p-values, confidence intervals,
//! model summaries and prediction).

mod coefficient;
mod prediction;
mod predictor;
mod summary;

pub use coefficient::CoefficientInference;
pub use prediction::compute_prediction_intervals;
pub use predictor::Predictor;
pub use summary::{CoefficientSummary, FStatistic, ModelSummary};
