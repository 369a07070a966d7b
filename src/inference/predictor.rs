//! Prediction from tables of new observations.

use crate::core::{IntervalType, ObservationTable, PredictionResult};
use crate::design::{EncodingSchema, SchemaMismatch, INTERCEPT};
use crate::solvers::{FittedOls, FittedRegressor, RegressionError};
use faer::{Col, Mat};

/// A fitted model paired with the schema its design matrix was built with.
///
/// New rows are encoded exactly as the training rows were: the same
/// centering offsets, the same categorical levels and reference.
#[derive(Debug, Clone, Copy)]
pub struct Predictor<'a> {
    fitted: &'a FittedOls,
    schema: &'a EncodingSchema,
}

impl<'a> Predictor<'a> {
    /// Pair `fitted` with `schema`.
    ///
    /// Fails if the schema's columns are not the model's columns, or, for
    /// models fit from a design, if any predictor is centered or leveled
    /// differently from the schema recorded at fit time.
    pub fn new(fitted: &'a FittedOls, schema: &'a EncodingSchema) -> Result<Self, RegressionError> {
        let result = fitted.result();
        if schema.n_columns() != result.n_parameters {
            return Err(SchemaMismatch::ColumnCount {
                expected: result.n_parameters,
                got: schema.n_columns(),
            }
            .into());
        }
        if let Some(j) = (0..result.n_parameters)
            .find(|&j| schema.column_names()[j] != result.column_names[j])
        {
            return Err(SchemaMismatch::ColumnName {
                expected: result.column_names[j].clone(),
                got: schema.column_names()[j].clone(),
            }
            .into());
        }

        if let Some(stored) = fitted.schema() {
            if stored != schema {
                let predictor = stored
                    .predictors()
                    .iter()
                    .zip(schema.predictors())
                    .find(|(a, b)| a != b)
                    .map_or_else(|| INTERCEPT.to_string(), |(a, _)| a.name.clone());
                return Err(SchemaMismatch::ForeignEncoding { predictor }.into());
            }
        }

        Ok(Self { fitted, schema })
    }

    /// Pair `fitted` with the schema it recorded when it was fit.
    pub(crate) fn from_fit(fitted: &'a FittedOls, schema: &'a EncodingSchema) -> Self {
        Self { fitted, schema }
    }

    /// The schema new rows are encoded with.
    pub fn schema(&self) -> &EncodingSchema {
        self.schema
    }

    /// Encode `table` into design rows.
    pub fn encode(&self, table: &ObservationTable) -> Result<Mat<f64>, RegressionError> {
        Ok(self.schema.encode(table)?)
    }

    /// Point predictions for every row of `table`.
    pub fn predict(&self, table: &ObservationTable) -> Result<Col<f64>, RegressionError> {
        let x = self.encode(table)?;
        self.fitted.predict(&x)
    }

    /// Predictions with a confidence or prediction interval at `level`.
    pub fn predict_with_interval(
        &self,
        table: &ObservationTable,
        interval: IntervalType,
        level: f64,
    ) -> Result<PredictionResult, RegressionError> {
        let x = self.encode(table)?;
        self.fitted.predict_with_interval(&x, Some(interval), level)
    }
}
