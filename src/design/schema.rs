//! Encoding schema shared by fitting and prediction.

use crate::core::{ColumnKind, ObservationTable, Value};
use faer::Mat;
use thiserror::Error;

/// Name of the intercept column.
pub const INTERCEPT: &str = "(Intercept)";

/// A model specification does not fit the observation table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("column '{0}' not found in observation table")]
    UnknownColumn(String),

    #[error("column '{column}' is {found}, but was declared {declared}")]
    KindMismatch {
        column: String,
        declared: ColumnKind,
        found: ColumnKind,
    },

    #[error("response column '{0}' must be numeric")]
    NonNumericResponse(String),

    #[error("predictor '{0}' listed more than once")]
    DuplicatePredictor(String),

    #[error("column '{0}' defined more than once")]
    DuplicateColumn(String),

    #[error("response '{0}' cannot also be a predictor")]
    ResponseAsPredictor(String),

    #[error("categorical predictor '{0}' cannot be centered")]
    CenteredCategorical(String),

    #[error("column '{column}' has {got} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        got: usize,
    },

    #[error("model has no columns: no intercept and no encodable predictors")]
    EmptyModel,
}

/// New data cannot be encoded with the schema a model was fit with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaMismatch {
    #[error("column '{0}' required by the fitted schema is missing")]
    MissingColumn(String),

    #[error("column '{column}' must be {expected}")]
    KindMismatch { column: String, expected: ColumnKind },

    #[error("row {row} has a missing value in column '{column}'")]
    MissingValue { column: String, row: usize },

    #[error("level '{level}' of column '{column}' was not seen when fitting")]
    UnknownLevel { column: String, level: String },

    #[error("expected {expected} design columns, got {got}")]
    ColumnCount { expected: usize, got: usize },

    #[error("design column '{got}' does not match fitted column '{expected}'")]
    ColumnName { expected: String, got: String },

    #[error("predictor '{predictor}' is encoded differently from the fitted schema")]
    ForeignEncoding { predictor: String },
}

/// How one predictor was turned into design columns.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictorEncoding {
    /// A single column, with the subtracted mean when centered.
    Numeric { center: Option<f64> },
    /// One indicator column per entry of `levels`; `reference` has none.
    Categorical {
        reference: String,
        levels: Vec<String>,
    },
}

impl PredictorEncoding {
    fn n_columns(&self) -> usize {
        match self {
            PredictorEncoding::Numeric { .. } => 1,
            PredictorEncoding::Categorical { levels, .. } => levels.len(),
        }
    }
}

/// A predictor together with its recorded encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedPredictor {
    pub name: String,
    pub encoding: PredictorEncoding,
}

/// Column layout of a design matrix.
///
/// Records everything needed to encode new rows exactly as the training
/// rows were encoded: the intercept flag, centering offsets and the
/// categorical levels with their reference.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodingSchema {
    intercept: bool,
    predictors: Vec<EncodedPredictor>,
    column_names: Vec<String>,
}

impl EncodingSchema {
    /// Build a schema from its predictors; column names are derived.
    pub fn new(intercept: bool, predictors: Vec<EncodedPredictor>) -> Self {
        let mut column_names = Vec::new();
        if intercept {
            column_names.push(INTERCEPT.to_string());
        }
        for p in &predictors {
            match &p.encoding {
                PredictorEncoding::Numeric { .. } => column_names.push(p.name.clone()),
                PredictorEncoding::Categorical { levels, .. } => {
                    column_names.extend(levels.iter().map(|l| format!("{}[{}]", p.name, l)));
                }
            }
        }

        Self {
            intercept,
            predictors,
            column_names,
        }
    }

    /// Whether the first column is an intercept.
    pub fn intercept(&self) -> bool {
        self.intercept
    }

    /// Predictors in design order.
    pub fn predictors(&self) -> &[EncodedPredictor] {
        &self.predictors
    }

    /// Design column names in order.
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Number of design columns.
    pub fn n_columns(&self) -> usize {
        self.column_names.len()
    }

    /// Mean subtracted from a centered numeric predictor.
    pub fn center_of(&self, predictor: &str) -> Option<f64> {
        self.find(predictor).and_then(|p| match p.encoding {
            PredictorEncoding::Numeric { center } => center,
            PredictorEncoding::Categorical { .. } => None,
        })
    }

    /// Reference level of a categorical predictor.
    pub fn reference_level(&self, predictor: &str) -> Option<&str> {
        self.find(predictor).and_then(|p| match &p.encoding {
            PredictorEncoding::Categorical { reference, .. } => Some(reference.as_str()),
            PredictorEncoding::Numeric { .. } => None,
        })
    }

    fn find(&self, predictor: &str) -> Option<&EncodedPredictor> {
        self.predictors.iter().find(|p| p.name == predictor)
    }

    /// Encode every row of `table`.
    ///
    /// All rows must be complete in the predictor columns; columns not used
    /// by the schema (the response, for example) are ignored.
    pub fn encode(&self, table: &ObservationTable) -> Result<Mat<f64>, SchemaMismatch> {
        let rows: Vec<usize> = (0..table.n_rows()).collect();
        self.encode_rows(table, &rows)
    }

    /// Encode the given rows of `table`, in the given order.
    pub(crate) fn encode_rows(
        &self,
        table: &ObservationTable,
        rows: &[usize],
    ) -> Result<Mat<f64>, SchemaMismatch> {
        let mut x = Mat::zeros(rows.len(), self.n_columns());

        let mut offset = 0;
        if self.intercept {
            for i in 0..rows.len() {
                x[(i, 0)] = 1.0;
            }
            offset = 1;
        }

        for p in &self.predictors {
            let column = table
                .column(&p.name)
                .ok_or_else(|| SchemaMismatch::MissingColumn(p.name.clone()))?;

            let expected = match p.encoding {
                PredictorEncoding::Numeric { .. } => ColumnKind::Numeric,
                PredictorEncoding::Categorical { .. } => ColumnKind::Categorical,
            };
            if column.kind() != expected {
                return Err(SchemaMismatch::KindMismatch {
                    column: p.name.clone(),
                    expected,
                });
            }

            for (i, &row) in rows.iter().enumerate() {
                match (column.value(row), &p.encoding) {
                    (Value::Numeric(v), PredictorEncoding::Numeric { center }) => {
                        x[(i, offset)] = v - center.unwrap_or(0.0);
                    }
                    (Value::Categorical(level), PredictorEncoding::Categorical { reference, levels }) => {
                        if level == reference {
                            continue;
                        }
                        let k = levels.iter().position(|l| l == level).ok_or_else(|| {
                            SchemaMismatch::UnknownLevel {
                                column: p.name.clone(),
                                level: level.to_string(),
                            }
                        })?;
                        x[(i, offset + k)] = 1.0;
                    }
                    _ => {
                        return Err(SchemaMismatch::MissingValue {
                            column: p.name.clone(),
                            row,
                        })
                    }
                }
            }

            offset += p.encoding.n_columns();
        }

        Ok(x)
    }
}
