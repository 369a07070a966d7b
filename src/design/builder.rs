//! Design matrix construction from an observation table.

use super::schema::{EncodedPredictor, EncodingSchema, PredictorEncoding, SchemaError};
use crate::core::{
    Column, ColumnKind, ModelSpec, NaAction, NaHandler, NaInfo, ObservationTable, PredictorKind,
    Value,
};
use crate::solvers::RegressionError;
use faer::{Col, Mat};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Numeric design matrix, response and the schema that produced them.
#[derive(Debug, Clone)]
pub struct DesignMatrix {
    /// Encoded predictors, one row per retained observation.
    pub x: Mat<f64>,
    /// Response values of the retained observations.
    pub y: Col<f64>,
    /// Column layout, reused to encode rows for prediction.
    pub schema: EncodingSchema,
    /// Which rows were dropped for missing values, and why.
    pub na_info: NaInfo,
}

impl DesignMatrix {
    /// Number of retained observations.
    pub fn n_rows(&self) -> usize {
        self.x.nrows()
    }

    /// Number of design columns.
    pub fn n_columns(&self) -> usize {
        self.x.ncols()
    }

    /// Design column names.
    pub fn column_names(&self) -> &[String] {
        self.schema.column_names()
    }

    /// Number of rows dropped because of missing values.
    pub fn dropped_rows(&self) -> usize {
        self.na_info.n_removed
    }
}

/// Builds a [`DesignMatrix`] from an [`ObservationTable`] and a [`ModelSpec`].
///
/// # Example
///
/// ```rust
/// use ols_toolkit::core::{ModelSpec, ObservationTable};
/// use ols_toolkit::design::DesignMatrixBuilder;
///
/// let table = ObservationTable::builder()
///     .numeric("y", vec![Some(1.0), Some(2.0), Some(2.5), None])
///     .numeric("x", vec![Some(0.0), Some(1.0), Some(2.0), Some(3.0)])
///     .build()
///     .unwrap();
/// let spec = ModelSpec::builder("y").numeric("x").build().unwrap();
///
/// let design = DesignMatrixBuilder::new(&spec).build(&table).unwrap();
/// assert_eq!(design.n_rows(), 3);
/// assert_eq!(design.dropped_rows(), 1);
/// assert_eq!(design.column_names(), &["(Intercept)", "x"]);
/// ```
#[derive(Debug, Clone)]
pub struct DesignMatrixBuilder<'a> {
    spec: &'a ModelSpec,
    na_action: NaAction,
}

impl<'a> DesignMatrixBuilder<'a> {
    /// Create a builder for the given specification.
    pub fn new(spec: &'a ModelSpec) -> Self {
        Self {
            spec,
            na_action: NaAction::default(),
        }
    }

    /// Set the missing value policy (default: `Omit`).
    pub fn na_action(mut self, action: NaAction) -> Self {
        self.na_action = action;
        self
    }

    /// Encode the table.
    ///
    /// # Errors
    ///
    /// - `Schema` if a column is absent or has the wrong kind
    /// - `MissingValues` if the policy is `Fail` and a row is incomplete
    /// - `InsufficientData` if fewer complete rows remain than columns, or
    ///   none remain at all
    pub fn build(&self, table: &ObservationTable) -> Result<DesignMatrix, RegressionError> {
        let response = self.spec.response();
        let response_col = table
            .column(response)
            .ok_or_else(|| SchemaError::UnknownColumn(response.to_string()))?;
        if response_col.kind() != ColumnKind::Numeric {
            return Err(SchemaError::NonNumericResponse(response.to_string()).into());
        }

        let mut required: Vec<(&str, &Column)> = vec![(response, response_col)];
        for p in self.spec.predictors() {
            let column = table
                .column(&p.name)
                .ok_or_else(|| SchemaError::UnknownColumn(p.name.clone()))?;
            let declared = p.kind.column_kind();
            if column.kind() != declared {
                return Err(SchemaError::KindMismatch {
                    column: p.name.clone(),
                    declared,
                    found: column.kind(),
                }
                .into());
            }
            required.push((p.name.as_str(), column));
        }

        let na_info = NaHandler::scan(&required, table.n_rows(), self.na_action)?;
        if na_info.has_removed() {
            warn!(
                dropped = na_info.n_removed,
                total = na_info.n_original,
                "dropped rows with missing values"
            );
        }

        if !self.spec.intercept() && self.spec.predictors().is_empty() {
            return Err(SchemaError::EmptyModel.into());
        }

        let kept = &na_info.kept_indices;
        let no_rows_left = || RegressionError::InsufficientData {
            needed: 1,
            got: 0,
            dropped: na_info.n_removed,
        };
        if kept.is_empty() {
            return Err(no_rows_left());
        }

        let predictors = required[1..]
            .iter()
            .zip(self.spec.predictors())
            .map(|((name, column), p)| -> Result<EncodedPredictor, RegressionError> {
                let encoding = match p.kind {
                    PredictorKind::Numeric => PredictorEncoding::Numeric {
                        center: p.centered.then(|| column_mean(column, kept)),
                    },
                    PredictorKind::Categorical => {
                        categorical_encoding(column, kept).ok_or_else(no_rows_left)?
                    }
                };
                Ok(EncodedPredictor {
                    name: name.to_string(),
                    encoding,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let schema = EncodingSchema::new(self.spec.intercept(), predictors);
        let n_columns = schema.n_columns();
        if n_columns == 0 {
            return Err(SchemaError::EmptyModel.into());
        }
        if kept.len() < n_columns {
            return Err(RegressionError::InsufficientData {
                needed: n_columns,
                got: kept.len(),
                dropped: na_info.n_removed,
            });
        }

        let x = schema.encode_rows(table, kept)?;
        let y = Col::from_fn(kept.len(), |i| match response_col.value(kept[i]) {
            Value::Numeric(v) => v,
            _ => f64::NAN,
        });

        debug!(
            rows = x.nrows(),
            columns = x.ncols(),
            dropped = na_info.n_removed,
            "built design matrix"
        );

        Ok(DesignMatrix {
            x,
            y,
            schema,
            na_info,
        })
    }
}

/// Mean of a numeric column over the given rows.
fn column_mean(column: &Column, rows: &[usize]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    let sum: f64 = rows
        .iter()
        .map(|&r| match column.value(r) {
            Value::Numeric(v) => v,
            _ => 0.0,
        })
        .sum();
    sum / rows.len() as f64
}

/// Sorted levels of a categorical column over the given rows; the first is
/// the reference level. `None` when no row carries a level.
fn categorical_encoding(column: &Column, rows: &[usize]) -> Option<PredictorEncoding> {
    let levels: BTreeSet<&str> = rows
        .iter()
        .filter_map(|&r| match column.value(r) {
            Value::Categorical(level) => Some(level),
            _ => None,
        })
        .collect();

    let mut levels = levels.into_iter().map(str::to_string);
    let reference = levels.next()?;
    Some(PredictorEncoding::Categorical {
        reference,
        levels: levels.collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorical_levels_sorted() {
        let column = Column::Categorical(
            ["White", "Other", "Black", "Hispanic", "White"]
                .iter()
                .map(|s| Some(s.to_string()))
                .collect(),
        );
        let encoding = categorical_encoding(&column, &[0, 1, 2, 3, 4]);
        assert_eq!(
            encoding,
            Some(PredictorEncoding::Categorical {
                reference: "Black".into(),
                levels: vec!["Hispanic".into(), "Other".into(), "White".into()],
            })
        );
    }

    #[test]
    fn test_no_levels_has_no_reference() {
        let column = Column::Categorical(vec![Some("a".to_string()), None]);
        assert_eq!(categorical_encoding(&column, &[]), None);
        assert_eq!(categorical_encoding(&column, &[1]), None);
    }

    #[test]
    fn test_column_mean_uses_given_rows() {
        let column = Column::Numeric(vec![Some(1.0), Some(100.0), Some(3.0)]);
        assert_eq!(column_mean(&column, &[0, 2]), 2.0);
        assert_eq!(column_mean(&column, &[]), 0.0);
    }
}
