//! Ordinary Least Squares regression solver.

use crate::core::{
    IntervalType, ModelSpec, NaError, NaInfo, ObservationTable, PredictionResult,
    RegressionOptions, RegressionOptionsBuilder, RegressionResult,
};
use crate::design::{DesignMatrix, DesignMatrixBuilder, EncodingSchema, SchemaMismatch};
use crate::inference::{compute_prediction_intervals, ModelSummary, Predictor};
use crate::solvers::traits::{FittedRegressor, RegressionError, Regressor};
use crate::utils::{
    dependent_columns, find_unit_column, gram_inverse_from_r_inverse, mat_vec,
    upper_triangular_inverse,
};
use faer::{Col, Mat};
use tracing::debug;

/// Ordinary Least Squares regression estimator.
///
/// The design matrix is used as given: an intercept is a column of ones,
/// normally added by the [`DesignMatrixBuilder`]. Coefficients come from a
/// Householder QR factorisation of X (`Rβ = Qᵀy`); `X'X` is never inverted
/// to obtain them. Linearly dependent columns are an error, never NaN
/// coefficients.
///
/// # Example
///
/// ```rust,ignore
/// use ols_toolkit::solvers::{OlsRegressor, Regressor, FittedRegressor};
/// use faer::{Mat, Col};
///
/// // y = 2 + 3x, with the intercept column written out
/// let x = Mat::from_fn(5, 2, |i, j| if j == 0 { 1.0 } else { (i + 1) as f64 });
/// let y = Col::from_fn(5, |i| 2.0 + 3.0 * (i + 1) as f64);
///
/// let fitted = OlsRegressor::builder().build().fit(&x, &y)?;
/// println!("Coefficients: {:?}", fitted.coefficients());
/// ```
#[derive(Debug, Clone, Default)]
pub struct OlsRegressor {
    options: RegressionOptions,
}

impl OlsRegressor {
    /// Create a new OLS regressor with the given options.
    pub fn new(options: RegressionOptions) -> Self {
        Self { options }
    }

    /// Create a builder for configuring the regressor.
    pub fn builder() -> OlsRegressorBuilder {
        OlsRegressorBuilder::default()
    }

    /// Options this regressor fits with.
    pub fn options(&self) -> &RegressionOptions {
        &self.options
    }

    /// Fit a model to a design matrix produced by [`DesignMatrixBuilder`].
    ///
    /// Column names, the intercept flag and the missing-row report are taken
    /// from the design.
    pub fn fit_design(&self, design: &DesignMatrix) -> Result<FittedOls, RegressionError> {
        let mut fitted = self.fit_named(
            &design.x,
            &design.y,
            design.column_names().to_vec(),
            design.schema.intercept(),
            Some(design.na_info.clone()),
        )?;
        fitted.schema = Some(design.schema.clone());
        Ok(fitted)
    }

    /// Build the design matrix for `spec` from `table` and fit it.
    ///
    /// Rows with missing values are handled according to the `na_action`
    /// option. The encoding schema is returned with the fit; the fit also
    /// keeps its own copy (see [`FittedOls::schema`]).
    pub fn fit_table(
        &self,
        table: &ObservationTable,
        spec: &ModelSpec,
    ) -> Result<(FittedOls, EncodingSchema), RegressionError> {
        let design = DesignMatrixBuilder::new(spec)
            .na_action(self.options.na_action)
            .build(table)?;
        let fitted = self.fit_design(&design)?;
        Ok((fitted, design.schema))
    }

    fn fit_named(
        &self,
        x: &Mat<f64>,
        y: &Col<f64>,
        column_names: Vec<String>,
        has_intercept: bool,
        na_info: Option<NaInfo>,
    ) -> Result<FittedOls, RegressionError> {
        self.options.validate()?;

        let n_samples = x.nrows();
        let n_params = x.ncols();
        let dropped = na_info.as_ref().map_or(0, |info| info.n_removed);

        // Validate dimensions
        if n_samples != y.nrows() {
            return Err(RegressionError::DimensionMismatch {
                x_rows: n_samples,
                y_len: y.nrows(),
            });
        }

        if n_params == 0 || n_samples < n_params {
            return Err(RegressionError::InsufficientData {
                needed: n_params.max(1),
                got: n_samples,
                dropped,
            });
        }

        check_finite(x, y, &column_names)?;

        let dependent = dependent_columns(x, self.options.rank_tolerance);
        if !dependent.is_empty() {
            return Err(RegressionError::RankDeficiency {
                rank: n_params - dependent.len(),
                n_columns: n_params,
                dependent_columns: dependent.iter().map(|&j| column_names[j].clone()).collect(),
            });
        }

        let (coefficients, xtx_inverse) = self.solve_with_qr(x, y, &column_names)?;

        // Compute fitted values and residuals
        let fitted_values = mat_vec(x, &coefficients);
        let residuals = Col::from_fn(n_samples, |i| y[i] - fitted_values[i]);

        debug!(
            n = n_samples,
            p = n_params,
            intercept = has_intercept,
            "fitted OLS model"
        );

        Ok(FittedOls {
            options: self.options.clone(),
            schema: None,
            result: RegressionResult {
                coefficients,
                residuals,
                fitted_values,
                column_names,
                has_intercept,
                n_observations: n_samples,
                n_parameters: n_params,
                xtx_inverse,
                na_info,
            },
        })
    }

    /// Solve the least squares problem with a QR decomposition of X.
    ///
    /// Returns the coefficients and `(X'X)⁻¹ = R⁻¹R⁻ᵀ`.
    fn solve_with_qr(
        &self,
        x: &Mat<f64>,
        y: &Col<f64>,
        column_names: &[String],
    ) -> Result<(Col<f64>, Mat<f64>), RegressionError> {
        let n_params = x.ncols();

        let qr = x.qr();
        let q = qr.compute_Q();
        let r = qr.R().to_owned();

        let qty = q.transpose() * y;

        // Back-substitution for upper triangular system R * beta = Q'y
        let mut coefficients = Col::zeros(n_params);
        for i in (0..n_params).rev() {
            let mut sum = qty[i];
            for j in (i + 1)..n_params {
                sum -= r[(i, j)] * coefficients[j];
            }
            coefficients[i] = sum / r[(i, i)];
        }

        let r_inv = upper_triangular_inverse(&r, n_params);
        match r_inv {
            Some(r_inv) if coefficients.iter().all(|c| c.is_finite()) => {
                Ok((coefficients, gram_inverse_from_r_inverse(&r_inv)))
            }
            _ => {
                // Screening passed but the factorisation broke down; name
                // the columns with a negligible pivot.
                let scale = (0..n_params)
                    .map(|i| r[(i, i)].abs())
                    .fold(0.0_f64, f64::max);
                let mut weak: Vec<String> = (0..n_params)
                    .filter(|&i| {
                        let d = r[(i, i)].abs();
                        !d.is_finite() || d <= self.options.rank_tolerance * scale
                    })
                    .map(|i| column_names[i].clone())
                    .collect();
                if weak.is_empty() {
                    weak = column_names.to_vec();
                }
                Err(RegressionError::RankDeficiency {
                    rank: n_params - weak.len(),
                    n_columns: n_params,
                    dependent_columns: weak,
                })
            }
        }
    }
}

/// Reject NaN or infinite inputs before factorising.
fn check_finite(x: &Mat<f64>, y: &Col<f64>, column_names: &[String]) -> Result<(), RegressionError> {
    let mut first: Option<(usize, String)> = None;
    let mut n_rows = 0;

    for i in 0..x.nrows() {
        let bad_column = if !y[i].is_finite() {
            Some("y".to_string())
        } else {
            (0..x.ncols())
                .find(|&j| !x[(i, j)].is_finite())
                .map(|j| column_names[j].clone())
        };
        if let Some(column) = bad_column {
            n_rows += 1;
            first.get_or_insert((i, column));
        }
    }

    match first {
        None => Ok(()),
        Some((first_row, column)) => Err(NaError::MissingValues {
            n_rows,
            first_row,
            column,
        }
        .into()),
    }
}

impl Regressor for OlsRegressor {
    type Fitted = FittedOls;

    fn fit(&self, x: &Mat<f64>, y: &Col<f64>) -> Result<Self::Fitted, RegressionError> {
        let intercept_col = find_unit_column(x);
        let column_names = (0..x.ncols())
            .map(|j| {
                if Some(j) == intercept_col {
                    crate::design::INTERCEPT.to_string()
                } else {
                    format!("x{j}")
                }
            })
            .collect();

        self.fit_named(x, y, column_names, intercept_col.is_some(), None)
    }
}

/// A fitted OLS regression model.
#[derive(Debug, Clone)]
pub struct FittedOls {
    options: RegressionOptions,
    schema: Option<EncodingSchema>,
    result: RegressionResult,
}

impl FittedOls {
    /// Get the options used to fit this model.
    pub fn options(&self) -> &RegressionOptions {
        &self.options
    }

    /// Summary statistics (R², F, AIC/BIC, coefficient inference).
    pub fn summary(&self) -> Result<ModelSummary, RegressionError> {
        ModelSummary::from_fit(self)
    }

    /// The encoding schema of the design this model was fit to.
    ///
    /// `None` for models fit to a raw matrix with [`Regressor::fit`].
    pub fn schema(&self) -> Option<&EncodingSchema> {
        self.schema.as_ref()
    }

    /// A [`Predictor`] over the schema recorded at fit time.
    pub fn table_predictor(&self) -> Option<Predictor<'_>> {
        self.schema.as_ref().map(|schema| Predictor::from_fit(self, schema))
    }

    /// Pair the model with the schema its design matrix was built with.
    ///
    /// Fails with `SchemaMismatch` unless `schema` encodes exactly as the
    /// recorded one.
    pub fn predictor<'a>(
        &'a self,
        schema: &'a EncodingSchema,
    ) -> Result<Predictor<'a>, RegressionError> {
        Predictor::new(self, schema)
    }
}

impl FittedRegressor for FittedOls {
    fn predict(&self, x: &Mat<f64>) -> Result<Col<f64>, RegressionError> {
        let expected = self.result.n_parameters;
        if x.ncols() != expected {
            return Err(SchemaMismatch::ColumnCount {
                expected,
                got: x.ncols(),
            }
            .into());
        }
        Ok(mat_vec(x, &self.result.coefficients))
    }

    fn result(&self) -> &RegressionResult {
        &self.result
    }

    fn predict_with_interval(
        &self,
        x: &Mat<f64>,
        interval: Option<IntervalType>,
        level: f64,
    ) -> Result<PredictionResult, RegressionError> {
        let predictions = self.predict(x)?;

        match interval {
            None => Ok(PredictionResult::point_only(predictions)),
            Some(interval_type) => compute_prediction_intervals(
                x,
                &self.result,
                predictions,
                level,
                interval_type,
            ),
        }
    }
}

/// Builder for `OlsRegressor`.
#[derive(Debug, Clone, Default)]
pub struct OlsRegressorBuilder {
    builder: RegressionOptionsBuilder,
}

impl OlsRegressorBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the confidence level for coefficient confidence intervals.
    pub fn confidence_level(mut self, level: f64) -> Self {
        self.builder = self.builder.confidence_level(level);
        self
    }

    /// Set the relative tolerance for linear dependence screening.
    pub fn rank_tolerance(mut self, tol: f64) -> Self {
        self.builder = self.builder.rank_tolerance(tol);
        self
    }

    /// Set the missing value policy used by [`OlsRegressor::fit_table`].
    pub fn na_action(mut self, action: crate::core::NaAction) -> Self {
        self.builder = self.builder.na_action(action);
        self
    }

    /// Build the OLS regressor.
    pub fn build(self) -> OlsRegressor {
        // Options are validated at fit time
        OlsRegressor::new(self.builder.build_unchecked())
    }
}
