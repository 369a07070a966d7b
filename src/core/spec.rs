//! Typed model specification.
//!
//! A [`ModelSpec`] plays the role of a formula such as `y ~ x1 + x2`: it names
//! the response, lists the predictors in order with their kind, and says
//! whether an intercept column is added. Nothing is parsed at runtime.

use crate::core::ColumnKind;
use crate::design::SchemaError;

/// How a predictor enters the design matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictorKind {
    /// One column holding the raw (or centered) value.
    Numeric,
    /// One indicator column per non-reference level.
    Categorical,
}

impl PredictorKind {
    /// The table column kind this predictor requires.
    pub fn column_kind(self) -> ColumnKind {
        match self {
            PredictorKind::Numeric => ColumnKind::Numeric,
            PredictorKind::Categorical => ColumnKind::Categorical,
        }
    }
}

/// One predictor of a [`ModelSpec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictorSpec {
    /// Column name in the observation table.
    pub name: String,
    /// Numeric or categorical encoding.
    pub kind: PredictorKind,
    /// Subtract the sample mean before fitting (numeric predictors only).
    pub centered: bool,
}

/// Response, ordered predictors and intercept flag for a linear model.
///
/// # Example
///
/// ```rust
/// use ols_toolkit::core::ModelSpec;
///
/// // income ~ 1 + I(age - mean(age)) + race
/// let spec = ModelSpec::builder("income")
///     .centered("age")
///     .categorical("race")
///     .build()
///     .unwrap();
///
/// assert_eq!(spec.predictors().len(), 2);
/// assert!(spec.intercept());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSpec {
    response: String,
    predictors: Vec<PredictorSpec>,
    intercept: bool,
}

impl ModelSpec {
    /// Start a specification for the given response column.
    pub fn builder(response: impl Into<String>) -> ModelSpecBuilder {
        ModelSpecBuilder {
            response: response.into(),
            predictors: Vec::new(),
            intercept: true,
        }
    }

    /// Response column name.
    pub fn response(&self) -> &str {
        &self.response
    }

    /// Predictors in design order.
    pub fn predictors(&self) -> &[PredictorSpec] {
        &self.predictors
    }

    /// Whether an intercept column is included.
    pub fn intercept(&self) -> bool {
        self.intercept
    }
}

/// Builder for [`ModelSpec`].
#[derive(Debug, Clone)]
pub struct ModelSpecBuilder {
    response: String,
    predictors: Vec<PredictorSpec>,
    intercept: bool,
}

impl ModelSpecBuilder {
    /// Add a numeric predictor.
    pub fn numeric(self, name: impl Into<String>) -> Self {
        self.predictor(name, PredictorKind::Numeric, false)
    }

    /// Add a numeric predictor that is mean-centered before fitting.
    pub fn centered(self, name: impl Into<String>) -> Self {
        self.predictor(name, PredictorKind::Numeric, true)
    }

    /// Add a categorical predictor.
    pub fn categorical(self, name: impl Into<String>) -> Self {
        self.predictor(name, PredictorKind::Categorical, false)
    }

    /// Add a predictor with explicit kind and centering.
    pub fn predictor(mut self, name: impl Into<String>, kind: PredictorKind, centered: bool) -> Self {
        self.predictors.push(PredictorSpec {
            name: name.into(),
            kind,
            centered,
        });
        self
    }

    /// Set whether to include an intercept column (default: true).
    pub fn with_intercept(mut self, include: bool) -> Self {
        self.intercept = include;
        self
    }

    /// Validate and build the specification.
    pub fn build(self) -> Result<ModelSpec, SchemaError> {
        for (i, p) in self.predictors.iter().enumerate() {
            if p.name == self.response {
                return Err(SchemaError::ResponseAsPredictor(p.name.clone()));
            }
            if self.predictors[..i].iter().any(|q| q.name == p.name) {
                return Err(SchemaError::DuplicatePredictor(p.name.clone()));
            }
            if p.centered && p.kind == PredictorKind::Categorical {
                return Err(SchemaError::CenteredCategorical(p.name.clone()));
            }
        }

        Ok(ModelSpec {
            response: self.response,
            predictors: self.predictors,
            intercept: self.intercept,
        })
    }
}
