//! Regression options and configuration.

use super::na_action::NaAction;
use thiserror::Error;

/// Configuration options for OLS fitting.
#[derive(Debug, Clone)]
pub struct RegressionOptions {
    /// Confidence level for coefficient intervals (default: 0.95).
    pub confidence_level: f64,
    /// Relative tolerance for linear dependence screening (default: 1e-7,
    /// the tolerance R's `lm` uses).
    pub rank_tolerance: f64,
    /// Policy for rows with missing values (default: `Omit`).
    pub na_action: NaAction,
}

impl Default for RegressionOptions {
    fn default() -> Self {
        Self {
            confidence_level: 0.95,
            rank_tolerance: 1e-7,
            na_action: NaAction::Omit,
        }
    }
}

/// Errors that can occur when validating regression options.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptionsError {
    #[error("confidence_level must be in (0, 1), got {0}")]
    InvalidConfidenceLevel(f64),
    #[error("rank_tolerance must be in (0, 1), got {0}")]
    InvalidRankTolerance(f64),
}

impl RegressionOptions {
    /// Create a new builder for regression options.
    pub fn builder() -> RegressionOptionsBuilder {
        RegressionOptionsBuilder::default()
    }

    /// Validate the options and return an error if invalid.
    pub fn validate(&self) -> Result<(), OptionsError> {
        validate_confidence_level(self.confidence_level)?;
        if !(self.rank_tolerance > 0.0 && self.rank_tolerance < 1.0) {
            return Err(OptionsError::InvalidRankTolerance(self.rank_tolerance));
        }
        Ok(())
    }
}

/// Check that a confidence level lies strictly between 0 and 1.
pub fn validate_confidence_level(level: f64) -> Result<(), OptionsError> {
    if level > 0.0 && level < 1.0 {
        Ok(())
    } else {
        Err(OptionsError::InvalidConfidenceLevel(level))
    }
}

/// Builder for `RegressionOptions`.
#[derive(Debug, Clone, Default)]
pub struct RegressionOptionsBuilder {
    options: RegressionOptions,
}

impl RegressionOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the confidence level for confidence intervals.
    pub fn confidence_level(mut self, level: f64) -> Self {
        self.options.confidence_level = level;
        self
    }

    /// Set the relative tolerance used to detect dependent columns.
    pub fn rank_tolerance(mut self, tol: f64) -> Self {
        self.options.rank_tolerance = tol;
        self
    }

    /// Set the missing value policy.
    pub fn na_action(mut self, action: NaAction) -> Self {
        self.options.na_action = action;
        self
    }

    /// Build the options, validating them first.
    pub fn build(self) -> Result<RegressionOptions, OptionsError> {
        self.options.validate()?;
        Ok(self.options)
    }

    /// Build without validation; the fitter validates before use.
    pub fn build_unchecked(self) -> RegressionOptions {
        self.options
    }
}
