//! Missing value handling for regression analysis.
//!
//! Rows with a missing response or predictor are never dropped silently: the
//! scan records how many rows were removed, which ones, and the first column
//! that was missing in each. Three R-style policies are supported:
//! - `Omit`: remove incomplete rows, outputs are shorter than the input
//! - `Exclude`: remove incomplete rows, outputs can be padded back with NaN
//! - `Fail`: return an error if any row is incomplete
//!
//! # Example
//!
//! ```
//! use ols_toolkit::core::{NaAction, NaHandler, ObservationTable};
//!
//! let table = ObservationTable::builder()
//!     .numeric("x", vec![Some(1.0), None, Some(3.0)])
//!     .numeric("y", vec![Some(2.0), Some(4.0), Some(f64::NAN)])
//!     .build()
//!     .unwrap();
//!
//! let columns = [("x", table.column("x").unwrap()), ("y", table.column("y").unwrap())];
//! let info = NaHandler::scan(&columns, table.n_rows(), NaAction::Omit).unwrap();
//! assert_eq!(info.n_removed, 2);
//! assert_eq!(info.kept_indices, vec![0]);
//! ```

use crate::core::Column;
use faer::Col;
use thiserror::Error;

/// Action to take when missing values are encountered.
///
/// Mirrors R's `na.action` parameter in `lm()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NaAction {
    /// Remove rows containing missing values. Residuals and fitted values
    /// cover only the retained rows.
    ///
    /// Equivalent to R's `na.omit`.
    #[default]
    Omit,

    /// Remove rows containing missing values, but allow residuals and
    /// fitted values to be padded with NaN at the original positions.
    ///
    /// Equivalent to R's `na.exclude`.
    Exclude,

    /// Return an error if any missing values are present.
    ///
    /// Equivalent to R's `na.fail`.
    Fail,
}

/// Error when missing values are encountered with `NaAction::Fail`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NaError {
    #[error("missing values found (na.fail): {n_rows} rows incomplete, first at row {first_row} in column '{column}'")]
    MissingValues {
        n_rows: usize,
        first_row: usize,
        column: String,
    },
}

/// A row removed because of a missing value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRow {
    /// Index of the row in the original table.
    pub row: usize,
    /// First required column that was missing in this row.
    pub column: String,
}

/// Information about missing value handling applied to data.
#[derive(Debug, Clone, PartialEq)]
pub struct NaInfo {
    /// Original number of observations before removal.
    pub n_original: usize,

    /// Number of observations after removal.
    pub n_clean: usize,

    /// Mask indicating which rows had missing values (true = dropped).
    pub na_mask: Vec<bool>,

    /// Indices of rows that were kept.
    pub kept_indices: Vec<usize>,

    /// Number of rows removed.
    pub n_removed: usize,

    /// Dropped rows with the reason each was dropped.
    pub dropped: Vec<DroppedRow>,

    /// The action that was applied.
    pub action: NaAction,
}

impl NaInfo {
    /// Check if any rows were removed.
    pub fn has_removed(&self) -> bool {
        self.n_removed > 0
    }

    /// Check if this info requires expansion (i.e., was created with `Exclude`).
    pub fn needs_expansion(&self) -> bool {
        self.action == NaAction::Exclude && self.n_removed > 0
    }

    /// Expand a vector to original length, inserting NaN at removed positions.
    ///
    /// Used with `NaAction::Exclude` to pad residuals/fitted values.
    pub fn expand(&self, clean_values: &Col<f64>) -> Col<f64> {
        if !self.needs_expansion() {
            return clean_values.clone();
        }

        let mut expanded = Col::zeros(self.n_original);
        let mut clean_idx = 0;

        for (orig_idx, &had_na) in self.na_mask.iter().enumerate() {
            if had_na {
                expanded[orig_idx] = f64::NAN;
            } else {
                expanded[orig_idx] = clean_values[clean_idx];
                clean_idx += 1;
            }
        }

        expanded
    }

    /// Create NaInfo for data with no missing values.
    pub fn no_na(n_observations: usize, action: NaAction) -> Self {
        Self {
            n_original: n_observations,
            n_clean: n_observations,
            na_mask: vec![false; n_observations],
            kept_indices: (0..n_observations).collect(),
            n_removed: 0,
            dropped: Vec::new(),
            action,
        }
    }
}

/// Handler for missing value processing.
pub struct NaHandler;

impl NaHandler {
    /// Scan the required columns and decide which rows to keep.
    ///
    /// # Arguments
    ///
    /// * `columns` - Required columns (response and predictors) with names
    /// * `n_rows` - Number of rows in the table
    /// * `action` - How to handle missing values
    ///
    /// # Errors
    ///
    /// `NaError::MissingValues` if `action` is `Fail` and any row is incomplete.
    pub fn scan(
        columns: &[(&str, &Column)],
        n_rows: usize,
        action: NaAction,
    ) -> Result<NaInfo, NaError> {
        let mut na_mask = vec![false; n_rows];
        let mut dropped = Vec::new();

        for (row, masked) in na_mask.iter_mut().enumerate() {
            if let Some((name, _)) = columns.iter().find(|(_, col)| col.is_missing(row)) {
                *masked = true;
                dropped.push(DroppedRow {
                    row,
                    column: (*name).to_string(),
                });
            }
        }

        if action == NaAction::Fail {
            if let Some(first) = dropped.first() {
                return Err(NaError::MissingValues {
                    n_rows: dropped.len(),
                    first_row: first.row,
                    column: first.column.clone(),
                });
            }
        }

        let kept_indices: Vec<usize> = na_mask
            .iter()
            .enumerate()
            .filter_map(|(i, &had_na)| if !had_na { Some(i) } else { None })
            .collect();

        Ok(NaInfo {
            n_original: n_rows,
            n_clean: kept_indices.len(),
            n_removed: dropped.len(),
            na_mask,
            kept_indices,
            dropped,
            action,
        })
    }
}
