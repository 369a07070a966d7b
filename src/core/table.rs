//! In-memory observation table.
//!
//! An [`ObservationTable`] is an ordered set of named, equally long columns.
//! Each column is declared either numeric or categorical and stores missing
//! values explicitly, so the design builder can report exactly which rows it
//! had to drop.

use crate::design::SchemaError;

/// Declared type of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Real-valued column.
    Numeric,
    /// Column of string-labelled levels.
    Categorical,
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::Categorical => write!(f, "categorical"),
        }
    }
}

/// Column storage. `None` marks a missing value; a NaN in a numeric column
/// is treated as missing as well.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Numeric(Vec<Option<f64>>),
    Categorical(Vec<Option<String>>),
}

impl Column {
    /// Number of entries in the column.
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(values) => values.len(),
            Column::Categorical(values) => values.len(),
        }
    }

    /// Returns true if the column has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Declared kind of the column.
    pub fn kind(&self) -> ColumnKind {
        match self {
            Column::Numeric(_) => ColumnKind::Numeric,
            Column::Categorical(_) => ColumnKind::Categorical,
        }
    }

    /// Value at `row`, with missing entries reported as [`Value::Missing`].
    pub fn value(&self, row: usize) -> Value<'_> {
        match self {
            Column::Numeric(values) => match values.get(row).copied().flatten() {
                Some(v) if !v.is_nan() => Value::Numeric(v),
                _ => Value::Missing,
            },
            Column::Categorical(values) => match values.get(row) {
                Some(Some(level)) => Value::Categorical(level.as_str()),
                _ => Value::Missing,
            },
        }
    }

    /// Whether the entry at `row` is missing.
    pub fn is_missing(&self, row: usize) -> bool {
        matches!(self.value(row), Value::Missing)
    }
}

/// A single cell of the table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Numeric(f64),
    Categorical(&'a str),
    Missing,
}

/// Ordered collection of named columns of equal length.
///
/// # Example
///
/// ```rust
/// use ols_toolkit::core::ObservationTable;
///
/// let table = ObservationTable::builder()
///     .numeric("income", vec![Some(41.0), Some(38.5), None])
///     .categorical("race", vec![Some("White"), Some("Black"), Some("Other")])
///     .build()
///     .unwrap();
///
/// assert_eq!(table.n_rows(), 3);
/// assert_eq!(table.column_names(), &["income", "race"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationTable {
    names: Vec<String>,
    columns: Vec<Column>,
    n_rows: usize,
}

impl ObservationTable {
    /// Create a builder for a new table.
    pub fn builder() -> ObservationTableBuilder {
        ObservationTableBuilder::default()
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column names in declaration order.
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| &self.columns[idx])
    }

    /// Declared kind of the named column.
    pub fn kind_of(&self, name: &str) -> Option<ColumnKind> {
        self.column(name).map(Column::kind)
    }

    /// Borrow row `index`, or `None` if out of range.
    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        (index < self.n_rows).then_some(Row { table: self, index })
    }

    /// Iterate over all rows in order.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        (0..self.n_rows).map(move |index| Row { table: self, index })
    }
}

/// Borrowed view of one table row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a ObservationTable,
    index: usize,
}

impl<'a> Row<'a> {
    /// Position of the row in the table.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Value of the named column in this row, or `None` if the column does
    /// not exist.
    pub fn get(&self, name: &str) -> Option<Value<'a>> {
        self.table.column(name).map(|c| c.value(self.index))
    }

    /// Iterate `(column name, value)` pairs in column order.
    pub fn values(&self) -> impl Iterator<Item = (&'a str, Value<'a>)> + 'a {
        let table = self.table;
        let index = self.index;
        table
            .names
            .iter()
            .zip(table.columns.iter())
            .map(move |(name, col)| (name.as_str(), col.value(index)))
    }
}

/// Builder for [`ObservationTable`].
#[derive(Debug, Clone, Default)]
pub struct ObservationTableBuilder {
    names: Vec<String>,
    columns: Vec<Column>,
}

impl ObservationTableBuilder {
    /// Add a numeric column.
    pub fn numeric(mut self, name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        self.names.push(name.into());
        self.columns.push(Column::Numeric(values));
        self
    }

    /// Add a numeric column with no missing values.
    pub fn numeric_complete(self, name: impl Into<String>, values: &[f64]) -> Self {
        self.numeric(name, values.iter().map(|&v| Some(v)).collect())
    }

    /// Add a categorical column.
    pub fn categorical<S: Into<String>>(
        mut self,
        name: impl Into<String>,
        values: Vec<Option<S>>,
    ) -> Self {
        self.names.push(name.into());
        self.columns.push(Column::Categorical(
            values.into_iter().map(|v| v.map(Into::into)).collect(),
        ));
        self
    }

    /// Validate column names and lengths and build the table.
    pub fn build(self) -> Result<ObservationTable, SchemaError> {
        for (i, name) in self.names.iter().enumerate() {
            if self.names[..i].contains(name) {
                return Err(SchemaError::DuplicateColumn(name.clone()));
            }
        }

        let n_rows = self.columns.first().map_or(0, Column::len);
        for (name, column) in self.names.iter().zip(self.columns.iter()) {
            if column.len() != n_rows {
                return Err(SchemaError::LengthMismatch {
                    column: name.clone(),
                    expected: n_rows,
                    got: column.len(),
                });
            }
        }

        Ok(ObservationTable {
            names: self.names,
            columns: self.columns,
            n_rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ObservationTable {
        ObservationTable::builder()
            .numeric("x", vec![Some(1.0), None, Some(f64::NAN)])
            .categorical("g", vec![Some("a"), Some("b"), None])
            .build()
            .expect("valid table")
    }

    #[test]
    fn test_missing_values_are_explicit() {
        let table = sample();
        let x = table.column("x").unwrap();
        assert_eq!(x.value(0), Value::Numeric(1.0));
        assert!(x.is_missing(1));
        // NaN counts as missing
        assert!(x.is_missing(2));
        assert!(table.column("g").unwrap().is_missing(2));
    }

    #[test]
    fn test_row_iteration() {
        let table = sample();
        let row = table.row(1).unwrap();
        assert_eq!(row.get("g"), Some(Value::Categorical("b")));
        assert_eq!(row.get("nope"), None);

        let values: Vec<_> = row.values().collect();
        assert_eq!(values, vec![("x", Value::Missing), ("g", Value::Categorical("b"))]);
        assert_eq!(table.rows().count(), 3);
        assert!(table.row(3).is_none());
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let err = ObservationTable::builder()
            .numeric_complete("x", &[1.0, 2.0])
            .numeric_complete("y", &[1.0])
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::LengthMismatch { .. }));
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let err = ObservationTable::builder()
            .numeric_complete("x", &[1.0])
            .numeric_complete("x", &[2.0])
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateColumn(name) if name == "x"));
    }
}
