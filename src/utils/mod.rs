//! Numerical helpers shared by the solvers, inference and diagnostics.

mod matrix;

pub use matrix::{
    dependent_columns, find_unit_column, gram_inverse_from_r_inverse, mat_vec, mean,
    row_quadratic_form, upper_triangular_inverse,
};
