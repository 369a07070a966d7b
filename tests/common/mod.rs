//! Common test utilities and data generators.

#![allow(dead_code)]

use faer::{Col, Mat};
use ols_toolkit::core::ObservationTable;
use ols_toolkit::synthetic::{GeneratingParams, NoiseModel, SyntheticGenerator};

/// Prepend a column of ones to `x`.
pub fn with_intercept(x: &Mat<f64>) -> Mat<f64> {
    Mat::from_fn(x.nrows(), x.ncols() + 1, |i, j| {
        if j == 0 {
            1.0
        } else {
            x[(i, j - 1)]
        }
    })
}

/// Design [1, x] for x = 1..=n.
pub fn simple_design(n: usize) -> Mat<f64> {
    Mat::from_fn(n, 2, |i, j| if j == 0 { 1.0 } else { (i + 1) as f64 })
}

/// The textbook example x = 1..5, y = [2, 4, 5, 4, 5]: intercept 2.2,
/// slope 0.6, SSE 2.4, SST 6.
pub fn textbook_data() -> (Mat<f64>, Col<f64>) {
    let y = [2.0, 4.0, 5.0, 4.0, 5.0];
    (simple_design(5), Col::from_fn(5, |i| y[i]))
}

/// y = 10 + 2x + fixed noise on x = 1..30.
pub fn noisy_line() -> (Mat<f64>, Col<f64>) {
    let noise: [f64; 30] = [
        -1.2, 0.8, -0.5, 1.5, -0.3, 0.9, -1.1, 0.4, -0.7, 1.2, -0.6, 0.3, -1.0, 0.7, -0.4, 1.1,
        -0.8, 0.5, -0.9, 0.6, -0.2, 1.3, -0.5, 0.8, -1.4, 0.2, -0.6, 1.0, -0.3, 0.9,
    ];
    let x = simple_design(30);
    let y = Col::from_fn(30, |i| 10.0 + 2.0 * (i + 1) as f64 + noise[i]);
    (x, y)
}

/// Three smooth, linearly independent predictors with an intercept.
pub fn multiple_design(n: usize) -> Mat<f64> {
    Mat::from_fn(n, 4, |i, j| {
        let t = i as f64;
        match j {
            0 => 1.0,
            1 => t * 0.1,
            2 => (t * 0.15).sin(),
            _ => (t * 0.05).powi(2),
        }
    })
}

/// Seeded sample of y = intercept + slope·x + N(0, sd²).
pub fn synthetic_line(n: usize, intercept: f64, slope: f64, sd: f64, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let data = SyntheticGenerator::new(GeneratingParams {
        n,
        intercept,
        slope,
        noise: NoiseModel::Constant { sd },
        x_range: (0.0, 10.0),
        seed,
    })
    .generate()
    .expect("valid parameters");
    (data.x, data.y)
}

/// Income by age and group, complete rows only.
pub fn survey_table() -> ObservationTable {
    let age = [23.0, 35.0, 41.0, 29.0, 52.0, 47.0, 33.0, 38.0, 61.0, 27.0, 44.0, 56.0];
    let income = [31.2, 44.8, 52.1, 38.0, 60.3, 58.9, 40.2, 47.5, 69.0, 33.8, 55.1, 66.4];
    let group = [
        "White", "Black", "Hispanic", "Other", "White", "Hispanic", "Black", "Other", "Hispanic",
        "White", "Black", "Other",
    ];

    ObservationTable::builder()
        .numeric_complete("income", &income)
        .numeric_complete("age", &age)
        .categorical("group", group.iter().map(|g| Some(*g)).collect())
        .build()
        .expect("well-formed table")
}
