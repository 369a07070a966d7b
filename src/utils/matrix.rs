//! Matrix utility functions.

use faer::{Col, Mat};

/// Index of the first column whose entries are all exactly 1.0.
pub fn find_unit_column(x: &Mat<f64>) -> Option<usize> {
    if x.nrows() == 0 {
        return None;
    }
    (0..x.ncols()).find(|&j| (0..x.nrows()).all(|i| x[(i, j)] == 1.0))
}

/// Columns that are linear combinations of the columns before them.
///
/// Columns are scanned left to right against the span of the independent
/// columns seen so far (modified Gram-Schmidt, orthogonalised twice). A
/// column is dependent when the norm of its remainder is at most
/// `tolerance` times its own norm; an all-zero column is always dependent.
pub fn dependent_columns(x: &Mat<f64>, tolerance: f64) -> Vec<usize> {
    let n = x.nrows();
    let mut basis: Vec<Vec<f64>> = Vec::new();
    let mut dependent = Vec::new();

    for j in 0..x.ncols() {
        let mut v: Vec<f64> = (0..n).map(|i| x[(i, j)]).collect();
        let norm = dot(&v, &v).sqrt();

        for _ in 0..2 {
            for q in &basis {
                let proj = dot(q, &v);
                for (vi, qi) in v.iter_mut().zip(q) {
                    *vi -= proj * qi;
                }
            }
        }

        let remainder = dot(&v, &v).sqrt();
        if norm == 0.0 || !remainder.is_finite() || remainder <= tolerance * norm {
            dependent.push(j);
        } else {
            v.iter_mut().for_each(|vi| *vi /= remainder);
            basis.push(v);
        }
    }

    dependent
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Inverse of the leading `p × p` upper triangular block of `r`.
///
/// Returns `None` if a diagonal entry is zero or the result is not finite.
pub fn upper_triangular_inverse(r: &Mat<f64>, p: usize) -> Option<Mat<f64>> {
    let mut inv = Mat::zeros(p, p);

    // Solve R * X = I column by column via back-substitution
    for col in 0..p {
        for i in (0..=col).rev() {
            let mut sum = if i == col { 1.0 } else { 0.0 };
            for j in (i + 1)..=col {
                sum -= r[(i, j)] * inv[(j, col)];
            }
            let d = r[(i, i)];
            if d == 0.0 {
                return None;
            }
            inv[(i, col)] = sum / d;
        }
    }

    let finite = (0..p).all(|i| (0..p).all(|j| inv[(i, j)].is_finite()));
    finite.then_some(inv)
}

/// `R⁻¹ R⁻ᵀ`, which equals `(X'X)⁻¹` when `X = QR`.
pub fn gram_inverse_from_r_inverse(r_inv: &Mat<f64>) -> Mat<f64> {
    let p = r_inv.nrows();
    Mat::from_fn(p, p, |i, j| {
        // R⁻¹ is upper triangular, so only k >= max(i, j) contributes
        (i.max(j)..p).map(|k| r_inv[(i, k)] * r_inv[(j, k)]).sum()
    })
}

/// Quadratic form `xᵀ M x` for row `row` of `x`.
pub fn row_quadratic_form(x: &Mat<f64>, row: usize, m: &Mat<f64>) -> f64 {
    let p = m.nrows();
    let mut total = 0.0;
    for j in 0..p {
        let xj = x[(row, j)];
        if xj == 0.0 {
            continue;
        }
        let mut inner = 0.0;
        for k in 0..p {
            inner += m[(j, k)] * x[(row, k)];
        }
        total += xj * inner;
    }
    total
}

/// Matrix-vector product `X b`.
pub fn mat_vec(x: &Mat<f64>, b: &Col<f64>) -> Col<f64> {
    Col::from_fn(x.nrows(), |i| (0..x.ncols()).map(|j| x[(i, j)] * b[j]).sum())
}

/// Arithmetic mean of a vector.
pub fn mean(v: &Col<f64>) -> f64 {
    v.iter().sum::<f64>() / v.nrows() as f64
}
