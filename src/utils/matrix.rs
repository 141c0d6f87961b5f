//! Matrix utility functions.

use faer::{Col, Mat};

/// Detect columns that are constant (zero variance).
pub fn detect_constant_columns(x: &Mat<f64>, tolerance: f64) -> Vec<bool> {
    let n_cols = x.ncols();
    let n_rows = x.nrows();

    if n_rows == 0 {
        return vec![true; n_cols];
    }

    (0..n_cols)
        .map(|j| {
            let first = x[(0, j)];
            (1..n_rows).all(|i| (x[(i, j)] - first).abs() < tolerance)
        })
        .collect()
}

/// Center a matrix by subtracting column means.
pub fn center_columns(x: &Mat<f64>) -> (Mat<f64>, Col<f64>) {
    let n_rows = x.nrows();
    let n_cols = x.ncols();

    let means = Col::from_fn(n_cols, |j| {
        (0..n_rows).map(|i| x[(i, j)]).sum::<f64>() / n_rows as f64
    });
    let centered = Mat::from_fn(n_rows, n_cols, |i, j| x[(i, j)] - means[j]);

    (centered, means)
}

/// Center a vector by subtracting the mean.
pub fn center_vector(y: &Col<f64>) -> (Col<f64>, f64) {
    let mean = col_mean(y);
    let centered = Col::from_fn(y.nrows(), |i| y[i] - mean);

    (centered, mean)
}

/// Arithmetic mean of a column (NaN when empty).
pub fn col_mean(v: &Col<f64>) -> f64 {
    v.iter().sum::<f64>() / v.nrows() as f64
}

/// Variance with `ddof` delta degrees of freedom (NaN when `n <= ddof`).
pub fn col_variance(v: &Col<f64>, ddof: usize) -> f64 {
    let n = v.nrows();
    if n <= ddof {
        return f64::NAN;
    }
    let mean = col_mean(v);
    let ss: f64 = v.iter().map(|&x| (x - mean).powi(2)).sum();
    ss / (n - ddof) as f64
}

/// Prepend a column of ones unless `x` already has a constant, non-zero column.
///
/// Returns the augmented matrix and whether a column was added.
pub fn add_constant(x: &Mat<f64>) -> (Mat<f64>, bool) {
    let has_constant = x.nrows() > 0
        && (0..x.ncols()).any(|j| {
            let first = x[(0, j)];
            first != 0.0 && (1..x.nrows()).all(|i| x[(i, j)] == first)
        });

    if has_constant {
        return (x.clone(), false);
    }

    let augmented = Mat::from_fn(x.nrows(), x.ncols() + 1, |i, j| {
        if j == 0 {
            1.0
        } else {
            x[(i, j - 1)]
        }
    });
    (augmented, true)
}

/// Append extra columns to the right of `x`.
pub fn append_columns(x: &Mat<f64>, extra: &[Col<f64>]) -> Mat<f64> {
    let p = x.ncols();
    Mat::from_fn(x.nrows(), p + extra.len(), |i, j| {
        if j < p {
            x[(i, j)]
        } else {
            extra[j - p][i]
        }
    })
}
