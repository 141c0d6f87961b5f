//! Validation gates run before any statistic is computed.
//!
//! Every function here either returns `Ok(())` (or the validated value) or a
//! [`DiagnosticError`]; none has side effects beyond logging the rejection.

use crate::core::{DiagnosticError, DiagnosticResult};
use crate::solvers::{Estimator, EstimatorKind};
use crate::utils::col_variance;
use faer::{Col, Mat};
use tracing::warn;

/// Smallest sample the Shapiro-Wilk approximation supports.
pub const SHAPIRO_MIN_N: usize = 3;
/// Above this sample size the Shapiro-Wilk p-value may be inaccurate.
pub const SHAPIRO_ACCURATE_MAX_N: usize = 5000;

/// A rectangular numeric array that can be validated.
pub trait NumericArray {
    /// (rows, columns). For ragged input, columns of the first row.
    fn shape(&self) -> (usize, usize);

    /// Value at (row, col). Only called for in-bounds positions.
    fn value(&self, row: usize, col: usize) -> f64;

    /// Whether every row has the same length.
    fn is_rectangular(&self) -> bool {
        true
    }
}

impl NumericArray for Mat<f64> {
    fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    fn value(&self, row: usize, col: usize) -> f64 {
        self[(row, col)]
    }
}

impl NumericArray for Col<f64> {
    fn shape(&self) -> (usize, usize) {
        (self.nrows(), 1)
    }

    fn value(&self, row: usize, _col: usize) -> f64 {
        self[row]
    }
}

impl NumericArray for [f64] {
    fn shape(&self) -> (usize, usize) {
        (self.len(), 1)
    }

    fn value(&self, row: usize, _col: usize) -> f64 {
        self[row]
    }
}

impl NumericArray for Vec<f64> {
    fn shape(&self) -> (usize, usize) {
        (self.len(), 1)
    }

    fn value(&self, row: usize, _col: usize) -> f64 {
        self[row]
    }
}

impl NumericArray for [Vec<f64>] {
    fn shape(&self) -> (usize, usize) {
        (self.len(), self.first().map_or(0, Vec::len))
    }

    fn value(&self, row: usize, col: usize) -> f64 {
        self[row][col]
    }

    fn is_rectangular(&self) -> bool {
        let width = self.first().map_or(0, Vec::len);
        self.iter().all(|row| row.len() == width)
    }
}

/// Check that `model` is a fitted regression estimator.
///
/// Fails with `InvalidModel` when fit or predict is missing or the estimator
/// solves a non-regression task, and with `NotFitted` when no fit has
/// completed.
pub fn validate_regressor<M: Estimator + ?Sized>(model: &M) -> DiagnosticResult<()> {
    let caps = model.capabilities();
    if !(caps.fit && caps.predict) {
        return Err(DiagnosticError::InvalidModel(
            "model must expose both fit and predict".to_string(),
        ));
    }
    match model.kind() {
        EstimatorKind::Regressor => {}
        other => {
            return Err(DiagnosticError::InvalidModel(format!(
                "model must be a regression estimator, got {other:?}"
            )));
        }
    }
    if !model.is_fitted() {
        return Err(DiagnosticError::NotFitted(
            "model must be fitted before diagnostics".to_string(),
        ));
    }
    Ok(())
}

/// Check that `value` is a non-empty, rectangular array of finite numbers.
///
/// The error names the offending argument.
pub fn validate_array<A: NumericArray + ?Sized>(value: &A, name: &str) -> DiagnosticResult<()> {
    if !value.is_rectangular() {
        return Err(DiagnosticError::invalid_array(name, "rows have different lengths"));
    }
    let (rows, cols) = value.shape();
    if rows == 0 || cols == 0 {
        return Err(DiagnosticError::invalid_array(
            name,
            format!("array is empty (shape {rows}x{cols})"),
        ));
    }
    for i in 0..rows {
        for j in 0..cols {
            let v = value.value(i, j);
            if !v.is_finite() {
                return Err(DiagnosticError::invalid_array(
                    name,
                    format!("non-finite value {v} at ({i}, {j})"),
                ));
            }
        }
    }
    Ok(())
}

/// Check that `x` and `y` describe the same observations.
pub fn validate_matching_rows(x_rows: usize, y_rows: usize) -> DiagnosticResult<()> {
    if x_rows != y_rows {
        return Err(DiagnosticError::invalid_array(
            "y",
            format!("x has {x_rows} rows but y has {y_rows}"),
        ));
    }
    Ok(())
}

/// Check that residual variance is not degenerate.
///
/// With zero variance (a perfect fit) heteroscedasticity is undefined: the
/// test would divide by a zero scale. `tolerance` is 0.0 by default, so only
/// exactly zero variance is rejected.
pub fn validate_residual_variance(residuals: &Col<f64>, tolerance: f64) -> DiagnosticResult<()> {
    let variance = col_variance(residuals, 1);
    if variance.is_nan() || variance <= tolerance {
        warn!(variance, tolerance, "residual variance gate rejected the test");
        return Err(DiagnosticError::UndefinedTest(format!(
            "residual variance is {variance}; heteroscedasticity is undefined for a perfect fit"
        )));
    }
    Ok(())
}

/// Check the sample-size and range preconditions of the Shapiro-Wilk test.
///
/// Samples above [`SHAPIRO_ACCURATE_MAX_N`] pass with a warning.
pub fn validate_shapiro_residuals(residuals: &Col<f64>) -> DiagnosticResult<()> {
    let n = residuals.nrows();
    if n < SHAPIRO_MIN_N {
        warn!(n, "Shapiro-Wilk sample too small");
        return Err(DiagnosticError::UndefinedTest(format!(
            "Shapiro-Wilk requires at least {SHAPIRO_MIN_N} residuals, got {n}"
        )));
    }
    if n > SHAPIRO_ACCURATE_MAX_N {
        warn!(
            n,
            max = SHAPIRO_ACCURATE_MAX_N,
            "Shapiro-Wilk p-value may be inaccurate for this sample size"
        );
    }
    let (min, max) = residuals
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &r| {
            (lo.min(r), hi.max(r))
        });
    if max - min <= 0.0 {
        warn!("Shapiro-Wilk residuals are all identical");
        return Err(DiagnosticError::UndefinedTest(
            "Shapiro-Wilk is undefined when all residuals are identical".to_string(),
        ));
    }
    Ok(())
}

/// Check the preconditions of the Durbin-Watson statistic.
pub fn validate_durbin_watson_residuals(residuals: &Col<f64>) -> DiagnosticResult<()> {
    let n = residuals.nrows();
    if n < 2 {
        warn!(n, "Durbin-Watson needs at least two residuals");
        return Err(DiagnosticError::UndefinedTest(format!(
            "Durbin-Watson requires at least 2 residuals, got {n}"
        )));
    }
    let ss: f64 = residuals.iter().map(|&r| r * r).sum();
    if ss == 0.0 {
        warn!("Durbin-Watson residual sum of squares is zero");
        return Err(DiagnosticError::UndefinedTest(
            "Durbin-Watson is undefined when every residual is zero".to_string(),
        ));
    }
    Ok(())
}

/// Check that an auxiliary regression with `n_params` parameters leaves
/// residual degrees of freedom.
pub fn validate_degrees_of_freedom(n_obs: usize, n_params: usize, test: &str) -> DiagnosticResult<()> {
    if n_obs <= n_params {
        warn!(n_obs, n_params, test, "no residual degrees of freedom");
        return Err(DiagnosticError::UndefinedTest(format!(
            "{test} needs more than {n_params} observations, got {n_obs}"
        )));
    }
    Ok(())
}

/// Build a design matrix from row-major input, rejecting ragged or
/// non-finite rows.
pub fn design_from_rows(rows: &[Vec<f64>]) -> DiagnosticResult<Mat<f64>> {
    validate_array(rows, "x")?;
    let (n, p) = rows.shape();
    Ok(Mat::from_fn(n, p, |i, j| rows[i][j]))
}

/// Build a target column from a flat sequence.
pub fn target_from_slice(values: &[f64]) -> DiagnosticResult<Col<f64>> {
    validate_array(values, "y")?;
    Ok(Col::from_fn(values.len(), |i| values[i]))
}

/// Reshape a single-column target matrix into a column vector.
pub fn target_from_matrix(y: &Mat<f64>) -> DiagnosticResult<Col<f64>> {
    validate_array(y, "y")?;
    if y.ncols() != 1 {
        return Err(DiagnosticError::invalid_array(
            "y",
            format!("expected a single target column, got {}", y.ncols()),
        ));
    }
    Ok(Col::from_fn(y.nrows(), |i| y[(i, 0)]))
}
