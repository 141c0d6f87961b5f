//! Residual preparation and residual transforms used by the plots.

use crate::core::{DiagnosticError, DiagnosticResult};
use crate::solvers::Estimator;
use crate::utils::col_mean;
use crate::validation::{validate_array, validate_matching_rows, validate_regressor};
use faer::{Col, Mat};
use statrs::distribution::{ContinuousCDF, Normal};

/// Compute fitted values and residuals of a fitted regressor.
///
/// Validates the model, then `x`, then `y`, stopping at the first failure.
/// The residuals are `y - predict(x)` and always share `y`'s row count; a
/// regressor whose prediction has a different length is rejected as
/// `InvalidModel`.
pub fn prepare<M: Estimator + ?Sized>(
    model: &M,
    x: &Mat<f64>,
    y: &Col<f64>,
) -> DiagnosticResult<(Col<f64>, Col<f64>)> {
    validate_regressor(model)?;
    validate_array(x, "x")?;
    validate_array(y, "y")?;
    validate_matching_rows(x.nrows(), y.nrows())?;

    let fitted = model.predict(x)?;
    if fitted.nrows() != y.nrows() {
        return Err(DiagnosticError::InvalidModel(format!(
            "predict returned {} values for {} observations",
            fitted.nrows(),
            y.nrows()
        )));
    }

    let residuals = Col::from_fn(y.nrows(), |i| y[i] - fitted[i]);
    Ok((fitted, residuals))
}

/// Population standard deviation (divisor n).
pub fn population_std(v: &Col<f64>) -> f64 {
    let n = v.nrows();
    if n == 0 {
        return f64::NAN;
    }
    let mean = col_mean(v);
    (v.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / n as f64).sqrt()
}

/// Compute standardized residuals: e_i / s
///
/// `s` is the population standard deviation of the residuals. When every
/// residual is identical the scale is zero; zero residuals then map to 0 and
/// the rest to NaN.
pub fn standardized_residuals(residuals: &Col<f64>) -> Col<f64> {
    let s = population_std(residuals);
    if !(s > 0.0) || !s.is_finite() {
        return Col::from_fn(residuals.nrows(), |i| {
            if residuals[i].abs() < 1e-14 {
                0.0
            } else {
                f64::NAN
            }
        });
    }

    Col::from_fn(residuals.nrows(), |i| residuals[i] / s)
}

/// √|standardized residual| for each observation (Scale-Location ordinate).
pub fn sqrt_abs_standardized(residuals: &Col<f64>) -> Col<f64> {
    let std = standardized_residuals(residuals);
    Col::from_fn(std.nrows(), |i| std[i].abs().sqrt())
}

/// Normal Q-Q coordinates: (theoretical quantiles, sorted residuals).
///
/// Theoretical quantiles use the plotting positions i / (n + 1), i = 1..=n.
pub fn qq_points(residuals: &Col<f64>) -> (Vec<f64>, Vec<f64>) {
    let n = residuals.nrows();
    let mut sample: Vec<f64> = residuals.iter().copied().collect();
    sample.sort_by(|a, b| a.total_cmp(b));

    let theoretical = match Normal::new(0.0, 1.0) {
        Ok(std_normal) => (1..=n)
            .map(|i| std_normal.inverse_cdf(i as f64 / (n as f64 + 1.0)))
            .collect(),
        Err(_) => vec![f64::NAN; n],
    };

    (theoretical, sample)
}

/// Standardized Q-Q reference line as (slope, intercept): the residuals'
/// population standard deviation and mean.
pub fn qq_reference_line(residuals: &Col<f64>) -> (f64, f64) {
    (population_std(residuals), col_mean(residuals))
}
