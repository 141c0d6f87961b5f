//! Ramsey's RESET test for functional-form misspecification.

use crate::core::{DiagnosticError, DiagnosticResult};
use crate::solvers::{FittedOls, OlsRegressor, Regressor};
use crate::utils::append_columns;
use crate::validation::validate_degrees_of_freedom;
use faer::{Col, Mat};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, FisherSnedecor};

/// Result of the RESET test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResetResult {
    /// F statistic comparing the augmented and the original regression.
    pub f_statistic: f64,
    /// p-value against F(df_num, df_den).
    pub p_value: f64,
    /// Number of power terms that entered the augmented regression.
    pub df_num: usize,
    /// Residual degrees of freedom of the augmented regression.
    pub df_den: usize,
}

/// RESET test: H0 is that the linear specification is adequate.
///
/// Fits `y` on `design` by least squares, adds powers 2..=`power` of the
/// resulting fitted values as regressors and tests their joint significance
/// with an F test. The fitted values are rescaled by their largest magnitude
/// before taking powers; this leaves the column space, and hence the
/// statistic, unchanged.
///
/// # Arguments
/// * `y` - Observed response
/// * `design` - Design matrix (with or without a constant column)
/// * `power` - Highest power to include (at least 2)
pub fn ramsey_reset(y: &Col<f64>, design: &Mat<f64>, power: usize) -> DiagnosticResult<ResetResult> {
    let n = y.nrows();
    if power < 2 {
        return Err(DiagnosticError::UndefinedTest(format!(
            "RESET needs power >= 2, got {power}"
        )));
    }

    let restricted = auxiliary_fit(design, y)?;
    let fitted = restricted.fitted_values();

    let scale = fitted.iter().fold(0.0_f64, |acc, &f| acc.max(f.abs()));
    if !(scale > 0.0) || !scale.is_finite() {
        return Err(DiagnosticError::UndefinedTest(
            "RESET is undefined when every fitted value is zero".to_string(),
        ));
    }

    let powers: Vec<Col<f64>> = (2..=power)
        .map(|p| Col::from_fn(n, |i| (fitted[i] / scale).powi(p as i32)))
        .collect();
    let augmented = append_columns(design, &powers);

    let unrestricted = auxiliary_fit(&augmented, y)?;

    let df_num = unrestricted
        .n_parameters()
        .saturating_sub(restricted.n_parameters());
    if df_num == 0 {
        return Err(DiagnosticError::UndefinedTest(
            "RESET power terms are collinear with the design matrix".to_string(),
        ));
    }
    validate_degrees_of_freedom(n, unrestricted.n_parameters(), "RESET")?;
    let df_den = n - unrestricted.n_parameters();

    let rss_r = restricted.rss();
    let rss_u = unrestricted.rss();
    let f_statistic = if rss_u > 0.0 {
        ((rss_r - rss_u).max(0.0) / df_num as f64) / (rss_u / df_den as f64)
    } else if rss_r > 0.0 {
        f64::INFINITY
    } else {
        return Err(DiagnosticError::UndefinedTest(
            "RESET is undefined when both regressions fit exactly".to_string(),
        ));
    };

    let p_value = if f_statistic.is_infinite() {
        0.0
    } else {
        FisherSnedecor::new(df_num as f64, df_den as f64)
            .map(|d| d.sf(f_statistic))
            .unwrap_or(f64::NAN)
    };

    Ok(ResetResult {
        f_statistic,
        p_value,
        df_num,
        df_den,
    })
}

fn auxiliary_fit(x: &Mat<f64>, y: &Col<f64>) -> DiagnosticResult<FittedOls> {
    OlsRegressor::builder()
        .with_intercept(true)
        .build()
        .fit(x, y)
        .map_err(|e| DiagnosticError::UndefinedTest(format!("RESET auxiliary regression failed: {e}")))
}
