//! Breusch-Pagan test for heteroscedasticity.

use crate::core::{DiagnosticError, DiagnosticResult};
use crate::solvers::{OlsRegressor, Regressor};
use crate::utils::col_mean;
use crate::validation::validate_degrees_of_freedom;
use faer::{Col, Mat};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor};

/// Result of the Breusch-Pagan test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreuschPaganResult {
    /// Lagrange multiplier statistic.
    pub lm: f64,
    /// p-value of the LM statistic against χ²(df).
    pub lm_p_value: f64,
    /// F statistic of the auxiliary regression.
    pub f_statistic: f64,
    /// p-value of the F statistic.
    pub f_p_value: f64,
    /// Degrees of freedom: number of non-constant regressors.
    pub df: usize,
    /// Residual degrees of freedom of the auxiliary regression.
    pub df_resid: usize,
}

/// Breusch-Pagan test: H0 is that residual variance does not depend on `exog`.
///
/// Regresses the squared residuals on `exog` (which should contain a constant
/// column; it is absorbed by the auxiliary intercept either way).
///
/// - `robust = true`: Koenker's studentized statistic LM = n·R².
/// - `robust = false`: the original statistic LM = ESS/2 computed on the
///   squared residuals scaled by their mean.
///
/// Callers must first reject zero residual variance; see
/// [`validate_residual_variance`](crate::validation::validate_residual_variance).
pub fn breusch_pagan(
    residuals: &Col<f64>,
    exog: &Mat<f64>,
    robust: bool,
) -> DiagnosticResult<BreuschPaganResult> {
    let n = residuals.nrows();

    let squared = Col::from_fn(n, |i| residuals[i] * residuals[i]);
    let response = if robust {
        squared
    } else {
        let mean = col_mean(&squared);
        Col::from_fn(n, |i| squared[i] / mean)
    };

    let aux = OlsRegressor::builder()
        .with_intercept(true)
        .build()
        .fit(exog, &response)
        .map_err(|e| {
            DiagnosticError::UndefinedTest(format!("Breusch-Pagan auxiliary regression failed: {e}"))
        })?;

    let df = aux.n_parameters() - 1;
    if df == 0 {
        return Err(DiagnosticError::UndefinedTest(
            "Breusch-Pagan needs at least one non-constant regressor".to_string(),
        ));
    }
    validate_degrees_of_freedom(n, aux.n_parameters(), "Breusch-Pagan")?;
    let df_resid = n - aux.n_parameters();

    // Constant squared residuals carry no variance signal at all.
    if aux.tss() <= 0.0 {
        return Ok(BreuschPaganResult {
            lm: 0.0,
            lm_p_value: 1.0,
            f_statistic: 0.0,
            f_p_value: 1.0,
            df,
            df_resid,
        });
    }

    let lm = if robust {
        n as f64 * aux.r_squared()
    } else {
        aux.ess() / 2.0
    };
    let lm_p_value = ChiSquared::new(df as f64)
        .map(|d| d.sf(lm))
        .unwrap_or(f64::NAN);

    let mse = aux.rss() / df_resid as f64;
    let f_statistic = if mse > 0.0 {
        (aux.ess() / df as f64) / mse
    } else {
        f64::NAN
    };
    let f_p_value = if f_statistic.is_finite() {
        FisherSnedecor::new(df as f64, df_resid as f64)
            .map(|d| d.sf(f_statistic))
            .unwrap_or(f64::NAN)
    } else {
        f64::NAN
    };

    Ok(BreuschPaganResult {
        lm,
        lm_p_value,
        f_statistic,
        f_p_value,
        df,
        df_resid,
    })
}
