//! Durbin-Watson statistic for first-order serial correlation.

use faer::Col;

/// Compute the Durbin-Watson statistic of ordered residuals.
///
/// DW = Σ (e_t - e_{t-1})² / Σ e_t²
///
/// The statistic lies in [0, 4]: values near 2 indicate no first-order
/// autocorrelation, values toward 0 positive and toward 4 negative
/// autocorrelation.
///
/// Returns NaN when fewer than two residuals are given or all are zero.
pub fn durbin_watson(residuals: &Col<f64>) -> f64 {
    let n = residuals.nrows();
    if n < 2 {
        return f64::NAN;
    }

    let ss: f64 = residuals.iter().map(|&r| r * r).sum();
    if ss == 0.0 {
        return f64::NAN;
    }

    let ss_diff: f64 = (1..n)
        .map(|t| (residuals[t] - residuals[t - 1]).powi(2))
        .sum();

    ss_diff / ss
}

/// First-order autocorrelation implied by a Durbin-Watson statistic, 1 - DW/2.
pub fn implied_autocorrelation(dw: f64) -> f64 {
    1.0 - dw / 2.0
}
