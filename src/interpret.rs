//! Verdict text for test statistics.
//!
//! p-value tests are judged against a significance level (`p > alpha` means
//! the assumption holds; the boundary belongs to the violated side). The
//! Durbin-Watson statistic is judged against a closed band around 2.

use crate::core::{Autocorrelation, Verdict, DEFAULT_ALPHA, DEFAULT_DW_LOWER, DEFAULT_DW_UPPER};

/// Verdict for a p-value at significance level `alpha`.
pub fn pvalue_verdict(p_value: f64, alpha: f64) -> Verdict {
    if p_value > alpha {
        Verdict::NotViolated
    } else {
        Verdict::Violated
    }
}

/// Interpret a p-value at α = 0.05. The text names the assumption.
pub fn interpret_pvalue(p_value: f64, assumption: &str) -> String {
    interpret_pvalue_at(p_value, assumption, DEFAULT_ALPHA)
}

/// Interpret a p-value at significance level `alpha`.
pub fn interpret_pvalue_at(p_value: f64, assumption: &str, alpha: f64) -> String {
    let name = capitalize(assumption);
    if p_value.is_nan() {
        return format!("p-value undefined: Assumption of {name} is VIOLATED.");
    }
    match pvalue_verdict(p_value, alpha) {
        Verdict::NotViolated => format!(
            "p-value {p_value:.4} > alpha = {alpha}: Assumption of {name} is NOT VIOLATED."
        ),
        Verdict::Violated => format!(
            "p-value {p_value:.4} <= alpha = {alpha}: Assumption of {name} is VIOLATED."
        ),
    }
}

/// Classify a Durbin-Watson statistic against the band `[lower, upper]`.
///
/// Both edges belong to the band. A NaN statistic compares false on both
/// sides and lands inside the band, so callers must reject it beforehand
/// (see [`crate::validation::validate_durbin_watson_residuals`]).
pub fn classify_durbin_watson(statistic: f64, lower: f64, upper: f64) -> Autocorrelation {
    if statistic < lower {
        Autocorrelation::Positive
    } else if statistic > upper {
        Autocorrelation::Negative
    } else {
        Autocorrelation::None
    }
}

/// Interpret a Durbin-Watson statistic with the default band [1.5, 2.5].
pub fn interpret_durbin_watson(statistic: f64) -> String {
    interpret_durbin_watson_band(statistic, DEFAULT_DW_LOWER, DEFAULT_DW_UPPER)
}

/// Interpret a Durbin-Watson statistic against the band `[lower, upper]`.
pub fn interpret_durbin_watson_band(statistic: f64, lower: f64, upper: f64) -> String {
    describe_autocorrelation(classify_durbin_watson(statistic, lower, upper))
}

pub(crate) fn describe_autocorrelation(autocorrelation: Autocorrelation) -> String {
    match autocorrelation {
        Autocorrelation::None => {
            "DW statistic close to 2 indicates no autocorrelation: assumption of Independence is NOT VIOLATED."
        }
        Autocorrelation::Positive => {
            "DW statistic significantly less than 2 indicates positive autocorrelation: assumption of Independence is VIOLATED."
        }
        Autocorrelation::Negative => {
            "DW statistic significantly greater than 2 indicates negative autocorrelation: assumption of Independence is VIOLATED."
        }
    }
    .to_string()
}

// "hOMOSCEDASTICITY" -> "Homoscedasticity"
fn capitalize(name: &str) -> String {
    let mut chars = name.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
