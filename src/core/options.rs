//! Diagnostic options and configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default significance level for p-value based verdicts.
pub const DEFAULT_ALPHA: f64 = 0.05;
/// Default lower edge of the Durbin-Watson "no autocorrelation" band.
pub const DEFAULT_DW_LOWER: f64 = 1.5;
/// Default upper edge of the Durbin-Watson "no autocorrelation" band.
pub const DEFAULT_DW_UPPER: f64 = 2.5;

/// Configuration shared by every assumption checker.
///
/// Each checker owns its own copy, so overriding a threshold on one
/// checker never affects another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticOptions {
    /// Significance threshold (default: 0.05). `p <= alpha` is a violation.
    pub alpha: f64,
    /// Lower edge of the Durbin-Watson band (default: 1.5, inclusive).
    pub dw_lower: f64,
    /// Upper edge of the Durbin-Watson band (default: 2.5, inclusive).
    pub dw_upper: f64,
    /// Residual variance at or below this value makes the
    /// Breusch-Pagan test undefined (default: 0.0, i.e. exactly zero).
    pub variance_tolerance: f64,
    /// Highest power of the fitted values added by the RESET test (default: 3).
    pub reset_power: usize,
    /// Use Koenker's studentized Breusch-Pagan statistic (default: true).
    pub robust_breusch_pagan: bool,
}

impl Default for DiagnosticOptions {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            dw_lower: DEFAULT_DW_LOWER,
            dw_upper: DEFAULT_DW_UPPER,
            variance_tolerance: 0.0,
            reset_power: 3,
            robust_breusch_pagan: true,
        }
    }
}

/// Errors that can occur when validating diagnostic options.
#[derive(Debug, Error, PartialEq)]
pub enum OptionsError {
    #[error("alpha must be in (0, 1), got {0}")]
    InvalidAlpha(f64),
    #[error("Durbin-Watson band must satisfy 0 <= lower <= upper <= 4, got [{lower}, {upper}]")]
    InvalidDurbinWatsonBand { lower: f64, upper: f64 },
    #[error("variance_tolerance must be non-negative, got {0}")]
    InvalidVarianceTolerance(f64),
    #[error("reset_power must be at least 2, got {0}")]
    InvalidResetPower(usize),
}

impl DiagnosticOptions {
    /// Create a new builder for diagnostic options.
    pub fn builder() -> DiagnosticOptionsBuilder {
        DiagnosticOptionsBuilder::default()
    }

    /// Options with a custom significance level and default bands.
    pub fn with_alpha(alpha: f64) -> Self {
        Self {
            alpha,
            ..Default::default()
        }
    }

    /// Validate the options and return an error if invalid.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(OptionsError::InvalidAlpha(self.alpha));
        }
        let band_ok = self.dw_lower >= 0.0
            && self.dw_upper <= 4.0
            && self.dw_lower <= self.dw_upper;
        if !band_ok {
            return Err(OptionsError::InvalidDurbinWatsonBand {
                lower: self.dw_lower,
                upper: self.dw_upper,
            });
        }
        if !(self.variance_tolerance >= 0.0) {
            return Err(OptionsError::InvalidVarianceTolerance(
                self.variance_tolerance,
            ));
        }
        if self.reset_power < 2 {
            return Err(OptionsError::InvalidResetPower(self.reset_power));
        }
        Ok(())
    }
}

/// Builder for `DiagnosticOptions`.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticOptionsBuilder {
    options: DiagnosticOptions,
}

impl DiagnosticOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the significance level.
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.options.alpha = alpha;
        self
    }

    /// Set both edges of the Durbin-Watson "no autocorrelation" band.
    pub fn dw_band(mut self, lower: f64, upper: f64) -> Self {
        self.options.dw_lower = lower;
        self.options.dw_upper = upper;
        self
    }

    /// Set the lower edge of the Durbin-Watson band.
    pub fn dw_lower(mut self, lower: f64) -> Self {
        self.options.dw_lower = lower;
        self
    }

    /// Set the upper edge of the Durbin-Watson band.
    pub fn dw_upper(mut self, upper: f64) -> Self {
        self.options.dw_upper = upper;
        self
    }

    /// Set the residual variance tolerance used by the homoscedasticity gate.
    pub fn variance_tolerance(mut self, tol: f64) -> Self {
        self.options.variance_tolerance = tol;
        self
    }

    /// Set the highest fitted-value power used by the RESET test.
    pub fn reset_power(mut self, power: usize) -> Self {
        self.options.reset_power = power;
        self
    }

    /// Choose between Koenker's (robust) and the original Breusch-Pagan statistic.
    pub fn robust_breusch_pagan(mut self, robust: bool) -> Self {
        self.options.robust_breusch_pagan = robust;
        self
    }

    /// Build and validate the options.
    pub fn build(self) -> Result<DiagnosticOptions, OptionsError> {
        self.options.validate()?;
        Ok(self.options)
    }

    /// Build the options without validation.
    pub fn build_unchecked(self) -> DiagnosticOptions {
        self.options
    }
}
