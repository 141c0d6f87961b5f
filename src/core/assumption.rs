//! The four classical OLS assumptions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the classical OLS conditions being diagnosed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Assumption {
    /// The mean response is linear in the predictors.
    Linearity,
    /// Residual variance is constant across fitted values.
    Homoscedasticity,
    /// Residuals are normally distributed.
    Normality,
    /// Residuals are not serially correlated.
    Independence,
}

impl Assumption {
    /// All assumptions in diagnostic order.
    pub const ALL: [Assumption; 4] = [
        Assumption::Linearity,
        Assumption::Homoscedasticity,
        Assumption::Normality,
        Assumption::Independence,
    ];

    /// Lower-case name, e.g. `"homoscedasticity"`.
    pub fn name(&self) -> &'static str {
        match self {
            Assumption::Linearity => "linearity",
            Assumption::Homoscedasticity => "homoscedasticity",
            Assumption::Normality => "normality",
            Assumption::Independence => "independence",
        }
    }

    /// Capitalized name used in verdict text, e.g. `"Homoscedasticity"`.
    pub fn title(&self) -> &'static str {
        match self {
            Assumption::Linearity => "Linearity",
            Assumption::Homoscedasticity => "Homoscedasticity",
            Assumption::Normality => "Normality",
            Assumption::Independence => "Independence",
        }
    }
}

impl fmt::Display for Assumption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown assumption name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown assumption `{0}`; expected linearity, homoscedasticity, normality or independence")]
pub struct UnknownAssumption(pub String);

impl FromStr for Assumption {
    type Err = UnknownAssumption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linearity" => Ok(Assumption::Linearity),
            "homoscedasticity" => Ok(Assumption::Homoscedasticity),
            "normality" => Ok(Assumption::Normality),
            "independence" => Ok(Assumption::Independence),
            _ => Err(UnknownAssumption(s.to_string())),
        }
    }
}
