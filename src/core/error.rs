//! Error taxonomy for assumption diagnostics.

use crate::solvers::RegressionError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Named failure conditions raised by validation and propagated unchanged
/// to the caller.
///
/// The variants do not overlap: a failure is attributed to the model, to the
/// fit step, to the input arrays, or to the mathematical precondition of a
/// specific test.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticError {
    /// The supplied object lacks regression capabilities.
    #[error("invalid model: {0}")]
    InvalidModel(String),

    /// The regressor (or checker) has not completed the required fit step.
    #[error("not fitted: {0}")]
    NotFitted(String),

    /// An input array is not a well-formed numeric array.
    #[error("invalid array `{name}`: {reason}")]
    InvalidArray { name: String, reason: String },

    /// A test's mathematical precondition fails.
    #[error("undefined test: {0}")]
    UndefinedTest(String),
}

impl DiagnosticError {
    pub(crate) fn invalid_array(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArray {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Name of the offending argument for `InvalidArray`, `None` otherwise.
    pub fn argument(&self) -> Option<&str> {
        match self {
            Self::InvalidArray { name, .. } => Some(name),
            _ => None,
        }
    }
}

impl From<RegressionError> for DiagnosticError {
    fn from(err: RegressionError) -> Self {
        match err {
            RegressionError::DimensionMismatch { x_rows, y_len } => Self::invalid_array(
                "y",
                format!("x has {x_rows} rows but y has {y_len} elements"),
            ),
            RegressionError::NotFitted => {
                Self::NotFitted("model must be fitted before diagnostics".to_string())
            }
            // The data cannot support a fit; the estimator itself is sound.
            data @ (RegressionError::InsufficientObservations { .. }
            | RegressionError::AllFeaturesConstant) => Self::invalid_array("x", data.to_string()),
            fault @ RegressionError::NumericalError(_) => Self::InvalidModel(fault.to_string()),
        }
    }
}

/// Result alias used throughout the diagnostics API.
pub type DiagnosticResult<T> = Result<T, DiagnosticError>;
