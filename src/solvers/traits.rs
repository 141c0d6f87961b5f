//! Core traits for regression estimators.
//!
//! Two seams live here. [`Regressor`] / [`FittedRegressor`] follow the
//! sklearn pattern where fitting returns a separate fitted model.
//! [`Estimator`] is the narrow, stateful capability set the diagnostics need:
//! fit in place, predict, and report whether a fit has completed.

use faer::{Col, Mat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during regression fitting.
#[derive(Debug, Error)]
pub enum RegressionError {
    #[error("dimension mismatch: X has {x_rows} rows but y has {y_len} elements")]
    DimensionMismatch { x_rows: usize, y_len: usize },

    #[error("insufficient observations: need at least {needed}, got {got}")]
    InsufficientObservations { needed: usize, got: usize },

    #[error("all features are constant")]
    AllFeaturesConstant,

    #[error("estimator has not been fitted")]
    NotFitted,

    /// The solve produced non-finite coefficients.
    #[error("numerical error: {0}")]
    NumericalError(String),
}

/// A regression estimator that can be fit to data.
///
/// This trait follows the sklearn pattern where fitting returns a fitted model
/// that can then make predictions.
pub trait Regressor {
    /// The type of the fitted model.
    type Fitted: FittedRegressor;

    /// Fit the model to the data.
    ///
    /// # Arguments
    /// * `x` - Design matrix of shape (n_samples, n_features)
    /// * `y` - Target vector of length n_samples
    fn fit(&self, x: &Mat<f64>, y: &Col<f64>) -> Result<Self::Fitted, RegressionError>;
}

/// A fitted regression model that can make predictions.
pub trait FittedRegressor {
    /// Make predictions on new data.
    fn predict(&self, x: &Mat<f64>) -> Col<f64>;

    /// Estimated coefficients (excluding intercept). Aliased entries are NaN.
    fn coefficients(&self) -> &Col<f64>;

    /// Intercept, if the model was fit with one.
    fn intercept(&self) -> Option<f64>;

    /// Calculate the score (R²) on new data.
    fn score(&self, x: &Mat<f64>, y: &Col<f64>) -> f64 {
        let predictions = self.predict(x);
        let n = y.nrows();

        let y_mean: f64 = y.iter().sum::<f64>() / n as f64;

        let tss: f64 = y.iter().map(|&yi| (yi - y_mean).powi(2)).sum();
        let rss: f64 = y
            .iter()
            .zip(predictions.iter())
            .map(|(&yi, &pi)| (yi - pi).powi(2))
            .sum();

        if tss == 0.0 {
            if rss == 0.0 {
                1.0
            } else {
                0.0
            }
        } else {
            1.0 - rss / tss
        }
    }
}

/// What kind of learning task an estimator solves.
///
/// Only `Regressor` estimators can be diagnosed; the others are rejected
/// with `InvalidModel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EstimatorKind {
    Regressor,
    Classifier,
    Clusterer,
    Transformer,
}

/// Capabilities an estimator exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub fit: bool,
    pub predict: bool,
}

impl Capabilities {
    /// Both fit and predict are available.
    pub const FULL: Capabilities = Capabilities {
        fit: true,
        predict: true,
    };
}

/// Stateful estimator interface consumed by the assumption checkers.
///
/// Adapters implement this for concrete model types; the diagnostics never
/// inspect the concrete type behind it.
pub trait Estimator {
    /// The task this estimator solves.
    fn kind(&self) -> EstimatorKind;

    /// Capabilities exposed by this estimator.
    fn capabilities(&self) -> Capabilities {
        Capabilities::FULL
    }

    /// Fit in place on `(x, y)`.
    fn fit(&mut self, x: &Mat<f64>, y: &Col<f64>) -> Result<(), RegressionError>;

    /// Predict the response for every row of `x`.
    fn predict(&self, x: &Mat<f64>) -> Result<Col<f64>, RegressionError>;

    /// Whether a fit has completed.
    fn is_fitted(&self) -> bool;
}
