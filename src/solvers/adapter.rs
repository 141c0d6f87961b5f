//! Stateful adapter from the fit-returns-model pattern to [`Estimator`].

use crate::solvers::traits::{
    Estimator, EstimatorKind, FittedRegressor, RegressionError, Regressor,
};
use faer::{Col, Mat};

/// Wraps any [`Regressor`] so it can be fit in place and probed for a
/// completed fit.
///
/// # Example
///
/// ```rust,ignore
/// use regress_assumptions::solvers::{Estimator, OlsRegressor, StatefulRegressor};
///
/// let mut model = StatefulRegressor::new(OlsRegressor::default());
/// assert!(!model.is_fitted());
/// model.fit(&x, &y)?;
/// let predictions = model.predict(&x)?;
/// ```
#[derive(Debug, Clone)]
pub struct StatefulRegressor<R: Regressor> {
    regressor: R,
    fitted: Option<R::Fitted>,
}

impl<R: Regressor> StatefulRegressor<R> {
    /// Wrap an unfitted regressor.
    pub fn new(regressor: R) -> Self {
        Self {
            regressor,
            fitted: None,
        }
    }

    /// Wrap a regressor and fit it immediately.
    pub fn fitted_on(regressor: R, x: &Mat<f64>, y: &Col<f64>) -> Result<Self, RegressionError> {
        let fitted = regressor.fit(x, y)?;
        Ok(Self {
            regressor,
            fitted: Some(fitted),
        })
    }

    /// The wrapped regressor configuration.
    pub fn regressor(&self) -> &R {
        &self.regressor
    }

    /// The most recent fitted model, if any.
    pub fn fitted(&self) -> Option<&R::Fitted> {
        self.fitted.as_ref()
    }

    /// Unwrap into the regressor and the last fitted model.
    pub fn into_parts(self) -> (R, Option<R::Fitted>) {
        (self.regressor, self.fitted)
    }
}

impl<R: Regressor> Estimator for StatefulRegressor<R> {
    fn kind(&self) -> EstimatorKind {
        EstimatorKind::Regressor
    }

    fn fit(&mut self, x: &Mat<f64>, y: &Col<f64>) -> Result<(), RegressionError> {
        self.fitted = Some(self.regressor.fit(x, y)?);
        Ok(())
    }

    fn predict(&self, x: &Mat<f64>) -> Result<Col<f64>, RegressionError> {
        self.fitted
            .as_ref()
            .map(|fitted| fitted.predict(x))
            .ok_or(RegressionError::NotFitted)
    }

    fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }
}
