//! Assumption checkers.
//!
//! Every checker follows the same lifecycle:
//!
//! ```text
//! Constructed --fit()--> Fitted --test()--> Tested
//! ```
//!
//! Transitions only move forward. Construction validates the regressor and
//! the input arrays and augments the design matrix with a constant column;
//! `fit()` refits the regressor on that design and computes fitted values
//! and residuals; `test()` requires a completed fit, runs the test-specific
//! precondition gate and statistic, and returns a [`TestOutcome`]; `plot()`
//! returns a [`PlotHandle`] without touching any checker state.
//!
//! # Example
//!
//! ```rust,ignore
//! use regress_assumptions::prelude::*;
//!
//! let mut model = StatefulRegressor::fitted_on(OlsRegressor::default(), &x, &y)?;
//! let mut check = Homoscedasticity::new(&mut model, &x, &y)?;
//! check.fit()?;
//! let outcome = check.test()?;
//! println!("{}", outcome.interpretation);
//! ```

mod homoscedasticity;
mod independence;
mod linearity;
mod normality;

pub use homoscedasticity::Homoscedasticity;
pub use independence::Independence;
pub use linearity::Linearity;
pub use normality::Normality;

use crate::core::{Assumption, DiagnosticError, DiagnosticOptions, DiagnosticResult, TestOutcome};
use crate::diagnostics::prepare;
use crate::plot::{plot_assumption, PlotHandle};
use crate::solvers::Estimator;
use crate::utils::add_constant;
use crate::validation::{validate_array, validate_matching_rows, validate_regressor};
use faer::{Col, Mat};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Lifecycle position of a checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CheckerState {
    Constructed,
    Fitted,
    Tested,
}

/// The fit → test → plot contract shared by the four checkers.
pub trait AssumptionCheck {
    /// Assumption this checker diagnoses.
    fn assumption(&self) -> Assumption;

    /// Current lifecycle state.
    fn state(&self) -> CheckerState;

    /// Fit the regressor on the constant-augmented design and compute
    /// residuals. Memoized: once fitted, further calls do nothing.
    fn fit(&mut self) -> DiagnosticResult<()>;

    /// Recompute the fit from the current regressor even if already fitted.
    fn refit(&mut self) -> DiagnosticResult<()>;

    /// Run the statistical test. Fails with `NotFitted` before `fit()`.
    fn test(&mut self) -> DiagnosticResult<TestOutcome>;

    /// Build the diagnostic plot. Fails with `NotFitted` before `fit()`.
    fn plot(&self) -> DiagnosticResult<PlotHandle>;

    /// Last computed test outcome.
    fn result(&self) -> Option<&TestOutcome>;

    /// Fit if still `Constructed`, then test.
    fn run(&mut self) -> DiagnosticResult<TestOutcome> {
        if self.state() == CheckerState::Constructed {
            self.fit()?;
        }
        self.test()
    }
}

/// State shared by every checker: the borrowed regressor, the validated
/// inputs and the fitted/residual data.
pub(crate) struct CheckerCore<'m, M: Estimator + ?Sized> {
    assumption: Assumption,
    model: &'m mut M,
    x: Mat<f64>,
    y: Col<f64>,
    options: DiagnosticOptions,
    state: CheckerState,
    fitted: Option<Col<f64>>,
    residuals: Option<Col<f64>>,
    result: Option<TestOutcome>,
}

impl<'m, M: Estimator + ?Sized> CheckerCore<'m, M> {
    pub(crate) fn new(
        assumption: Assumption,
        model: &'m mut M,
        x: &Mat<f64>,
        y: &Col<f64>,
        options: DiagnosticOptions,
    ) -> DiagnosticResult<Self> {
        validate_regressor(&*model)?;
        validate_array(x, "x")?;
        validate_array(y, "y")?;
        validate_matching_rows(x.nrows(), y.nrows())?;

        let (x_cons, added) = add_constant(x);
        debug!(
            assumption = assumption.name(),
            n_obs = x.nrows(),
            n_features = x.ncols(),
            added_constant = added,
            "checker constructed"
        );

        Ok(Self {
            assumption,
            model,
            x: x_cons,
            y: y.clone(),
            options,
            state: CheckerState::Constructed,
            fitted: None,
            residuals: None,
            result: None,
        })
    }

    pub(crate) fn assumption(&self) -> Assumption {
        self.assumption
    }

    pub(crate) fn state(&self) -> CheckerState {
        self.state
    }

    pub(crate) fn options(&self) -> &DiagnosticOptions {
        &self.options
    }

    /// Constant-augmented design matrix.
    pub(crate) fn design(&self) -> &Mat<f64> {
        &self.x
    }

    pub(crate) fn target(&self) -> &Col<f64> {
        &self.y
    }

    pub(crate) fn fitted_values(&self) -> Option<&Col<f64>> {
        self.fitted.as_ref()
    }

    pub(crate) fn residuals(&self) -> Option<&Col<f64>> {
        self.residuals.as_ref()
    }

    pub(crate) fn result(&self) -> Option<&TestOutcome> {
        self.result.as_ref()
    }

    pub(crate) fn fit(&mut self) -> DiagnosticResult<()> {
        if self.state >= CheckerState::Fitted {
            return Ok(());
        }
        self.refit()
    }

    pub(crate) fn refit(&mut self) -> DiagnosticResult<()> {
        self.model.fit(&self.x, &self.y)?;
        let (fitted, residuals) = prepare(&*self.model, &self.x, &self.y)?;

        self.fitted = Some(fitted);
        self.residuals = Some(residuals);
        // A stored outcome describes residuals that no longer exist.
        self.result = None;
        self.state = self.state.max(CheckerState::Fitted);
        debug!(
            assumption = self.assumption.name(),
            n_obs = self.y.nrows(),
            "checker fitted"
        );
        Ok(())
    }

    /// Fitted values and residuals, or `NotFitted` before the first fit.
    pub(crate) fn require_fitted(&self) -> DiagnosticResult<(&Col<f64>, &Col<f64>)> {
        match (&self.fitted, &self.residuals) {
            (Some(fitted), Some(residuals)) => Ok((fitted, residuals)),
            _ => Err(DiagnosticError::NotFitted(format!(
                "call fit() before testing or plotting {}",
                self.assumption
            ))),
        }
    }

    pub(crate) fn record(&mut self, outcome: TestOutcome) -> TestOutcome {
        debug!(
            assumption = self.assumption.name(),
            test = %outcome.test_name,
            statistic = outcome.statistic_value(),
            p_value = ?outcome.p_value(),
            verdict = outcome.verdict.label(),
            "checker tested"
        );
        self.state = CheckerState::Tested;
        self.result = Some(outcome.clone());
        outcome
    }

    pub(crate) fn plot(&self) -> DiagnosticResult<PlotHandle> {
        let (fitted, residuals) = self.require_fitted()?;
        plot_assumption(self.assumption, fitted, residuals)
    }
}

// Delegates the lifecycle half of `AssumptionCheck` to the checker's core.
macro_rules! delegate_lifecycle {
    () => {
        fn assumption(&self) -> $crate::core::Assumption {
            self.core.assumption()
        }

        fn state(&self) -> $crate::hypothesis::CheckerState {
            self.core.state()
        }

        fn fit(&mut self) -> $crate::core::DiagnosticResult<()> {
            self.core.fit()
        }

        fn refit(&mut self) -> $crate::core::DiagnosticResult<()> {
            self.core.refit()
        }

        fn plot(&self) -> $crate::core::DiagnosticResult<$crate::plot::PlotHandle> {
            self.core.plot()
        }

        fn result(&self) -> Option<&$crate::core::TestOutcome> {
            self.core.result()
        }
    };
}

// Constructors and accessors shared by the four checker types.
macro_rules! checker_common {
    ($checker:ident, $assumption:expr) => {
        impl<'m, M: $crate::solvers::Estimator + ?Sized> $checker<'m, M> {
            /// Validate the regressor and inputs with default options.
            pub fn new(
                model: &'m mut M,
                x: &faer::Mat<f64>,
                y: &faer::Col<f64>,
            ) -> $crate::core::DiagnosticResult<Self> {
                Self::with_options(model, x, y, $crate::core::DiagnosticOptions::default())
            }

            /// Validate the regressor and inputs with per-checker options.
            pub fn with_options(
                model: &'m mut M,
                x: &faer::Mat<f64>,
                y: &faer::Col<f64>,
                options: $crate::core::DiagnosticOptions,
            ) -> $crate::core::DiagnosticResult<Self> {
                Ok(Self {
                    core: $crate::hypothesis::CheckerCore::new($assumption, model, x, y, options)?,
                })
            }

            /// Options in effect for this checker.
            pub fn options(&self) -> &$crate::core::DiagnosticOptions {
                self.core.options()
            }

            /// Fitted values, once fitted.
            pub fn fitted_values(&self) -> Option<&faer::Col<f64>> {
                self.core.fitted_values()
            }

            /// Residuals `y - fitted`, once fitted.
            pub fn residuals(&self) -> Option<&faer::Col<f64>> {
                self.core.residuals()
            }

            /// Design matrix including the constant column.
            pub fn design(&self) -> &faer::Mat<f64> {
                self.core.design()
            }
        }
    };
}

pub(crate) use checker_common;
pub(crate) use delegate_lifecycle;
