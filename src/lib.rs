//! Diagnostics for the classical OLS assumptions.
//!
//! Checks whether a fitted regression model satisfies linearity,
//! homoscedasticity, normality of residuals and independence, returning a
//! structured verdict and a backend-neutral diagnostic plot for each.
//!
//! # Example
//!
//! ```rust,ignore
//! use regress_assumptions::prelude::*;
//!
//! // Any estimator implementing `Estimator`; here the bundled OLS solver.
//! let mut model = StatefulRegressor::fitted_on(OlsRegressor::default(), &x, &y)?;
//!
//! let mut check = Normality::new(&mut model, &x, &y)?;
//! check.fit()?;
//! let outcome = check.test()?;
//! ConsoleReporter::stdout().report(&outcome)?;
//!
//! let plot = check.plot()?; // Q-Q plot coordinates, labels and title
//! ```

pub mod core;
pub mod diagnostics;
pub mod guide;
pub mod hypothesis;
pub mod interpret;
pub mod plot;
pub mod report;
pub mod solvers;
pub mod utils;
pub mod validation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::{
        Assumption, Autocorrelation, DiagnosticError, DiagnosticOptions, DiagnosticResult,
        TestOutcome, TestStatistic, Verdict,
    };
    pub use crate::guide::{DirectoryGuides, GuideSource, StaticGuides};
    pub use crate::hypothesis::{
        AssumptionCheck, CheckerState, Homoscedasticity, Independence, Linearity, Normality,
    };
    pub use crate::interpret::{interpret_durbin_watson, interpret_pvalue};
    pub use crate::plot::{plot_assumption, PlotHandle, Renderer};
    pub use crate::report::{AssumptionReport, ConsoleReporter, Reporter};
    pub use crate::solvers::{
        Estimator, EstimatorKind, FittedRegressor, OlsRegressor, Regressor, StatefulRegressor,
    };
}

pub use crate::core::{
    Assumption, DiagnosticError, DiagnosticOptions, DiagnosticResult, TestOutcome, Verdict,
};
pub use crate::hypothesis::{
    AssumptionCheck, CheckerState, Homoscedasticity, Independence, Linearity, Normality,
};
pub use crate::solvers::{Estimator, StatefulRegressor};
