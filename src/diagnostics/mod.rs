//! Statistical tests behind the four assumption checks.
//!
//! - **RESET**: functional-form test on powers of the fitted values (linearity)
//! - **Breusch-Pagan**: auxiliary regression of squared residuals (homoscedasticity)
//! - **Shapiro-Wilk**: residual distribution test (normality)
//! - **Durbin-Watson**: serial correlation of ordered residuals (independence)
//! - **Residuals**: preparation of fitted values/residuals and plot transforms
//!
//! The tests are plain functions over faer columns and matrices. They check
//! only what they need to stay finite; the checker-level gates live in
//! [`crate::validation`].
//!
//! # Example
//!
//! ```rust,ignore
//! use regress_assumptions::diagnostics::{breusch_pagan, durbin_watson, prepare};
//!
//! let (fitted, residuals) = prepare(&model, &x, &y)?;
//! let bp = breusch_pagan(&residuals, &x, true)?;
//! let dw = durbin_watson(&residuals);
//! ```

mod breusch_pagan;
mod durbin_watson;
mod reset;
mod residuals;
mod shapiro_wilk;

pub use breusch_pagan::{breusch_pagan, BreuschPaganResult};
pub use durbin_watson::{durbin_watson, implied_autocorrelation};
pub use reset::{ramsey_reset, ResetResult};
pub use residuals::{
    population_std, prepare, qq_points, qq_reference_line, sqrt_abs_standardized,
    standardized_residuals,
};
pub use shapiro_wilk::{shapiro_wilk, ShapiroWilkResult};
