//! Regression estimators and the capability interface the diagnostics consume.

mod adapter;
mod ols;
mod traits;

pub use adapter::StatefulRegressor;
pub use ols::{FittedOls, OlsRegressor, OlsRegressorBuilder};
pub use traits::{
    Capabilities, Estimator, EstimatorKind, FittedRegressor, RegressionError, Regressor,
};
