//! Core types for assumption diagnostics.

mod assumption;
mod error;
mod options;
mod result;

pub use assumption::{Assumption, UnknownAssumption};
pub use error::{DiagnosticError, DiagnosticResult};
pub use options::{
    DiagnosticOptions, DiagnosticOptionsBuilder, OptionsError, DEFAULT_ALPHA, DEFAULT_DW_LOWER,
    DEFAULT_DW_UPPER,
};
pub use result::{Autocorrelation, TestOutcome, TestStatistic, Verdict};
