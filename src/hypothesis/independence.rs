//! Independence checker: Durbin-Watson statistic and a residuals-vs-order plot.

use super::{checker_common, delegate_lifecycle, AssumptionCheck, CheckerCore};
use crate::core::{Assumption, DiagnosticResult, TestOutcome, TestStatistic};
use crate::diagnostics::durbin_watson;
use crate::interpret::{classify_durbin_watson, describe_autocorrelation};
use crate::solvers::Estimator;
use crate::validation::validate_durbin_watson_residuals;

/// Checks that residuals are free of first-order serial correlation.
///
/// Rows are taken in the order given. The statistic has no p-value; it is
/// judged against the closed band `[dw_lower, dw_upper]`.
pub struct Independence<'m, M: Estimator + ?Sized> {
    core: CheckerCore<'m, M>,
}

checker_common!(Independence, Assumption::Independence);

impl<'m, M: Estimator + ?Sized> AssumptionCheck for Independence<'m, M> {
    delegate_lifecycle!();

    fn test(&mut self) -> DiagnosticResult<TestOutcome> {
        let (_, residuals) = self.core.require_fitted()?;
        validate_durbin_watson_residuals(residuals)?;

        let dw = durbin_watson(residuals);
        let options = self.core.options();
        let autocorrelation = classify_durbin_watson(dw, options.dw_lower, options.dw_upper);

        let outcome = TestOutcome {
            assumption: Assumption::Independence,
            test_name: "Durbin-Watson".to_string(),
            statistic_label: "DW".to_string(),
            statistic: TestStatistic::Scalar { statistic: dw },
            df: None,
            df_denominator: None,
            verdict: autocorrelation.verdict(),
            autocorrelation: Some(autocorrelation),
            interpretation: describe_autocorrelation(autocorrelation),
        };
        Ok(self.core.record(outcome))
    }
}
