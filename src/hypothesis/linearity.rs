//! Linearity checker: Ramsey RESET test and a residuals-vs-fitted plot.

use super::{checker_common, delegate_lifecycle, AssumptionCheck, CheckerCore};
use crate::core::{Assumption, DiagnosticResult, TestOutcome, TestStatistic};
use crate::diagnostics::ramsey_reset;
use crate::interpret::{interpret_pvalue_at, pvalue_verdict};
use crate::solvers::Estimator;

/// Checks that the mean response is linear in the predictors.
///
/// Low RESET p-values indicate that powers of the fitted values explain
/// variation the linear specification misses.
pub struct Linearity<'m, M: Estimator + ?Sized> {
    core: CheckerCore<'m, M>,
}

checker_common!(Linearity, Assumption::Linearity);

impl<'m, M: Estimator + ?Sized> AssumptionCheck for Linearity<'m, M> {
    delegate_lifecycle!();

    fn test(&mut self) -> DiagnosticResult<TestOutcome> {
        self.core.require_fitted()?;
        let alpha = self.core.options().alpha;
        let power = self.core.options().reset_power;

        let reset = ramsey_reset(self.core.target(), self.core.design(), power)?;

        let verdict = pvalue_verdict(reset.p_value, alpha);
        let outcome = TestOutcome {
            assumption: Assumption::Linearity,
            test_name: "RESET".to_string(),
            statistic_label: "F".to_string(),
            statistic: TestStatistic::WithPValue {
                statistic: reset.f_statistic,
                p_value: reset.p_value,
            },
            df: Some(reset.df_num as f64),
            df_denominator: Some(reset.df_den as f64),
            verdict,
            autocorrelation: None,
            interpretation: interpret_pvalue_at(reset.p_value, "linearity", alpha),
        };
        Ok(self.core.record(outcome))
    }
}
