//! Homoscedasticity checker: Breusch-Pagan test and a Scale-Location plot.

use super::{checker_common, delegate_lifecycle, AssumptionCheck, CheckerCore};
use crate::core::{Assumption, DiagnosticResult, TestOutcome, TestStatistic};
use crate::diagnostics::breusch_pagan;
use crate::interpret::{interpret_pvalue_at, pvalue_verdict};
use crate::solvers::Estimator;
use crate::validation::validate_residual_variance;

/// Checks that residual variance is constant across observations.
///
/// Residuals with zero variance (a perfect fit) make the test undefined;
/// `test()` then fails with `UndefinedTest` before any statistic is computed.
pub struct Homoscedasticity<'m, M: Estimator + ?Sized> {
    core: CheckerCore<'m, M>,
}

checker_common!(Homoscedasticity, Assumption::Homoscedasticity);

impl<'m, M: Estimator + ?Sized> AssumptionCheck for Homoscedasticity<'m, M> {
    delegate_lifecycle!();

    fn test(&mut self) -> DiagnosticResult<TestOutcome> {
        let (_, residuals) = self.core.require_fitted()?;
        let options = self.core.options();

        validate_residual_variance(residuals, options.variance_tolerance)?;
        let bp = breusch_pagan(residuals, self.core.design(), options.robust_breusch_pagan)?;

        let alpha = options.alpha;
        let outcome = TestOutcome {
            assumption: Assumption::Homoscedasticity,
            test_name: "Breusch-Pagan".to_string(),
            statistic_label: "BP".to_string(),
            statistic: TestStatistic::WithPValue {
                statistic: bp.lm,
                p_value: bp.lm_p_value,
            },
            df: Some(bp.df as f64),
            df_denominator: None,
            verdict: pvalue_verdict(bp.lm_p_value, alpha),
            autocorrelation: None,
            interpretation: interpret_pvalue_at(bp.lm_p_value, "homoscedasticity", alpha),
        };
        Ok(self.core.record(outcome))
    }
}
