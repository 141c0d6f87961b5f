//! Normality checker: Shapiro-Wilk test and a normal Q-Q plot.

use super::{checker_common, delegate_lifecycle, AssumptionCheck, CheckerCore};
use crate::core::{Assumption, DiagnosticError, DiagnosticResult, TestOutcome, TestStatistic};
use crate::diagnostics::shapiro_wilk;
use crate::interpret::{interpret_pvalue_at, pvalue_verdict};
use crate::solvers::Estimator;
use crate::validation::validate_shapiro_residuals;

/// Checks that the residuals are normally distributed.
pub struct Normality<'m, M: Estimator + ?Sized> {
    core: CheckerCore<'m, M>,
}

checker_common!(Normality, Assumption::Normality);

impl<'m, M: Estimator + ?Sized> AssumptionCheck for Normality<'m, M> {
    delegate_lifecycle!();

    fn test(&mut self) -> DiagnosticResult<TestOutcome> {
        let (_, residuals) = self.core.require_fitted()?;
        validate_shapiro_residuals(residuals)?;

        let sw = shapiro_wilk(residuals).ok_or_else(|| {
            DiagnosticError::UndefinedTest(
                "Shapiro-Wilk coefficients could not be computed".to_string(),
            )
        })?;

        let alpha = self.core.options().alpha;
        let outcome = TestOutcome {
            assumption: Assumption::Normality,
            test_name: "Shapiro-Wilk".to_string(),
            statistic_label: "W".to_string(),
            statistic: TestStatistic::WithPValue {
                statistic: sw.w,
                p_value: sw.p_value,
            },
            df: None,
            df_denominator: None,
            verdict: pvalue_verdict(sw.p_value, alpha),
            autocorrelation: None,
            interpretation: interpret_pvalue_at(sw.p_value, "normality", alpha),
        };
        Ok(self.core.record(outcome))
    }
}
