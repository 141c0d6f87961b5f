//! Test result structures.

use super::assumption::Assumption;
use serde::{Deserialize, Serialize};

/// Raw output of a statistical test.
///
/// Tests with a reference distribution produce a (statistic, p-value) pair;
/// the Durbin-Watson statistic is reported alone and judged against a band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TestStatistic {
    /// A statistic together with its p-value.
    WithPValue { statistic: f64, p_value: f64 },
    /// A statistic without a p-value.
    Scalar { statistic: f64 },
}

impl TestStatistic {
    /// The test statistic.
    pub fn statistic(&self) -> f64 {
        match *self {
            TestStatistic::WithPValue { statistic, .. } => statistic,
            TestStatistic::Scalar { statistic } => statistic,
        }
    }

    /// The p-value, if the test has one.
    pub fn p_value(&self) -> Option<f64> {
        match *self {
            TestStatistic::WithPValue { p_value, .. } => Some(p_value),
            TestStatistic::Scalar { .. } => None,
        }
    }
}

/// Classification of a statistic against its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    NotViolated,
    Violated,
}

impl Verdict {
    /// Whether the assumption holds under this verdict.
    pub fn holds(&self) -> bool {
        matches!(self, Verdict::NotViolated)
    }

    /// Upper-case label used in interpretation text.
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::NotViolated => "NOT VIOLATED",
            Verdict::Violated => "VIOLATED",
        }
    }
}

/// Direction of serial correlation implied by a Durbin-Watson statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Autocorrelation {
    /// Statistic inside the band: no autocorrelation.
    None,
    /// Statistic below the band.
    Positive,
    /// Statistic above the band.
    Negative,
}

impl Autocorrelation {
    /// Verdict on the independence assumption.
    pub fn verdict(&self) -> Verdict {
        match self {
            Autocorrelation::None => Verdict::NotViolated,
            Autocorrelation::Positive | Autocorrelation::Negative => Verdict::Violated,
        }
    }
}

/// Structured outcome of one checker's `test()`.
///
/// Computation is kept apart from presentation: a reporter renders this
/// value, the checker never prints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestOutcome {
    /// Assumption that was diagnosed.
    pub assumption: Assumption,
    /// Human-readable test name, e.g. `"Breusch-Pagan"`.
    pub test_name: String,
    /// Short statistic label, e.g. `"BP"`.
    pub statistic_label: String,
    /// Statistic and, where defined, p-value.
    pub statistic: TestStatistic,
    /// Degrees of freedom of the reference distribution (numerator for F).
    pub df: Option<f64>,
    /// Denominator degrees of freedom (F tests only).
    pub df_denominator: Option<f64>,
    /// NOT VIOLATED / VIOLATED classification.
    pub verdict: Verdict,
    /// Autocorrelation direction (independence checks only).
    pub autocorrelation: Option<Autocorrelation>,
    /// Interpretation sentence naming the assumption.
    pub interpretation: String,
}

impl TestOutcome {
    /// Shortcut for `self.statistic.statistic()`.
    pub fn statistic_value(&self) -> f64 {
        self.statistic.statistic()
    }

    /// Shortcut for `self.statistic.p_value()`.
    pub fn p_value(&self) -> Option<f64> {
        self.statistic.p_value()
    }
}
