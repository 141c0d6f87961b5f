//! Presentation of test outcomes and a combined four-assumption report.

use crate::core::{Assumption, DiagnosticError, DiagnosticOptions, DiagnosticResult, TestOutcome};
use crate::hypothesis::{
    AssumptionCheck, Homoscedasticity, Independence, Linearity, Normality,
};
use crate::plot::PlotHandle;
use crate::solvers::Estimator;
use faer::{Col, Mat};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use tracing::debug;

/// Consumes structured outcomes and presents them somewhere.
pub trait Reporter {
    /// Present one test outcome.
    fn report(&mut self, outcome: &TestOutcome) -> io::Result<()>;

    /// Present a check that could not produce an outcome.
    fn report_error(&mut self, assumption: Assumption, error: &DiagnosticError) -> io::Result<()>;

    /// Present a plot together with its interpretation guide.
    fn report_plot(&mut self, plot: &PlotHandle, guide: Option<&str>) -> io::Result<()>;
}

/// Writes outcomes in the classic console layout:
///
/// ```text
/// Breusch-Pagan Test for Homoscedasticity
/// BP-statistic: 0.8000      p-value: 0.3711
///
/// Interpretation:
///
/// p-value 0.3711 > alpha = 0.05: Assumption of Homoscedasticity is NOT VIOLATED.
/// ```
#[derive(Debug)]
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    /// Reporter writing to standard output.
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report(&mut self, outcome: &TestOutcome) -> io::Result<()> {
        writeln!(
            self.out,
            "{} Test for {}",
            outcome.test_name,
            outcome.assumption.title()
        )?;
        match outcome.p_value() {
            Some(p) => writeln!(
                self.out,
                "{}-statistic: {:.4}      p-value: {:.4}",
                outcome.statistic_label,
                outcome.statistic_value(),
                p
            )?,
            None => writeln!(
                self.out,
                "{}-statistic: {:.4}",
                outcome.statistic_label,
                outcome.statistic_value()
            )?,
        }
        writeln!(self.out, "\nInterpretation:\n")?;
        writeln!(self.out, "{}", outcome.interpretation)
    }

    fn report_error(&mut self, assumption: Assumption, error: &DiagnosticError) -> io::Result<()> {
        writeln!(self.out, "{} check failed: {error}", assumption.title())
    }

    fn report_plot(&mut self, plot: &PlotHandle, guide: Option<&str>) -> io::Result<()> {
        writeln!(self.out, "{}", plot.axes.title)?;
        if let Some(text) = guide {
            writeln!(self.out, "Interpretation Guide:\n")?;
            writeln!(self.out, "{text}")?;
        }
        Ok(())
    }
}

/// Outcome of one assumption check inside an [`AssumptionReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub assumption: Assumption,
    pub outcome: Result<TestOutcome, DiagnosticError>,
}

/// All four assumption checks run against one (model, x, y) triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssumptionReport {
    pub options: DiagnosticOptions,
    pub entries: Vec<ReportEntry>,
}

impl AssumptionReport {
    /// Run linearity, homoscedasticity, normality and independence checks.
    ///
    /// Failures while constructing a checker (a non-regressor or unfitted
    /// model, malformed `x` or `y`) fail the whole report. Any error raised
    /// afterwards, while fitting or testing, is recorded as that entry's
    /// outcome and the remaining checks still run. This covers an undefined
    /// test (e.g. zero residual variance) as well as a refit the data cannot
    /// support.
    pub fn run<M: Estimator + ?Sized>(
        model: &mut M,
        x: &Mat<f64>,
        y: &Col<f64>,
        options: DiagnosticOptions,
    ) -> DiagnosticResult<Self> {
        let mut entries = Vec::with_capacity(Assumption::ALL.len());

        for assumption in Assumption::ALL {
            let opts = options.clone();
            let outcome = match assumption {
                Assumption::Linearity => Linearity::with_options(&mut *model, x, y, opts)?.run(),
                Assumption::Homoscedasticity => {
                    Homoscedasticity::with_options(&mut *model, x, y, opts)?.run()
                }
                Assumption::Normality => Normality::with_options(&mut *model, x, y, opts)?.run(),
                Assumption::Independence => {
                    Independence::with_options(&mut *model, x, y, opts)?.run()
                }
            };
            if let Err(err) = &outcome {
                debug!(assumption = assumption.name(), error = %err, "check did not complete");
            }
            entries.push(ReportEntry {
                assumption,
                outcome,
            });
        }

        Ok(Self { options, entries })
    }

    /// Entry for `assumption`.
    pub fn get(&self, assumption: Assumption) -> Option<&ReportEntry> {
        self.entries.iter().find(|e| e.assumption == assumption)
    }

    /// Assumptions whose test completed with a VIOLATED verdict.
    pub fn violated(&self) -> Vec<Assumption> {
        self.entries
            .iter()
            .filter(|e| matches!(&e.outcome, Ok(o) if !o.verdict.holds()))
            .map(|e| e.assumption)
            .collect()
    }

    /// Whether every check completed and none was violated.
    pub fn all_hold(&self) -> bool {
        self.entries
            .iter()
            .all(|e| matches!(&e.outcome, Ok(o) if o.verdict.holds()))
    }

    /// Send every entry to `reporter` in diagnostic order.
    pub fn write_to<R: Reporter + ?Sized>(&self, reporter: &mut R) -> io::Result<()> {
        for entry in &self.entries {
            match &entry.outcome {
                Ok(outcome) => reporter.report(outcome)?,
                Err(err) => reporter.report_error(entry.assumption, err)?,
            }
        }
        Ok(())
    }
}
