//! # Diagnosing the OLS assumptions
//!
//! Fits an OLS model to two synthetic data sets, one well behaved and one
//! with curvature and a fan-shaped error spread, then runs the four
//! assumption checks on each.
//!
//! Run with: `cargo run --example diagnose`
//! Set `RUST_LOG=regress_assumptions=debug` to see lifecycle events.

use faer::{Col, Mat};
use regress_assumptions::guide::StaticGuides;
use regress_assumptions::plot::SummaryRenderer;
use regress_assumptions::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== OLS Assumption Diagnostics ===\n");

    well_behaved()?;
    misspecified()?;
    step_by_step()?;
    perfect_fit()?;

    Ok(())
}

// Small deterministic pseudo-normal noise (sum of uniforms).
fn noise(n: usize, seed: u64) -> Vec<f64> {
    let mut state = seed;
    let mut next = || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (state >> 11) as f64 / (1u64 << 53) as f64
    };
    (0..n)
        .map(|_| (0..12).map(|_| next()).sum::<f64>() - 6.0)
        .collect()
}

/// A linear model with independent, constant-variance errors.
fn well_behaved() -> Result<(), Box<dyn std::error::Error>> {
    println!("--- Well-behaved data ---\n");

    let n = 120;
    let e = noise(n, 7);
    let x = Mat::from_fn(n, 2, |i, j| if j == 0 { i as f64 * 0.1 } else { ((i * 37) % 11) as f64 });
    let y = Col::from_fn(n, |i| 1.0 + 2.0 * x[(i, 0)] - 0.5 * x[(i, 1)] + e[i]);

    let mut model = StatefulRegressor::fitted_on(OlsRegressor::default(), &x, &y)?;
    let report = AssumptionReport::run(&mut model, &x, &y, DiagnosticOptions::default())?;

    report.write_to(&mut ConsoleReporter::stdout())?;
    println!("All assumptions hold: {}\n", report.all_hold());
    Ok(())
}

/// Quadratic truth fitted with a straight line, with error spread growing in x.
fn misspecified() -> Result<(), Box<dyn std::error::Error>> {
    println!("--- Misspecified model ---\n");

    let n = 120;
    let e = noise(n, 11);
    let x = Mat::from_fn(n, 1, |i, _| i as f64 * 0.1);
    let y = Col::from_fn(n, |i| {
        let xi = x[(i, 0)];
        1.0 + 0.5 * xi * xi + (0.2 + 0.3 * xi) * e[i]
    });

    let mut model = StatefulRegressor::fitted_on(OlsRegressor::default(), &x, &y)?;
    let report = AssumptionReport::run(&mut model, &x, &y, DiagnosticOptions::default())?;

    report.write_to(&mut ConsoleReporter::stdout())?;
    println!("Violated: {:?}\n", report.violated());
    Ok(())
}

/// One checker driven through its lifecycle with custom options.
fn step_by_step() -> Result<(), Box<dyn std::error::Error>> {
    println!("--- Single checker with custom options ---\n");

    let n = 60;
    let e = noise(n, 3);
    let x = Mat::from_fn(n, 1, |i, _| i as f64);
    // AR(1)-style errors produce positive autocorrelation
    let mut ar = vec![0.0; n];
    for i in 1..n {
        ar[i] = 0.8 * ar[i - 1] + e[i];
    }
    let y = Col::from_fn(n, |i| 3.0 + 0.2 * i as f64 + ar[i]);

    let options = DiagnosticOptions::builder().dw_band(1.6, 2.4).build()?;
    let mut model = StatefulRegressor::fitted_on(OlsRegressor::default(), &x, &y)?;
    let mut check = Independence::with_options(&mut model, &x, &y, options)?;

    println!("State: {:?}", check.state());
    check.fit()?;
    println!("State: {:?}", check.state());
    let outcome = check.test()?;
    println!("State: {:?}\n", check.state());

    let mut console = ConsoleReporter::stdout();
    console.report(&outcome)?;

    let guides = StaticGuides::new().with(
        Assumption::Independence,
        "Residuals should scatter randomly around zero with no runs or waves.",
    );
    let plot = check.plot()?;
    println!();
    print!("{}", SummaryRenderer.render(&plot)?);
    console.report_plot(&plot, guides.load(Assumption::Independence).ok().as_deref())?;
    println!();
    Ok(())
}

/// A model that reproduces y leaves the variance test undefined.
fn perfect_fit() -> Result<(), Box<dyn std::error::Error>> {
    println!("--- Perfect fit ---\n");

    let x = Mat::from_fn(30, 1, |i, _| i as f64);
    let y = Col::from_fn(30, |i| 4.0 - 0.25 * i as f64);

    // Rounding leaves residuals of order 1e-15; treat those as zero.
    let options = DiagnosticOptions::builder().variance_tolerance(1e-20).build()?;
    let mut model = StatefulRegressor::fitted_on(OlsRegressor::default(), &x, &y)?;
    let mut check = Homoscedasticity::with_options(&mut model, &x, &y, options)?;
    match check.run() {
        Ok(outcome) => println!("{}", outcome.interpretation),
        Err(err) => println!("Homoscedasticity check refused: {err}"),
    }
    Ok(())
}
