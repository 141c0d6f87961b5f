//! Assumption checker integration tests.

mod common;

use approx::assert_relative_eq;
use common::{
    generate_ar1_data, generate_heteroscedastic_data, generate_linear_data,
    generate_quadratic_data, generate_skewed_data, ClassifierProbe, OracleRegressor,
    TruncatingRegressor,
};
use faer::{Col, Mat};
use regress_assumptions::diagnostics::prepare;
use regress_assumptions::prelude::*;

fn fitted_ols(x: &Mat<f64>, y: &Col<f64>) -> StatefulRegressor<OlsRegressor> {
    StatefulRegressor::fitted_on(OlsRegressor::default(), x, y).expect("fit should succeed")
}

// ============================================================================
// Residual Preparation
// ============================================================================

#[test]
fn test_residuals_are_y_minus_prediction() {
    let (x, y, _) = generate_linear_data(50, 3, 1.0, 0.3, 42);
    let model = fitted_ols(&x, &y);

    let (fitted, residuals) = prepare(&model, &x, &y).expect("prepare should succeed");
    let prediction = model.predict(&x).expect("model is fitted");

    assert_eq!(residuals.nrows(), y.nrows());
    for i in 0..y.nrows() {
        assert_eq!(fitted[i], prediction[i]);
        assert_eq!(residuals[i], y[i] - prediction[i]);
    }
}

#[test]
fn test_checker_residuals_match_target_rows() {
    let (x, y, _) = generate_linear_data(40, 2, 0.5, 0.2, 7);
    let mut model = fitted_ols(&x, &y);
    let mut check = Linearity::new(&mut model, &x, &y).unwrap();
    check.fit().unwrap();

    let fitted = check.fitted_values().unwrap();
    let residuals = check.residuals().unwrap();
    assert_eq!(residuals.nrows(), 40);
    for i in 0..40 {
        assert_eq!(residuals[i], y[i] - fitted[i]);
    }
}

#[test]
fn test_prediction_length_mismatch_is_invalid_model() {
    let x = Mat::from_fn(10, 1, |i, _| i as f64);
    let y = Col::from_fn(10, |i| i as f64);
    let err = prepare(&TruncatingRegressor, &x, &y).unwrap_err();
    assert!(matches!(err, DiagnosticError::InvalidModel(_)));
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_classifier_rejected_by_every_checker() {
    let x = Mat::from_fn(10, 1, |i, _| i as f64);
    let y = Col::from_fn(10, |i| i as f64);
    let mut model = ClassifierProbe;

    assert!(matches!(
        Linearity::new(&mut model, &x, &y),
        Err(DiagnosticError::InvalidModel(_))
    ));
    assert!(matches!(
        Homoscedasticity::new(&mut model, &x, &y),
        Err(DiagnosticError::InvalidModel(_))
    ));
    assert!(matches!(
        Normality::new(&mut model, &x, &y),
        Err(DiagnosticError::InvalidModel(_))
    ));
    assert!(matches!(
        Independence::new(&mut model, &x, &y),
        Err(DiagnosticError::InvalidModel(_))
    ));
}

#[test]
fn test_unfitted_regressor_rejected() {
    let x = Mat::from_fn(10, 1, |i, _| i as f64);
    let y = Col::from_fn(10, |i| 2.0 * i as f64);
    let mut model = StatefulRegressor::new(OlsRegressor::default());

    assert!(matches!(
        Normality::new(&mut model, &x, &y),
        Err(DiagnosticError::NotFitted(_))
    ));
    let mut oracle = OracleRegressor::default();
    assert!(matches!(
        Homoscedasticity::new(&mut oracle, &x, &y),
        Err(DiagnosticError::NotFitted(_))
    ));
}

#[test]
fn test_invalid_arrays_name_the_argument() {
    let x = Mat::from_fn(10, 1, |i, _| if i == 4 { f64::NAN } else { i as f64 });
    let y = Col::from_fn(10, |i| i as f64);
    let mut model = OracleRegressor::fitted_on(&y);

    let err = Linearity::new(&mut model, &x, &y).err().unwrap();
    assert_eq!(err.argument(), Some("x"));

    let x = Mat::from_fn(10, 1, |i, _| i as f64);
    let short = Col::from_fn(9, |i| i as f64);
    let err = Linearity::new(&mut model, &x, &short).err().unwrap();
    assert_eq!(err.argument(), Some("y"));
}

#[test]
fn test_constant_column_added_once() {
    let (x, y, _) = generate_linear_data(30, 2, 1.0, 0.1, 3);
    let mut model = fitted_ols(&x, &y);
    let check = Normality::new(&mut model, &x, &y).unwrap();
    assert_eq!(check.design().ncols(), 3);
    assert!((0..30).all(|i| check.design()[(i, 0)] == 1.0));

    let with_ones = Mat::from_fn(30, 3, |i, j| if j == 0 { 1.0 } else { x[(i, j - 1)] });
    let mut model = fitted_ols(&with_ones, &y);
    let check = Normality::new(&mut model, &with_ones, &y).unwrap();
    assert_eq!(check.design().ncols(), 3);
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_test_before_fit_is_not_fitted() {
    let (x, y, _) = generate_linear_data(40, 1, 1.0, 0.5, 11);
    let mut model = fitted_ols(&x, &y);

    let mut lin = Linearity::new(&mut model, &x, &y).unwrap();
    assert!(matches!(lin.test(), Err(DiagnosticError::NotFitted(_))));
    drop(lin);

    let mut hom = Homoscedasticity::new(&mut model, &x, &y).unwrap();
    assert!(matches!(hom.test(), Err(DiagnosticError::NotFitted(_))));
    drop(hom);

    let mut norm = Normality::new(&mut model, &x, &y).unwrap();
    assert!(matches!(norm.test(), Err(DiagnosticError::NotFitted(_))));
    drop(norm);

    let mut indep = Independence::new(&mut model, &x, &y).unwrap();
    assert!(matches!(indep.test(), Err(DiagnosticError::NotFitted(_))));
    assert_eq!(indep.state(), CheckerState::Constructed);
    assert!(indep.result().is_none());
}

#[test]
fn test_plot_before_fit_is_not_fitted() {
    let (x, y, _) = generate_linear_data(20, 1, 1.0, 0.5, 1);
    let mut model = fitted_ols(&x, &y);
    let check = Independence::new(&mut model, &x, &y).unwrap();
    assert!(matches!(check.plot(), Err(DiagnosticError::NotFitted(_))));
}

#[test]
fn test_state_moves_forward() {
    let (x, y, _) = generate_linear_data(60, 1, 1.0, 0.5, 5);
    let mut model = fitted_ols(&x, &y);
    let mut check = Normality::new(&mut model, &x, &y).unwrap();

    assert_eq!(check.state(), CheckerState::Constructed);
    check.fit().unwrap();
    assert_eq!(check.state(), CheckerState::Fitted);
    let outcome = check.test().unwrap();
    assert_eq!(check.state(), CheckerState::Tested);
    assert_eq!(check.result(), Some(&outcome));

    check.refit().unwrap();
    assert_eq!(check.state(), CheckerState::Tested);
    assert!(check.result().is_none());

    let retested = check.test().unwrap();
    assert_eq!(check.result(), Some(&retested));
}

#[test]
fn test_fit_is_memoized() {
    let y = Col::from_fn(20, |i| (i as f64 * 0.7).sin());
    let x = Mat::from_fn(20, 1, |i, _| i as f64);
    let mut model = OracleRegressor::fitted_on(&y);

    {
        let mut check = Independence::new(&mut model, &x, &y).unwrap();
        check.fit().unwrap();
        check.fit().unwrap();
        let _ = check.test();
        let _ = check.test();
    }
    assert_eq!(model.fit_calls, 1);

    {
        let mut check = Independence::new(&mut model, &x, &y).unwrap();
        check.fit().unwrap();
        check.refit().unwrap();
    }
    assert_eq!(model.fit_calls, 3);
}

#[test]
fn test_run_fits_at_most_once() {
    let (x, y, _) = generate_linear_data(50, 1, 1.0, 0.5, 9);
    let mut model = fitted_ols(&x, &y);
    let mut check = Linearity::new(&mut model, &x, &y).unwrap();

    let first = check.run().unwrap();
    let second = check.run().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_repeated_tests_are_reproducible() {
    let (x, y) = generate_heteroscedastic_data(100, 2);
    let mut model = fitted_ols(&x, &y);
    let mut check = Homoscedasticity::new(&mut model, &x, &y).unwrap();
    check.fit().unwrap();

    let a = check.test().unwrap();
    let b = check.test().unwrap();
    assert_eq!(a.statistic, b.statistic);
}

// ============================================================================
// Zero Residual Variance
// ============================================================================

#[test]
fn test_perfect_fit_makes_homoscedasticity_undefined() {
    let x = Mat::from_fn(25, 2, |i, j| (i * (j + 1)) as f64 + (i % 3) as f64);
    let y = Col::from_fn(25, |i| 3.0 + 0.5 * i as f64);
    let mut model = OracleRegressor::fitted_on(&y);

    let mut check = Homoscedasticity::new(&mut model, &x, &y).unwrap();
    check.fit().unwrap();
    assert!(check.residuals().unwrap().iter().all(|&r| r == 0.0));

    let err = check.test().unwrap_err();
    assert!(matches!(err, DiagnosticError::UndefinedTest(_)));
    assert!(check.result().is_none());
    assert_eq!(check.state(), CheckerState::Fitted);
}

#[test]
fn test_variance_tolerance_option() {
    let (x, y, _) = generate_linear_data(40, 1, 1.0, 1e-9, 4);
    let mut model = fitted_ols(&x, &y);

    let options = DiagnosticOptions::builder()
        .variance_tolerance(1e-6)
        .build()
        .unwrap();
    let mut check = Homoscedasticity::with_options(&mut model, &x, &y, options).unwrap();
    assert!(matches!(check.run(), Err(DiagnosticError::UndefinedTest(_))));
}

#[test]
fn test_single_row_fit_is_invalid_array() {
    let (x, y, _) = generate_linear_data(20, 1, 1.0, 0.5, 6);
    let mut model = fitted_ols(&x, &y);
    let x_one = Mat::from_fn(1, 1, |_, _| 0.7);
    let y_one = Col::from_fn(1, |_| 2.0);

    let mut check = Independence::new(&mut model, &x_one, &y_one).unwrap();
    let err = check.fit().unwrap_err();
    assert!(!matches!(err, DiagnosticError::InvalidModel(_)));
    assert_eq!(err.argument(), Some("x"));
    assert_eq!(check.state(), CheckerState::Constructed);
}

#[test]
fn test_perfect_fit_other_checks_undefined_too() {
    let x = Mat::from_fn(25, 1, |i, _| i as f64);
    let y = Col::from_fn(25, |i| (i as f64).sqrt());
    let mut model = OracleRegressor::fitted_on(&y);

    let mut norm = Normality::new(&mut model, &x, &y).unwrap();
    assert!(matches!(norm.run(), Err(DiagnosticError::UndefinedTest(_))));
    drop(norm);

    let mut indep = Independence::new(&mut model, &x, &y).unwrap();
    assert!(matches!(indep.run(), Err(DiagnosticError::UndefinedTest(_))));
}

// ============================================================================
// Verdicts on Synthetic Data
// ============================================================================

#[test]
fn test_well_specified_model_passes() {
    let (x, y, _) = generate_linear_data(120, 2, 1.0, 0.5, 42);
    let mut model = fitted_ols(&x, &y);

    let lin = Linearity::new(&mut model, &x, &y).unwrap().run().unwrap();
    assert_eq!(lin.verdict, Verdict::NotViolated);
    assert_eq!(lin.df, Some(2.0));
    assert_eq!(lin.df_denominator, Some(115.0));

    let hom = Homoscedasticity::new(&mut model, &x, &y).unwrap().run().unwrap();
    assert_eq!(hom.verdict, Verdict::NotViolated);
    assert_eq!(hom.df, Some(2.0));

    let norm = Normality::new(&mut model, &x, &y).unwrap().run().unwrap();
    assert_eq!(norm.verdict, Verdict::NotViolated);
    assert!(norm.statistic_value() > 0.98);

    let indep = Independence::new(&mut model, &x, &y).unwrap().run().unwrap();
    assert_eq!(indep.verdict, Verdict::NotViolated);
    assert_eq!(indep.autocorrelation, Some(Autocorrelation::None));
    assert!(indep.p_value().is_none());
}

#[test]
fn test_curvature_violates_linearity() {
    let (x, y) = generate_quadratic_data(100, 42);
    let mut model = fitted_ols(&x, &y);
    let outcome = Linearity::new(&mut model, &x, &y).unwrap().run().unwrap();

    assert_eq!(outcome.test_name, "RESET");
    assert_eq!(outcome.verdict, Verdict::Violated);
    assert!(outcome.p_value().unwrap() < 1e-10);
    assert!(outcome.interpretation.contains("Linearity"));
}

#[test]
fn test_fan_shaped_errors_violate_homoscedasticity() {
    let (x, y) = generate_heteroscedastic_data(200, 7);
    let mut model = fitted_ols(&x, &y);
    let outcome = Homoscedasticity::new(&mut model, &x, &y)
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(outcome.statistic_label, "BP");
    assert_eq!(outcome.verdict, Verdict::Violated);
    assert!(outcome.p_value().unwrap() < 1e-6);
}

#[test]
fn test_skewed_errors_violate_normality() {
    let (x, y) = generate_skewed_data(200, 5);
    let mut model = fitted_ols(&x, &y);
    let outcome = Normality::new(&mut model, &x, &y).unwrap().run().unwrap();

    assert_eq!(outcome.test_name, "Shapiro-Wilk");
    assert_eq!(outcome.verdict, Verdict::Violated);
    assert!(outcome.p_value().unwrap() < 1e-3);
}

#[test]
fn test_normality_runs_beyond_five_thousand_rows() {
    let (x, y, _) = generate_linear_data(6000, 1, 1.0, 0.5, 21);
    let mut model = fitted_ols(&x, &y);
    let outcome = Normality::new(&mut model, &x, &y).unwrap().run().unwrap();

    assert_eq!(outcome.verdict, Verdict::NotViolated);
    assert!(outcome.statistic_value() > 0.999);
    let p = outcome.p_value().unwrap();
    assert!(p > 0.05 && p <= 1.0, "p = {p}");
}

#[test]
fn test_ar1_errors_violate_independence() {
    let (x, y) = generate_ar1_data(150, 0.8, 3);
    let mut model = fitted_ols(&x, &y);
    let outcome = Independence::new(&mut model, &x, &y).unwrap().run().unwrap();

    assert_eq!(outcome.verdict, Verdict::Violated);
    assert_eq!(outcome.autocorrelation, Some(Autocorrelation::Positive));
    assert!(outcome.statistic_value() < 1.0);
    assert!(outcome.interpretation.contains("positive autocorrelation"));
}

#[test]
fn test_alternating_errors_show_negative_autocorrelation() {
    let x = Mat::from_fn(60, 1, |i, _| i as f64);
    let y = Col::from_fn(60, |i| 1.0 + 0.1 * i as f64 + if i % 2 == 0 { 0.5 } else { -0.5 });
    let mut model = fitted_ols(&x, &y);
    let outcome = Independence::new(&mut model, &x, &y).unwrap().run().unwrap();

    assert_eq!(outcome.autocorrelation, Some(Autocorrelation::Negative));
    assert!(outcome.statistic_value() > 3.5);
}

#[test]
fn test_options_are_per_checker() {
    let (x, y, _) = generate_linear_data(100, 1, 1.0, 0.5, 11);
    let mut model = fitted_ols(&x, &y);

    let strict = DiagnosticOptions::builder().alpha(0.5).build().unwrap();
    let strict_outcome = Linearity::with_options(&mut model, &x, &y, strict)
        .unwrap()
        .run()
        .unwrap();
    let default_outcome = Linearity::new(&mut model, &x, &y).unwrap().run().unwrap();

    // p ≈ 0.34 for this data: violated at 0.5, not at 0.05
    assert_eq!(strict_outcome.verdict, Verdict::Violated);
    assert_eq!(default_outcome.verdict, Verdict::NotViolated);
    assert_relative_eq!(
        strict_outcome.statistic_value(),
        default_outcome.statistic_value(),
        epsilon = 1e-12
    );
}

#[test]
fn test_narrow_durbin_watson_band() {
    let (x, y, _) = generate_linear_data(100, 1, 1.0, 0.5, 11);
    let mut model = fitted_ols(&x, &y);

    // DW ≈ 2.23 for this data
    let narrow = DiagnosticOptions::builder().dw_band(1.9, 2.1).build().unwrap();
    let outcome = Independence::with_options(&mut model, &x, &y, narrow)
        .unwrap()
        .run()
        .unwrap();
    assert_eq!(outcome.autocorrelation, Some(Autocorrelation::Negative));
}

// ============================================================================
// Plots
// ============================================================================

#[test]
fn test_plots_do_not_mutate_state() {
    let (x, y, _) = generate_linear_data(30, 2, 1.0, 0.5, 8);
    let mut model = fitted_ols(&x, &y);

    fn check_plot<C: AssumptionCheck>(check: &mut C, title: &str) {
        check.fit().unwrap();
        let before = (check.state(), check.result().cloned());
        let plot = check.plot().unwrap();
        assert_eq!(plot.axes.title, title);
        assert_eq!(plot.axes.series[0].len(), 30);
        assert_eq!(before, (check.state(), check.result().cloned()));
    }

    let mut lin = Linearity::new(&mut model, &x, &y).unwrap();
    let residuals = lin.residuals().cloned();
    check_plot(&mut lin, "Residuals vs Fitted Plot");
    let after_fit = lin.residuals().unwrap().clone();
    lin.plot().unwrap();
    assert_eq!(lin.residuals().unwrap(), &after_fit);
    assert!(residuals.is_none());
    drop(lin);

    check_plot(
        &mut Homoscedasticity::new(&mut model, &x, &y).unwrap(),
        "Scale-Location Plot",
    );
    check_plot(&mut Normality::new(&mut model, &x, &y).unwrap(), "Q-Q Plot");
    check_plot(
        &mut Independence::new(&mut model, &x, &y).unwrap(),
        "Residuals vs Order Plot",
    );
}

#[test]
fn test_plot_matches_free_function() {
    let (x, y, _) = generate_linear_data(30, 1, 1.0, 0.5, 8);
    let mut model = fitted_ols(&x, &y);
    let mut check = Normality::new(&mut model, &x, &y).unwrap();
    check.fit().unwrap();

    let from_checker = check.plot().unwrap();
    let direct = plot_assumption(
        Assumption::Normality,
        check.fitted_values().unwrap(),
        check.residuals().unwrap(),
    )
    .unwrap();
    assert_eq!(from_checker, direct);
}
