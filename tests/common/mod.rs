//! Common test utilities and data generators.

#![allow(dead_code)]

use faer::{Col, Mat};
use regress_assumptions::solvers::{Estimator, EstimatorKind, RegressionError};

/// Deterministic uniform draws in [-1, 1).
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn uniform(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((self.0 >> 33) as f64) / (1u64 << 31) as f64 * 2.0 - 1.0
    }

    /// Approximately standard normal: sum of 12 uniforms on [0, 1) minus 6.
    pub fn normal(&mut self) -> f64 {
        (0..12).map(|_| (self.uniform() + 1.0) / 2.0).sum::<f64>() - 6.0
    }

    pub fn normals(&mut self, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.normal()).collect()
    }
}

/// Generate simple linear data: y = x * beta + intercept + noise
pub fn generate_linear_data(
    n_samples: usize,
    n_features: usize,
    intercept: f64,
    noise_std: f64,
    seed: u64,
) -> (Mat<f64>, Col<f64>, Col<f64>) {
    let mut rng = Lcg::new(seed);

    let mut x = Mat::zeros(n_samples, n_features);
    let mut y = Col::zeros(n_samples);
    let true_coefficients = Col::from_fn(n_features, |j| (j + 1) as f64);

    for i in 0..n_samples {
        let mut yi = intercept;
        for j in 0..n_features {
            x[(i, j)] = rng.uniform();
            yi += x[(i, j)] * true_coefficients[j];
        }
        yi += noise_std * rng.normal();
        y[i] = yi;
    }

    (x, y, true_coefficients)
}

/// y = 1 + x + 2x² + noise, fitted later with a straight line.
pub fn generate_quadratic_data(n_samples: usize, seed: u64) -> (Mat<f64>, Col<f64>) {
    let e = Lcg::new(seed).normals(n_samples);
    let x = Mat::from_fn(n_samples, 1, |i, _| i as f64 / n_samples as f64 * 4.0 - 2.0);
    let y = Col::from_fn(n_samples, |i| {
        let xi = x[(i, 0)];
        1.0 + xi + 2.0 * xi * xi + 0.1 * e[i]
    });
    (x, y)
}

/// Linear mean with error spread proportional to x.
pub fn generate_heteroscedastic_data(n_samples: usize, seed: u64) -> (Mat<f64>, Col<f64>) {
    let e = Lcg::new(seed).normals(n_samples);
    let x = Mat::from_fn(n_samples, 1, |i, _| 1.0 + i as f64 / 10.0);
    let y = Col::from_fn(n_samples, |i| {
        let xi = x[(i, 0)];
        2.0 + 0.5 * xi + xi * e[i]
    });
    (x, y)
}

/// Linear mean with AR(1) errors, e_t = rho * e_{t-1} + u_t.
pub fn generate_ar1_data(n_samples: usize, rho: f64, seed: u64) -> (Mat<f64>, Col<f64>) {
    let u = Lcg::new(seed).normals(n_samples);
    let mut e = vec![0.0; n_samples];
    for t in 0..n_samples {
        let prev = if t == 0 { 0.0 } else { e[t - 1] };
        e[t] = rho * prev + u[t];
    }
    let x = Mat::from_fn(n_samples, 1, |i, _| i as f64 / 10.0);
    let y = Col::from_fn(n_samples, |i| 1.0 + 2.0 * x[(i, 0)] + e[i]);
    (x, y)
}

/// Linear mean with heavily skewed (exponential) errors.
pub fn generate_skewed_data(n_samples: usize, seed: u64) -> (Mat<f64>, Col<f64>) {
    let mut rng = Lcg::new(seed);
    let u: Vec<f64> = (0..n_samples).map(|_| (rng.uniform() + 1.0) / 2.0).collect();
    let x = Mat::from_fn(n_samples, 1, |i, _| i as f64 / 10.0);
    let y = Col::from_fn(n_samples, |i| 1.0 + 2.0 * x[(i, 0)] - (1.0 - u[i]).max(1e-12).ln());
    (x, y)
}

/// Fitted estimator that solves a classification task.
pub struct ClassifierProbe;

impl Estimator for ClassifierProbe {
    fn kind(&self) -> EstimatorKind {
        EstimatorKind::Classifier
    }

    fn fit(&mut self, _x: &Mat<f64>, _y: &Col<f64>) -> Result<(), RegressionError> {
        Ok(())
    }

    fn predict(&self, x: &Mat<f64>) -> Result<Col<f64>, RegressionError> {
        Ok(Col::zeros(x.nrows()))
    }

    fn is_fitted(&self) -> bool {
        true
    }
}

/// Regressor that memorizes the training target and predicts it back, so
/// every residual is exactly zero. Counts calls to `fit`.
#[derive(Default)]
pub struct OracleRegressor {
    target: Option<Col<f64>>,
    pub fit_calls: usize,
}

impl OracleRegressor {
    pub fn fitted_on(y: &Col<f64>) -> Self {
        Self {
            target: Some(y.clone()),
            fit_calls: 0,
        }
    }
}

impl Estimator for OracleRegressor {
    fn kind(&self) -> EstimatorKind {
        EstimatorKind::Regressor
    }

    fn fit(&mut self, _x: &Mat<f64>, y: &Col<f64>) -> Result<(), RegressionError> {
        self.fit_calls += 1;
        self.target = Some(y.clone());
        Ok(())
    }

    fn predict(&self, x: &Mat<f64>) -> Result<Col<f64>, RegressionError> {
        let target = self.target.as_ref().ok_or(RegressionError::NotFitted)?;
        if target.nrows() != x.nrows() {
            return Err(RegressionError::DimensionMismatch {
                x_rows: x.nrows(),
                y_len: target.nrows(),
            });
        }
        Ok(target.clone())
    }

    fn is_fitted(&self) -> bool {
        self.target.is_some()
    }
}

/// Regressor whose predictions drop the last observation.
pub struct TruncatingRegressor;

impl Estimator for TruncatingRegressor {
    fn kind(&self) -> EstimatorKind {
        EstimatorKind::Regressor
    }

    fn fit(&mut self, _x: &Mat<f64>, _y: &Col<f64>) -> Result<(), RegressionError> {
        Ok(())
    }

    fn predict(&self, x: &Mat<f64>) -> Result<Col<f64>, RegressionError> {
        Ok(Col::zeros(x.nrows().saturating_sub(1)))
    }

    fn is_fitted(&self) -> bool {
        true
    }
}
