//! Ordinary Least Squares regression solver.
//!
//! Used both as a ready-made estimator for diagnostics and for the auxiliary
//! regressions inside the Breusch-Pagan and RESET tests.

use crate::solvers::traits::{FittedRegressor, RegressionError, Regressor};
use crate::utils::{center_columns, center_vector, detect_constant_columns};
use faer::{Col, Mat};

/// Ordinary Least Squares regression estimator.
///
/// Uses QR decomposition with column pivoting to handle rank-deficient matrices.
/// Aliased (collinear or constant) coefficients are set to NaN and excluded
/// from predictions, so a design matrix that already carries a constant column
/// can be fit with `with_intercept(true)`.
///
/// # Example
///
/// ```rust,ignore
/// use regress_assumptions::solvers::{OlsRegressor, Regressor, FittedRegressor};
/// use faer::{Mat, Col};
///
/// let x = Mat::from_fn(100, 2, |i, j| (i + j) as f64);
/// let y = Col::from_fn(100, |i| 1.0 + 2.0 * i as f64);
///
/// let fitted = OlsRegressor::builder()
///     .with_intercept(true)
///     .build()
///     .fit(&x, &y)?;
///
/// println!("R² = {}", fitted.r_squared());
/// ```
#[derive(Debug, Clone)]
pub struct OlsRegressor {
    with_intercept: bool,
    rank_tolerance: f64,
}

impl Default for OlsRegressor {
    fn default() -> Self {
        Self {
            with_intercept: true,
            rank_tolerance: 1e-10,
        }
    }
}

impl OlsRegressor {
    /// Create a builder for configuring the regressor.
    pub fn builder() -> OlsRegressorBuilder {
        OlsRegressorBuilder::default()
    }

    /// Whether an intercept is estimated.
    pub fn with_intercept(&self) -> bool {
        self.with_intercept
    }
}

impl Regressor for OlsRegressor {
    type Fitted = FittedOls;

    fn fit(&self, x: &Mat<f64>, y: &Col<f64>) -> Result<Self::Fitted, RegressionError> {
        let n_samples = x.nrows();
        let n_features = x.ncols();

        if x.nrows() != y.nrows() {
            return Err(RegressionError::DimensionMismatch {
                x_rows: x.nrows(),
                y_len: y.nrows(),
            });
        }

        if n_samples < 2 {
            return Err(RegressionError::InsufficientObservations {
                needed: 2,
                got: n_samples,
            });
        }

        let constant_cols = detect_constant_columns(x, self.rank_tolerance);

        let (coefficients, intercept, aliased, rank) = if self.with_intercept {
            let (x_centered, x_means) = center_columns(x);
            let (y_centered, y_mean) = center_vector(y);

            let (coefficients, aliased, rank) =
                self.solve_with_qr(&x_centered, &y_centered, &constant_cols);

            // intercept = y_mean - x_means' * coefficients
            let mut intercept = y_mean;
            for j in 0..n_features {
                if !aliased[j] {
                    intercept -= x_means[j] * coefficients[j];
                }
            }
            (coefficients, Some(intercept), aliased, rank)
        } else {
            if constant_cols.iter().all(|&c| c) && n_features > 0 {
                // Without an intercept a constant column is a legitimate regressor.
                let no_constants = vec![false; n_features];
                let (coefficients, aliased, rank) = self.solve_with_qr(x, y, &no_constants);
                (coefficients, None, aliased, rank)
            } else {
                let (coefficients, aliased, rank) = self.solve_with_qr(x, y, &constant_cols);
                (coefficients, None, aliased, rank)
            }
        };

        let n_parameters = rank + usize::from(intercept.is_some());
        if n_parameters == 0 {
            return Err(RegressionError::AllFeaturesConstant);
        }

        let non_finite = intercept.is_some_and(|b| !b.is_finite())
            || (0..n_features).any(|j| !aliased[j] && !coefficients[j].is_finite());
        if non_finite {
            return Err(RegressionError::NumericalError(
                "least squares solution is not finite".to_string(),
            ));
        }

        let mut fitted = FittedOls {
            coefficients,
            intercept,
            aliased,
            rank,
            n_parameters,
            fitted_values: Col::zeros(n_samples),
            residuals: Col::zeros(n_samples),
            rss: 0.0,
            tss: 0.0,
        };

        let fitted_values = fitted.predict(x);
        let residuals = Col::from_fn(n_samples, |i| y[i] - fitted_values[i]);

        fitted.rss = residuals.iter().map(|&r| r * r).sum();
        fitted.tss = if fitted.intercept.is_some() {
            let (y_centered, _) = center_vector(y);
            y_centered.iter().map(|&v| v * v).sum()
        } else {
            y.iter().map(|&v| v * v).sum()
        };
        fitted.fitted_values = fitted_values;
        fitted.residuals = residuals;

        Ok(fitted)
    }
}

impl OlsRegressor {
    /// Solve the least squares problem using QR decomposition with column pivoting.
    fn solve_with_qr(
        &self,
        x: &Mat<f64>,
        y: &Col<f64>,
        constant_cols: &[bool],
    ) -> (Col<f64>, Vec<bool>, usize) {
        let n_features = x.ncols();
        let n_samples = x.nrows();

        let mut aliased = constant_cols.to_vec();

        let qr = x.col_piv_qr();
        let q = qr.compute_Q();
        let r = qr.R();
        let perm = qr.P();

        // perm_inv[j] = where original column j ended up
        let perm_arr = perm.arrays().0;
        let mut perm_inv: Vec<usize> = vec![0; n_features];
        perm_inv[..n_features].copy_from_slice(&perm_arr[..n_features]);

        // Numerical rank from the R diagonal
        let mut rank = 0;
        for i in 0..n_features.min(n_samples) {
            if r[(i, i)].abs() > self.rank_tolerance {
                rank += 1;
            } else {
                break;
            }
        }

        if rank == 0 {
            let coefficients = Col::from_fn(n_features, |_| f64::NAN);
            return (coefficients, vec![true; n_features], 0);
        }

        for j in 0..n_features {
            if constant_cols[j] || perm_inv[j] >= rank {
                aliased[j] = true;
            }
        }

        // Solve R * beta_perm = Q' * y for the non-aliased part
        let qty = q.transpose() * y;

        let mut beta_reduced = Col::zeros(rank);
        for i in (0..rank).rev() {
            let mut sum = qty[i];
            for j in (i + 1)..rank {
                sum -= r[(i, j)] * beta_reduced[j];
            }
            beta_reduced[i] = sum / r[(i, i)];
        }

        let coefficients = Col::from_fn(n_features, |j| {
            if aliased[j] {
                f64::NAN
            } else {
                beta_reduced[perm_inv[j]]
            }
        });

        // Columns the pivoting kept but the constant mask dropped do not count.
        let rank = aliased.iter().filter(|&&a| !a).count();

        (coefficients, aliased, rank)
    }
}

/// A fitted OLS regression model.
#[derive(Debug, Clone)]
pub struct FittedOls {
    coefficients: Col<f64>,
    intercept: Option<f64>,
    aliased: Vec<bool>,
    rank: usize,
    n_parameters: usize,
    fitted_values: Col<f64>,
    residuals: Col<f64>,
    rss: f64,
    tss: f64,
}

impl FittedOls {
    /// Which coefficients are aliased (collinear or constant).
    pub fn aliased(&self) -> &[bool] {
        &self.aliased
    }

    /// Numerical rank of the (centered) design matrix.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Number of estimated parameters, including the intercept.
    pub fn n_parameters(&self) -> usize {
        self.n_parameters
    }

    /// In-sample fitted values.
    pub fn fitted_values(&self) -> &Col<f64> {
        &self.fitted_values
    }

    /// In-sample residuals (y - fitted).
    pub fn residuals(&self) -> &Col<f64> {
        &self.residuals
    }

    /// Residual sum of squares.
    pub fn rss(&self) -> f64 {
        self.rss
    }

    /// Total sum of squares (centered when an intercept is present).
    pub fn tss(&self) -> f64 {
        self.tss
    }

    /// Explained sum of squares, TSS - RSS.
    pub fn ess(&self) -> f64 {
        self.tss - self.rss
    }

    /// Coefficient of determination (R²).
    pub fn r_squared(&self) -> f64 {
        if self.tss > 0.0 {
            (1.0 - self.rss / self.tss).clamp(0.0, 1.0)
        } else if self.rss < 1e-10 {
            1.0
        } else {
            0.0
        }
    }
}

impl FittedRegressor for FittedOls {
    fn predict(&self, x: &Mat<f64>) -> Col<f64> {
        let intercept = self.intercept.unwrap_or(0.0);

        Col::from_fn(x.nrows(), |i| {
            let mut pred = intercept;
            for j in 0..x.ncols().min(self.coefficients.nrows()) {
                if !self.aliased[j] {
                    pred += x[(i, j)] * self.coefficients[j];
                }
            }
            pred
        })
    }

    fn coefficients(&self) -> &Col<f64> {
        &self.coefficients
    }

    fn intercept(&self) -> Option<f64> {
        self.intercept
    }
}

/// Builder for `OlsRegressor`.
#[derive(Debug, Clone, Default)]
pub struct OlsRegressorBuilder {
    regressor: OlsRegressor,
}

impl OlsRegressorBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to include an intercept term.
    pub fn with_intercept(mut self, include: bool) -> Self {
        self.regressor.with_intercept = include;
        self
    }

    /// Set the rank tolerance for QR decomposition.
    pub fn rank_tolerance(mut self, tol: f64) -> Self {
        self.regressor.rank_tolerance = tol;
        self
    }

    /// Build the OLS regressor.
    pub fn build(self) -> OlsRegressor {
        self.regressor
    }
}
