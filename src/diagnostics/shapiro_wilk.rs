//! Shapiro-Wilk test for normality of residuals.

use faer::Col;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

/// Result of the Shapiro-Wilk normality test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapiroWilkResult {
    /// The W statistic (0 < W <= 1). Values close to 1 suggest normality.
    pub w: f64,
    /// The p-value. Small values reject normality.
    pub p_value: f64,
}

/// Shapiro-Wilk normality test: H0 is that the residuals are normally distributed.
///
/// Uses Royston's approximation (AS R94): coefficients from Blom's normal
/// order statistics with polynomial corrections, then a normalizing
/// transformation of W for the p-value. n = 3 uses the exact distribution.
///
/// # Returns
/// `None` if n < 3, the values are all identical, or any value is
/// non-finite. Above 5000 observations the p-value approximation is less
/// accurate but still computed.
pub fn shapiro_wilk(residuals: &Col<f64>) -> Option<ShapiroWilkResult> {
    let n = residuals.nrows();
    if n < 3 || residuals.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let mut x: Vec<f64> = residuals.iter().copied().collect();
    x.sort_by(|a, b| a.total_cmp(b));

    if x[n - 1] - x[0] <= 0.0 {
        return None;
    }

    if n == 3 {
        return shapiro_wilk_n3(&x);
    }

    let std_normal = Normal::new(0.0, 1.0).ok()?;
    let a = coefficients(n, &std_normal)?;
    let w = statistic(&x, &a);
    if !(0.0..=1.0 + 1e-10).contains(&w) {
        return None;
    }
    let w = w.min(1.0);

    Some(ShapiroWilkResult {
        w,
        p_value: p_value(w, n, &std_normal).clamp(0.0, 1.0),
    })
}

// Exact distribution for n = 3: a = [1/sqrt(2), 0, -1/sqrt(2)].
fn shapiro_wilk_n3(x: &[f64]) -> Option<ShapiroWilkResult> {
    let mean = x.iter().sum::<f64>() / 3.0;
    let ss: f64 = x.iter().map(|&v| (v - mean).powi(2)).sum();
    if ss <= 0.0 {
        return None;
    }

    let numerator = std::f64::consts::FRAC_1_SQRT_2 * (x[2] - x[0]);
    let w = (numerator * numerator / ss).clamp(0.75, 1.0);
    let p = 1.0 - (6.0 / std::f64::consts::PI) * w.sqrt().acos();

    Some(ShapiroWilkResult {
        w,
        p_value: p.clamp(0.0, 1.0),
    })
}

// Royston polynomial coefficients (AS R94), lowest order first.
const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.07119, 4.434685, -2.706056];
const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const C3: [f64; 4] = [0.544, -0.39978, 0.025054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];
const G: [f64; 2] = [-2.273, 0.459];

fn poly(c: &[f64], x: f64) -> f64 {
    c.iter().rev().fold(0.0, |acc, &ci| acc * x + ci)
}

// Coefficients for the lower half of the order statistics, positive and
// decreasing from the extremes inward.
fn coefficients(n: usize, std_normal: &Normal) -> Option<Vec<f64>> {
    let nn2 = n / 2;
    let an25 = n as f64 + 0.25;

    // Blom's approximation; m[i] < 0 for the lower half.
    let m: Vec<f64> = (0..nn2)
        .map(|i| std_normal.inverse_cdf((i as f64 + 1.0 - 0.375) / an25))
        .collect();
    let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / (n as f64).sqrt();

    let a1 = poly(&C1, rsn) - m[0] / ssumm2;
    let mut a = vec![0.0; nn2];

    let (corrected, fac) = if n > 5 {
        let a2 = poly(&C2, rsn) - m[1] / ssumm2;
        let fac_sq = summ2 - 2.0 * m[0] * m[0] - 2.0 * m[1] * m[1];
        let one_minus = 1.0 - 2.0 * a1 * a1 - 2.0 * a2 * a2;
        a[1] = a2;
        (2, fac_sq / one_minus)
    } else {
        let fac_sq = summ2 - 2.0 * m[0] * m[0];
        let one_minus = 1.0 - 2.0 * a1 * a1;
        (1, fac_sq / one_minus)
    };
    if !(fac > 0.0) {
        return None;
    }
    let fac = fac.sqrt();

    a[0] = a1;
    for i in corrected..nn2 {
        a[i] = -m[i] / fac;
    }
    Some(a)
}

fn statistic(x: &[f64], a: &[f64]) -> f64 {
    let n = x.len();
    let sa: f64 = a
        .iter()
        .enumerate()
        .map(|(i, &ai)| ai * (x[n - 1 - i] - x[i]))
        .sum();

    let mean = x.iter().sum::<f64>() / n as f64;
    let ss: f64 = x.iter().map(|&v| (v - mean).powi(2)).sum();

    (sa * sa) / ss
}

fn p_value(w: f64, n: usize, std_normal: &Normal) -> f64 {
    let nf = n as f64;
    let w1 = 1.0 - w;
    if w1 <= 0.0 {
        return 1.0;
    }
    let y = w1.ln();

    let z = if n <= 11 {
        let gamma = poly(&G, nf);
        if y >= gamma {
            return 0.0;
        }
        let y2 = -(gamma - y).ln();
        let m = poly(&C3, nf);
        let s = poly(&C4, nf).exp();
        (y2 - m) / s
    } else {
        let ln_n = nf.ln();
        let m = poly(&C5, ln_n);
        let s = poly(&C6, ln_n).exp();
        (y - m) / s
    };

    1.0 - std_normal.cdf(z)
}
