//! Backend-neutral diagnostic plots.
//!
//! A plot is plain data: a [`Figure`] with one [`Axes`] holding point series,
//! reference lines, labels and a title. Drawing is left to a [`Renderer`];
//! the crate ships only [`SummaryRenderer`], which describes a plot as text.

use crate::core::{Assumption, DiagnosticError, DiagnosticResult};
use crate::diagnostics::{qq_points, qq_reference_line, sqrt_abs_standardized};
use faer::Col;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Default figure size in inches (width, height).
pub const FIGURE_SIZE: (f64, f64) = (8.0, 6.0);

/// Marker opacity of scatter series.
pub const SCATTER_ALPHA: f64 = 0.5;

/// Figure-level properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub width: f64,
    pub height: f64,
}

impl Default for Figure {
    fn default() -> Self {
        Self {
            width: FIGURE_SIZE.0,
            height: FIGURE_SIZE.1,
        }
    }
}

/// Stroke style of a reference line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// A straight line drawn across the axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ReferenceLine {
    /// y = value
    Horizontal { y: f64, style: LineStyle },
    /// y = intercept + slope * x
    Sloped {
        slope: f64,
        intercept: f64,
        style: LineStyle,
    },
}

impl ReferenceLine {
    /// Ordinate of the line at `x`.
    pub fn at(&self, x: f64) -> f64 {
        match *self {
            ReferenceLine::Horizontal { y, .. } => y,
            ReferenceLine::Sloped {
                slope, intercept, ..
            } => intercept + slope * x,
        }
    }
}

/// Scatter points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub alpha: f64,
}

impl Series {
    fn scatter(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            x,
            y,
            alpha: SCATTER_ALPHA,
        }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the series has no points.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Coordinates, labels and title of a single panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axes {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
    pub reference_lines: Vec<ReferenceLine>,
}

/// Drawable handle returned by every checker's `plot()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotHandle {
    pub assumption: Assumption,
    pub figure: Figure,
    pub axes: Axes,
}

/// Turns a [`PlotHandle`] into some backend-specific output.
pub trait Renderer {
    type Output;
    type Error;

    fn render(&mut self, plot: &PlotHandle) -> Result<Self::Output, Self::Error>;
}

/// Build the diagnostic plot for `assumption`.
///
/// | Assumption | Plot |
/// |---|---|
/// | Linearity | residuals vs fitted, dashed zero line |
/// | Homoscedasticity | √\|standardized residuals\| vs fitted |
/// | Normality | normal Q-Q plot with a standardized reference line |
/// | Independence | residuals vs observation order (1-based) |
///
/// Fails with `InvalidArray` when `fitted` and `residuals` differ in length.
pub fn plot_assumption(
    assumption: Assumption,
    fitted: &Col<f64>,
    residuals: &Col<f64>,
) -> DiagnosticResult<PlotHandle> {
    if fitted.nrows() != residuals.nrows() {
        return Err(DiagnosticError::invalid_array(
            "residuals",
            format!(
                "{} residuals for {} fitted values",
                residuals.nrows(),
                fitted.nrows()
            ),
        ));
    }

    let fitted_vec: Vec<f64> = fitted.iter().copied().collect();
    let residual_vec: Vec<f64> = residuals.iter().copied().collect();

    let axes = match assumption {
        Assumption::Linearity => Axes {
            title: "Residuals vs Fitted Plot".to_string(),
            x_label: "Fitted Values".to_string(),
            y_label: "Residuals".to_string(),
            series: vec![Series::scatter(fitted_vec, residual_vec)],
            reference_lines: vec![ReferenceLine::Horizontal {
                y: 0.0,
                style: LineStyle::Dashed,
            }],
        },
        Assumption::Homoscedasticity => {
            let scale: Vec<f64> = sqrt_abs_standardized(residuals).iter().copied().collect();
            Axes {
                title: "Scale-Location Plot".to_string(),
                x_label: "Fitted Values".to_string(),
                y_label: "Sqrt(|Standardized Residuals|)".to_string(),
                series: vec![Series::scatter(fitted_vec, scale)],
                reference_lines: Vec::new(),
            }
        }
        Assumption::Normality => {
            let (theoretical, sample) = qq_points(residuals);
            let (slope, intercept) = qq_reference_line(residuals);
            Axes {
                title: "Q-Q Plot".to_string(),
                x_label: "Theoretical Quantiles".to_string(),
                y_label: "Sample Quantiles".to_string(),
                series: vec![Series::scatter(theoretical, sample)],
                reference_lines: vec![ReferenceLine::Sloped {
                    slope,
                    intercept,
                    style: LineStyle::Solid,
                }],
            }
        }
        Assumption::Independence => {
            let order: Vec<f64> = (1..=residual_vec.len()).map(|i| i as f64).collect();
            Axes {
                title: "Residuals vs Order Plot".to_string(),
                x_label: "Observation Order".to_string(),
                y_label: "Residuals".to_string(),
                series: vec![Series::scatter(order, residual_vec)],
                reference_lines: Vec::new(),
            }
        }
    };

    Ok(PlotHandle {
        assumption,
        figure: Figure::default(),
        axes,
    })
}

/// Describes a plot in a few lines of text (title, axis labels and ranges).
#[derive(Debug, Default, Clone, Copy)]
pub struct SummaryRenderer;

impl Renderer for SummaryRenderer {
    type Output = String;
    type Error = std::fmt::Error;

    fn render(&mut self, plot: &PlotHandle) -> Result<String, std::fmt::Error> {
        let axes = &plot.axes;
        let mut out = String::new();
        writeln!(
            out,
            "{} ({}x{} in)",
            axes.title, plot.figure.width, plot.figure.height
        )?;
        for series in &axes.series {
            let (x_lo, x_hi) = range(&series.x);
            let (y_lo, y_hi) = range(&series.y);
            writeln!(out, "  {} points", series.len())?;
            writeln!(out, "  x: {} [{x_lo:.4}, {x_hi:.4}]", axes.x_label)?;
            writeln!(out, "  y: {} [{y_lo:.4}, {y_hi:.4}]", axes.y_label)?;
        }
        for line in &axes.reference_lines {
            match line {
                ReferenceLine::Horizontal { y, .. } => writeln!(out, "  reference: y = {y}")?,
                ReferenceLine::Sloped {
                    slope, intercept, ..
                } => writeln!(out, "  reference: y = {intercept:.4} + {slope:.4}x")?,
            }
        }
        Ok(out)
    }
}

fn range(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> (Col<f64>, Col<f64>) {
        let fitted = Col::from_fn(5, |i| i as f64);
        let residuals = Col::from_fn(5, |i| [0.5, -1.0, 0.0, 1.5, -1.0][i]);
        (fitted, residuals)
    }

    #[test]
    fn test_linearity_plot() {
        let (fitted, residuals) = sample();
        let plot = plot_assumption(Assumption::Linearity, &fitted, &residuals).unwrap();

        assert_eq!(plot.axes.title, "Residuals vs Fitted Plot");
        assert_eq!(plot.axes.x_label, "Fitted Values");
        assert_eq!(plot.axes.series[0].y, vec![0.5, -1.0, 0.0, 1.5, -1.0]);
        assert_eq!(
            plot.axes.reference_lines,
            vec![ReferenceLine::Horizontal {
                y: 0.0,
                style: LineStyle::Dashed
            }]
        );
    }

    #[test]
    fn test_scale_location_plot() {
        let (fitted, residuals) = sample();
        let plot = plot_assumption(Assumption::Homoscedasticity, &fitted, &residuals).unwrap();

        assert_eq!(plot.axes.title, "Scale-Location Plot");
        assert_eq!(plot.axes.y_label, "Sqrt(|Standardized Residuals|)");
        // mean 0, population variance 4.5 / 5
        let std = 0.9_f64.sqrt();
        assert_relative_eq!(plot.axes.series[0].y[3], (1.5 / std).sqrt(), epsilon = 1e-12);
        assert!(plot.axes.series[0].y.iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn test_qq_plot() {
        let (fitted, residuals) = sample();
        let plot = plot_assumption(Assumption::Normality, &fitted, &residuals).unwrap();

        assert_eq!(plot.axes.title, "Q-Q Plot");
        let series = &plot.axes.series[0];
        assert_eq!(series.y, vec![-1.0, -1.0, 0.0, 0.5, 1.5]);
        assert!(series.x.windows(2).all(|w| w[0] < w[1]));
        assert_relative_eq!(plot.axes.reference_lines[0].at(0.0), 0.0, epsilon = 1e-12);
        assert_relative_eq!(plot.axes.reference_lines[0].at(1.0), 0.9_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_order_plot() {
        let (fitted, residuals) = sample();
        let plot = plot_assumption(Assumption::Independence, &fitted, &residuals).unwrap();

        assert_eq!(plot.axes.title, "Residuals vs Order Plot");
        assert_eq!(plot.axes.x_label, "Observation Order");
        assert_eq!(plot.axes.series[0].x, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_length_mismatch() {
        let fitted = Col::from_fn(4, |i| i as f64);
        let residuals = Col::from_fn(3, |i| i as f64);
        let err = plot_assumption(Assumption::Linearity, &fitted, &residuals).unwrap_err();
        assert_eq!(err.argument(), Some("residuals"));
    }

    #[test]
    fn test_summary_renderer() {
        let (fitted, residuals) = sample();
        let plot = plot_assumption(Assumption::Linearity, &fitted, &residuals).unwrap();
        let text = SummaryRenderer.render(&plot).unwrap();

        assert!(text.starts_with("Residuals vs Fitted Plot (8x6 in)"));
        assert!(text.contains("5 points"));
        assert!(text.contains("reference: y = 0"));
    }
}
