//! Rolling least-squares regression factors.
//!
//! Each trailing window of `period` values is fitted independently with a
//! line `y = slope * x + intercept` over `x = 0..period`. Windows that are not
//! yet full, or that contain a NaN, produce NaN in every output.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Regression-derived factor series, index-aligned to the input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionFactors {
    /// Fitted slope.
    pub linear_reg: Vec<f64>,
    /// `atan(slope)` in degrees.
    pub linear_reg_angle: Vec<f64>,
    /// Fitted intercept (value at the oldest point of the window).
    pub intercept: Vec<f64>,
    /// Fitted slope, identical to `linear_reg`.
    pub slope: Vec<f64>,
    /// Sample standard deviation times the multiplier.
    pub stddev: Vec<f64>,
    /// Rolling mean (time series forecast).
    pub tsf: Vec<f64>,
    /// Sample variance times the multiplier.
    pub var: Vec<f64>,
}

impl RegressionFactors {
    fn with_len(n: usize) -> Self {
        Self {
            linear_reg: vec![f64::NAN; n],
            linear_reg_angle: vec![f64::NAN; n],
            intercept: vec![f64::NAN; n],
            slope: vec![f64::NAN; n],
            stddev: vec![f64::NAN; n],
            tsf: vec![f64::NAN; n],
            var: vec![f64::NAN; n],
        }
    }
}

/// Least-squares line through `window` at x = 0, 1, ..., len - 1.
///
/// Returns `(slope, intercept)`. A flat window has slope 0.
fn fit_line(window: &[f64]) -> (f64, f64) {
    let n = window.len() as f64;
    let x_mean = (n - 1.0) / 2.0;
    let y_mean = window.mean();
    // sum of (x - x_mean)^2 over 0..n
    let sxx = n * (n * n - 1.0) / 12.0;
    let sxy: f64 = window
        .iter()
        .enumerate()
        .map(|(x, &y)| (x as f64 - x_mean) * (y - y_mean))
        .sum();
    let slope = sxy / sxx;
    (slope, y_mean - slope * x_mean)
}

/// Compute every regression factor over trailing windows of `period` rows.
///
/// The standard deviation and variance use the sample (n - 1) estimator and
/// are both scaled by `std_dev_multiplier`.
pub fn regression_factors(series: &[f64], period: usize, std_dev_multiplier: f64) -> RegressionFactors {
    let mut out = RegressionFactors::with_len(series.len());
    if period == 0 || series.len() < period {
        return out;
    }

    for (start, window) in series.windows(period).enumerate() {
        if window.iter().any(|v| v.is_nan()) {
            continue;
        }
        let t = start + period - 1;

        let (slope, intercept) = fit_line(window);
        out.linear_reg[t] = slope;
        out.slope[t] = slope;
        out.linear_reg_angle[t] = slope.atan().to_degrees();
        out.intercept[t] = intercept;

        out.tsf[t] = window.mean();
        out.var[t] = window.variance() * std_dev_multiplier;
        out.stddev[t] = window.std_dev() * std_dev_multiplier;
    }

    out
}
