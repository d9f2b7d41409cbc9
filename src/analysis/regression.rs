//! Ordinary least squares line fitting.
//!
//! Closed-form simple linear regression of `y` on `x`, reporting the same
//! quantities as a typical `linregress` routine: slope, intercept, Pearson
//! r and the standard error of the slope.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a line cannot be fitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FitError {
    #[error("x and y have different lengths ({x} vs {y})")]
    LengthMismatch { x: usize, y: usize },

    #[error("{0} point(s) given; at least 2 are needed")]
    InsufficientData(usize),

    #[error("all x values are identical")]
    ConstantX,

    #[error("values are too large to fit a finite line")]
    Overflow,
}

/// Result of fitting `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineFit {
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation coefficient.
    pub r_value: f64,
    /// Standard error of the slope estimate.
    pub stderr: f64,
    /// Number of points used.
    pub n: usize,
}

impl LineFit {
    /// Predicted y at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Coefficient of determination.
    pub fn r_squared(&self) -> f64 {
        self.r_value * self.r_value
    }
}

/// Fit an OLS line through `(xs[i], ys[i])`.
pub fn fit_line(xs: &[f64], ys: &[f64]) -> Result<LineFit, FitError> {
    if xs.len() != ys.len() {
        return Err(FitError::LengthMismatch {
            x: xs.len(),
            y: ys.len(),
        });
    }

    let n = xs.len();
    if n < 2 {
        return Err(FitError::InsufficientData(n));
    }

    // Compare against the first value rather than testing Sxx == 0; the
    // mean of identical floats is not always bit-identical to them.
    if xs.iter().all(|&x| x == xs[0]) {
        return Err(FitError::ConstantX);
    }

    let nf = n as f64;
    let x_mean = xs.iter().sum::<f64>() / nf;
    let y_mean = ys.iter().sum::<f64>() / nf;

    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - x_mean;
        let dy = y - y_mean;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;
    if !slope.is_finite() || !intercept.is_finite() {
        return Err(FitError::Overflow);
    }

    let r_value = if syy == 0.0 {
        0.0
    } else {
        (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0)
    };

    let stderr = if n > 2 {
        let df = (n - 2) as f64;
        ((1.0 - r_value * r_value) * syy / sxx / df).max(0.0).sqrt()
    } else {
        0.0
    };

    Ok(LineFit {
        slope,
        intercept,
        r_value,
        stderr,
        n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-10;

    #[test]
    fn test_exact_line() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x + 1.0).collect();

        let fit = fit_line(&xs, &ys).unwrap();
        assert!((fit.slope - 2.0).abs() < EPS);
        assert!((fit.intercept - 1.0).abs() < EPS);
        assert!((fit.r_value - 1.0).abs() < EPS);
        assert!(fit.stderr.abs() < 1e-6);
        assert_eq!(fit.n, 5);
    }

    #[test]
    fn test_negative_slope_with_noise() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [4.1, 2.9, 2.1, 0.9];

        let fit = fit_line(&xs, &ys).unwrap();
        assert!((fit.slope - (-1.04)).abs() < 1e-9);
        assert!((fit.intercept - 5.1).abs() < 1e-9);
        assert!(fit.r_value < -0.99);
        assert!(fit.stderr > 0.0);
    }

    #[test]
    fn test_two_points() {
        let fit = fit_line(&[1.0, 3.0], &[1.0, 3.0]).unwrap();
        assert!((fit.slope - 1.0).abs() < EPS);
        assert!(fit.intercept.abs() < EPS);
        assert_eq!(fit.stderr, 0.0);
    }

    #[test]
    fn test_flat_y() {
        let fit = fit_line(&[1.0, 2.0, 3.0], &[5.0, 5.0, 5.0]).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.intercept, 5.0);
        assert_eq!(fit.r_value, 0.0);
    }

    #[test]
    fn test_predict() {
        let fit = fit_line(&[0.0, 1.0], &[1.0, 3.0]).unwrap();
        assert!((fit.predict(10.0) - 21.0).abs() < EPS);
    }

    #[test]
    fn test_single_point() {
        assert_eq!(
            fit_line(&[1.0], &[2.0]),
            Err(FitError::InsufficientData(1))
        );
    }

    #[test]
    fn test_constant_x() {
        assert_eq!(
            fit_line(&[0.1, 0.1, 0.1], &[1.0, 2.0, 3.0]),
            Err(FitError::ConstantX)
        );
    }

    #[test]
    fn test_overflowing_sums_are_rejected() {
        assert_eq!(
            fit_line(&[0.0, 1e200], &[0.0, 1e200]),
            Err(FitError::Overflow)
        );
    }

    #[test]
    fn test_large_but_representable_values() {
        let fit = fit_line(&[0.0, 1e150], &[0.0, 2e150]).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-9);
        assert!((fit.r_value - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_length_mismatch() {
        assert!(matches!(
            fit_line(&[1.0, 2.0], &[1.0]),
            Err(FitError::LengthMismatch { x: 2, y: 1 })
        ));
    }
}
