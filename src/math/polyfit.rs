//! Degree-1 polynomial fit with a parameter covariance matrix.
//!
//! Coefficients are ordered highest power first (`[slope, intercept]`). The
//! covariance is the unscaled `(XᵀX)⁻¹` multiplied by the residual variance
//! `S_res / (n − 2)`, so the standard errors are the square roots of its
//! diagonal.
//!
//! The system is solved on x shifted to its mean and mapped back to the
//! original x, so offset data keep a well-conditioned `XᵀX`.

use nalgebra::{DMatrix, DVector, Matrix2};

use crate::domain::Sample;
use crate::error::FitError;
use crate::math::ols::{residual_sum_of_squares, solve_least_squares};

/// Result of a degree-1 polynomial least squares fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolyLine {
    pub slope: f64,
    pub intercept: f64,
    pub sse: f64,
    /// Covariance of `[slope, intercept]`.
    pub covariance: Matrix2<f64>,
}

impl PolyLine {
    pub fn slope_error(&self) -> f64 {
        self.covariance[(0, 0)].max(0.0).sqrt()
    }

    pub fn intercept_error(&self) -> f64 {
        self.covariance[(1, 1)].max(0.0).sqrt()
    }
}

/// Fit `y = slope·x + intercept` via the design matrix `[x 1]`.
///
/// Requires at least 3 samples since the residual variance has `n − 2`
/// degrees of freedom.
pub fn polyfit_linear(samples: &[Sample]) -> Result<PolyLine, FitError> {
    let n = samples.len();
    if n < 3 {
        return Err(FitError::InsufficientData { needed: 3, got: n });
    }

    let origin = samples.iter().map(|s| s.x).sum::<f64>() / n as f64;
    let design = DMatrix::from_fn(n, 2, |i, j| if j == 0 { samples[i].x - origin } else { 1.0 });
    let y = DVector::from_iterator(n, samples.iter().map(|s| s.y));

    let xtx = design.transpose() * &design;
    let xtx = Matrix2::new(xtx[(0, 0)], xtx[(0, 1)], xtx[(1, 0)], xtx[(1, 1)]);
    let unscaled = xtx.try_inverse().ok_or(FitError::DegenerateFit)?;
    if !unscaled.iter().all(|v| v.is_finite()) {
        return Err(FitError::DegenerateFit);
    }

    let beta = solve_least_squares(&design, &y).ok_or(FitError::DegenerateFit)?;
    let slope = beta[0];
    let intercept = beta[1] - slope * origin;

    // intercept = b' − origin·slope, so Cov = J·Cov'·Jᵀ.
    let shift = Matrix2::new(1.0, 0.0, -origin, 1.0);
    let sse = residual_sum_of_squares(samples, slope, intercept);
    let covariance = shift * unscaled * shift.transpose() * (sse / (n - 2) as f64);

    Ok(PolyLine {
        slope,
        intercept,
        sse,
        covariance,
    })
}
