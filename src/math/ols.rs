//! Least squares building blocks.
//!
//! A straight line `y = slope·x + intercept` can be fitted two ways:
//!
//! ```text
//! closed form:  slope = (n·Sxy − Sx·Sy) / (n·Sxx − Sx²)
//! matrix form:  minimize ‖X β − y‖²,  X = [x 1]
//! ```
//!
//! `LinearSums` holds the running sums for the closed form, taken over x
//! shifted to its mean so that a large common offset in x does not cancel
//! away the spread. The matrix form is solved with SVD so that tall design
//! matrices (more rows than columns) are handled without special casing.
//! (Nalgebra's `QR::solve` is intended for square systems and will panic for
//! non-square matrices.)

use nalgebra::{DMatrix, DVector};

use crate::domain::Sample;

/// Sums over a sample set, with x measured from `origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearSums {
    pub n: usize,
    /// Mean x of the samples (0 for an empty set).
    pub origin: f64,
    pub sx: f64,
    pub sy: f64,
    pub sxy: f64,
    pub sxx: f64,
}

impl LinearSums {
    pub fn from_samples(samples: &[Sample]) -> Self {
        let origin = if samples.is_empty() {
            0.0
        } else {
            samples.iter().map(|s| s.x).sum::<f64>() / samples.len() as f64
        };

        samples.iter().fold(
            LinearSums {
                n: 0,
                origin,
                sx: 0.0,
                sy: 0.0,
                sxy: 0.0,
                sxx: 0.0,
            },
            |acc, s| {
                let x = s.x - origin;
                LinearSums {
                    n: acc.n + 1,
                    sx: acc.sx + x,
                    sy: acc.sy + s.y,
                    sxy: acc.sxy + x * s.y,
                    sxx: acc.sxx + x * x,
                    ..acc
                }
            },
        )
    }

    /// `n·Sxx − Sx²`, the denominator of the closed-form slope. Unchanged by
    /// the shift of origin.
    pub fn spread(&self) -> f64 {
        self.n as f64 * self.sxx - self.sx * self.sx
    }

    /// `Σ(x − x̄)²`, computed as `spread / n`.
    pub fn centered_sxx(&self) -> f64 {
        self.spread() / self.n as f64
    }

    /// `Σx²` of the unshifted x values.
    pub fn raw_sxx(&self) -> f64 {
        self.sxx + 2.0 * self.origin * self.sx + self.n as f64 * self.origin * self.origin
    }

    /// Intercept of the line with `slope` through the centroid, in unshifted x.
    pub fn intercept(&self, slope: f64) -> f64 {
        (self.sy - slope * self.sx) / self.n as f64 - slope * self.origin
    }
}

/// Residual sum of squares of `samples` around a line.
pub fn residual_sum_of_squares(samples: &[Sample], slope: f64, intercept: f64) -> f64 {
    samples
        .iter()
        .map(|s| {
            let r = s.y - (slope * s.x + intercept);
            r * r
        })
        .sum()
}

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-12, 1e-10] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn sums_accumulate_over_samples() {
        let samples = [Sample { x: 1.0, y: 2.0 }, Sample { x: 3.0, y: 4.0 }];
        let sums = LinearSums::from_samples(&samples);
        assert_eq!(sums.n, 2);
        assert_eq!(sums.origin, 2.0);
        assert_eq!(sums.sx, 0.0);
        assert_eq!(sums.sy, 6.0);
        assert_eq!(sums.sxy, 2.0);
        assert_eq!(sums.sxx, 2.0);
        assert_eq!(sums.spread(), 4.0);
        assert_eq!(sums.centered_sxx(), 2.0);
        assert_eq!(sums.raw_sxx(), 10.0);
        assert_eq!(sums.intercept(1.0), 1.0);
    }

    #[test]
    fn offset_x_keeps_its_spread() {
        let samples: Vec<Sample> = (0..10)
            .map(|i| Sample {
                x: 1e6 + 0.1 * i as f64,
                y: 0.0,
            })
            .collect();
        let sums = LinearSums::from_samples(&samples);
        // Σ(0.1·(i − 4.5))² for i = 0..9.
        assert!((sums.centered_sxx() - 0.825).abs() < 1e-9);
    }

    #[test]
    fn rss_is_zero_on_the_line() {
        let samples = [Sample { x: 0.0, y: 1.0 }, Sample { x: 2.0, y: 5.0 }];
        assert_eq!(residual_sum_of_squares(&samples, 2.0, 1.0), 0.0);
        assert_eq!(residual_sum_of_squares(&samples, 2.0, 0.0), 2.0);
    }
}
