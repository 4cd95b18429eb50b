//! Straight-line fitting with propagated uncertainties.
//!
//! Given:
//! - samples `(x_i, y_i)`
//! - an estimator (closed-form sums or polynomial least squares)
//! - an error model
//!
//! we compute the slope, the intercept, and their standard errors from the
//! residual variance `S_res / (n − 2)`.

use log::{debug, warn};

use crate::domain::{ErrorModel, Estimator, FitOptions, FitResult, LineGrid, Sample, SampleSet};
use crate::error::FitError;
use crate::math::{LinearSums, polyfit_linear, residual_sum_of_squares};

/// Minimum sample count for residual-based standard errors.
pub const MIN_RESIDUAL_SAMPLES: usize = 3;

/// Slope and intercept without standard errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineCoefficients {
    pub slope: f64,
    pub intercept: f64,
}

/// Minimal sum-based estimator: slope and intercept only.
///
/// Any non-empty set is accepted; a single point (or any set without
/// horizontal spread) is degenerate.
pub fn fit_line(samples: &SampleSet) -> Result<LineCoefficients, FitError> {
    if samples.is_empty() {
        return Err(FitError::InsufficientData { needed: 1, got: 0 });
    }
    let (coefficients, _) = closed_form(samples.samples())?;
    Ok(coefficients)
}

/// Fit `y = slope·x + intercept` and propagate the residual variance into
/// the parameter errors.
pub fn fit(samples: &SampleSet, options: &FitOptions) -> Result<FitResult, FitError> {
    let n = samples.len();
    if n < MIN_RESIDUAL_SAMPLES {
        return Err(FitError::InsufficientData {
            needed: MIN_RESIDUAL_SAMPLES,
            got: n,
        });
    }

    let result = match (options.estimator, options.error_model) {
        (Estimator::ClosedForm, model) => fit_closed_form(samples.samples(), model)?,
        (Estimator::Polyfit, ErrorModel::Covariance) => fit_polyfit(samples.samples())?,
        (Estimator::Polyfit, ErrorModel::Legacy) => {
            return Err(FitError::invalid(
                "the legacy error model is only defined for the closed-form estimator",
            ));
        }
    };

    debug!(
        "fit n={} estimator={:?} model={:?}: slope={} ± {}, intercept={} ± {}, sse={}",
        result.n,
        result.estimator,
        result.error_model,
        result.slope,
        result.slope_error,
        result.intercept,
        result.intercept_error,
        result.sse
    );

    Ok(result)
}

/// Evenly spaced points on the fitted line from `x_min` to `x_max` inclusive.
pub fn line_grid(fit: &FitResult, x_min: f64, x_max: f64, n: usize) -> LineGrid {
    let n = n.max(2);
    let step = (x_max - x_min) / (n as f64 - 1.0);

    let x: Vec<f64> = (0..n)
        .map(|i| if i == n - 1 { x_max } else { x_min + step * i as f64 })
        .collect();
    let y = x.iter().map(|&xi| fit.predict(xi)).collect();

    LineGrid { x, y }
}

fn closed_form(samples: &[Sample]) -> Result<(LineCoefficients, LinearSums), FitError> {
    let sums = LinearSums::from_samples(samples);
    let n = sums.n as f64;

    // `spread` can come out as a tiny non-zero value for identical
    // non-representable x values (e.g. 0.1), so check identity directly too.
    let first_x = samples.first().map(|s| s.x);
    let all_same_x = samples.iter().all(|s| Some(s.x) == first_x);
    let spread = sums.spread();
    if all_same_x || !(spread.is_finite() && spread > 0.0) {
        return Err(FitError::DegenerateFit);
    }

    let slope = (n * sums.sxy - sums.sx * sums.sy) / spread;
    let intercept = sums.intercept(slope);
    if !(slope.is_finite() && intercept.is_finite()) {
        return Err(FitError::DegenerateFit);
    }

    Ok((LineCoefficients { slope, intercept }, sums))
}

fn fit_closed_form(samples: &[Sample], model: ErrorModel) -> Result<FitResult, FitError> {
    let (LineCoefficients { slope, intercept }, sums) = closed_form(samples)?;
    let n = sums.n as f64;
    let dof = n - 2.0;
    let sse = residual_sum_of_squares(samples, slope, intercept);

    let (slope_error, intercept_error) = match model {
        ErrorModel::Covariance => {
            let slope_error = (sse / (dof * sums.centered_sxx())).sqrt();
            (slope_error, slope_error * (sums.raw_sxx() / n).sqrt())
        }
        ErrorModel::Legacy => {
            warn!("legacy error model: intercept error is dimensionally inconsistent");
            let slope_error = (sse / (dof * sums.raw_sxx())).sqrt();
            (slope_error, (slope_error / sums.spread()).sqrt())
        }
    };

    Ok(FitResult {
        slope,
        intercept,
        slope_error,
        intercept_error,
        n: sums.n,
        sse,
        estimator: Estimator::ClosedForm,
        error_model: model,
    })
}

fn fit_polyfit(samples: &[Sample]) -> Result<FitResult, FitError> {
    let line = polyfit_linear(samples)?;
    Ok(FitResult {
        slope: line.slope,
        intercept: line.intercept,
        slope_error: line.slope_error(),
        intercept_error: line.intercept_error(),
        n: samples.len(),
        sse: line.sse,
        estimator: Estimator::Polyfit,
        error_model: ErrorModel::Covariance,
    })
}
