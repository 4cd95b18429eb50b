//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON/CSV
//! - handed to a presentation layer without exposing fitter internals

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::FitError;

/// One paired measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

/// An ordered, validated set of samples.
///
/// Construction rejects non-finite coordinates and mismatched arity, so every
/// `SampleSet` that exists is safe to hand to the fitter. The set is never
/// mutated after construction. Deserialization goes through the same checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSampleSet")]
pub struct SampleSet {
    samples: Vec<Sample>,
    /// Measurement uncertainty on y (presentation only, does not weight the fit).
    y_sigma: Option<f64>,
}

#[derive(Deserialize)]
struct RawSampleSet {
    samples: Vec<Sample>,
    #[serde(default)]
    y_sigma: Option<f64>,
}

impl TryFrom<RawSampleSet> for SampleSet {
    type Error = FitError;

    fn try_from(raw: RawSampleSet) -> Result<Self, Self::Error> {
        let set = SampleSet::from_samples(raw.samples)?;
        match raw.y_sigma {
            Some(sigma) => set.with_y_sigma(sigma),
            None => Ok(set),
        }
    }
}

impl SampleSet {
    /// Build from parallel coordinate slices.
    pub fn from_xy(xs: &[f64], ys: &[f64]) -> Result<Self, FitError> {
        if xs.len() != ys.len() {
            return Err(FitError::invalid(format!(
                "mismatched coordinate arity: {} x values vs {} y values",
                xs.len(),
                ys.len()
            )));
        }
        Self::from_samples(xs.iter().zip(ys).map(|(&x, &y)| Sample { x, y }).collect())
    }

    /// Build from `(x, y)` tuples.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self, FitError> {
        Self::from_samples(pairs.iter().map(|&(x, y)| Sample { x, y }).collect())
    }

    pub fn from_samples(samples: Vec<Sample>) -> Result<Self, FitError> {
        if let Some((i, s)) = samples
            .iter()
            .enumerate()
            .find(|(_, s)| !(s.x.is_finite() && s.y.is_finite()))
        {
            return Err(FitError::invalid(format!(
                "sample {} is not finite: ({}, {})",
                i + 1,
                s.x,
                s.y
            )));
        }
        Ok(Self { samples, y_sigma: None })
    }

    /// Attach a y measurement uncertainty.
    pub fn with_y_sigma(mut self, sigma: f64) -> Result<Self, FitError> {
        if !(sigma.is_finite() && sigma >= 0.0) {
            return Err(FitError::invalid(format!(
                "measurement uncertainty must be finite and >= 0, got {sigma}"
            )));
        }
        self.y_sigma = Some(sigma);
        Ok(self)
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn y_sigma(&self) -> Option<f64> {
        self.y_sigma
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// `(min, max)` of the x coordinates, `None` for an empty set.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        range(self.samples.iter().map(|s| s.x))
    }

    /// `(min, max)` of the y coordinates widened by the error bars.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        let sigma = self.y_sigma.unwrap_or(0.0);
        range(self.samples.iter().map(|s| s.y))
            .map(|(lo, hi)| (lo - sigma, hi + sigma))
    }
}

fn range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// How slope and intercept are solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Estimator {
    /// Closed-form sums (`n·Sxy − Sx·Sy` over `n·Sxx − Sx²`).
    #[default]
    ClosedForm,
    /// Degree-1 polynomial least squares with a covariance matrix (SVD).
    Polyfit,
}

/// How the standard errors of slope and intercept are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorModel {
    /// Residual variance propagated through the parameter covariance.
    #[default]
    Covariance,
    /// Formula found in older lab scripts (`sqrt(σ_slope / (n·Sxx − Sx²))`
    /// for the intercept). Dimensionally inconsistent; kept only to reproduce
    /// historical numbers.
    Legacy,
}

/// Fitting options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FitOptions {
    pub estimator: Estimator,
    pub error_model: ErrorModel,
}

/// Fitted line parameters and their standard errors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub slope: f64,
    pub intercept: f64,
    pub slope_error: f64,
    pub intercept_error: f64,
    /// Number of samples fitted.
    pub n: usize,
    /// Residual sum of squares.
    pub sse: f64,
    pub estimator: Estimator,
    pub error_model: ErrorModel,
}

impl FitResult {
    /// Evaluate the fitted line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Fitted values and residuals for each sample.
    pub fn residuals(&self, samples: &SampleSet) -> Vec<Residual> {
        samples
            .samples()
            .iter()
            .map(|&sample| {
                let y_fit = self.predict(sample.x);
                Residual {
                    sample,
                    y_fit,
                    residual: sample.y - y_fit,
                }
            })
            .collect()
    }

    pub fn slope_pair(&self) -> UncertaintyPair {
        UncertaintyPair {
            value: self.slope,
            error: self.slope_error,
        }
    }

    pub fn intercept_pair(&self) -> UncertaintyPair {
        UncertaintyPair {
            value: self.intercept,
            error: self.intercept_error,
        }
    }
}

/// A per-sample fitted value (used for plots and exports).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Residual {
    pub sample: Sample,
    pub y_fit: f64,
    pub residual: f64,
}

/// A value with its (non-negative) uncertainty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UncertaintyPair {
    pub value: f64,
    pub error: f64,
}

impl UncertaintyPair {
    pub fn round(&self) -> Result<FormattedPair, FitError> {
        crate::rounding::round_pair(self.value, self.error)
    }
}

/// Matched-precision decimal strings for a value and its uncertainty.
///
/// Both strings carry exactly `decimals` digits after the decimal point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedPair {
    pub value_string: String,
    pub error_string: String,
    pub decimals: usize,
}

impl std::fmt::Display for FormattedPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ± {}", self.value_string, self.error_string)
    }
}

/// Evenly spaced points on a fitted line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineGrid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus env/defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub options: FitOptions,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub export_json: Option<PathBuf>,
    pub export_csv: Option<PathBuf>,
}

/// A saved fit (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitFile {
    pub tool: String,
    pub generated: chrono::DateTime<chrono::Utc>,
    pub n: usize,
    pub y_sigma: Option<f64>,
    pub fit: FitResult,
    pub slope: FormattedPair,
    pub intercept: FormattedPair,
    pub line: LineGrid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialized_sample_sets_are_validated() {
        let set: SampleSet =
            serde_json::from_str(r#"{"samples":[{"x":1.0,"y":2.0},{"x":2.0,"y":4.0}],"y_sigma":0.1}"#).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.y_sigma(), Some(0.1));

        let err = serde_json::from_str::<SampleSet>(r#"{"samples":[{"x":1.0,"y":2.0}],"y_sigma":-1.0}"#).unwrap_err();
        assert!(err.to_string().contains("measurement uncertainty"));
    }

    #[test]
    fn sample_set_rejects_mismatched_arity() {
        let err = SampleSet::from_xy(&[1.0, 2.0, 3.0], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, FitError::InvalidInput(_)));
    }

    #[test]
    fn sample_set_rejects_non_finite_coordinates() {
        let err = SampleSet::from_pairs(&[(1.0, 2.0), (f64::NAN, 3.0)]).unwrap_err();
        assert!(matches!(err, FitError::InvalidInput(ref m) if m.contains("sample 2")));

        let err = SampleSet::from_pairs(&[(1.0, f64::INFINITY)]).unwrap_err();
        assert!(matches!(err, FitError::InvalidInput(_)));
    }

    #[test]
    fn y_range_includes_error_bars() {
        let set = SampleSet::from_pairs(&[(0.0, 1.0), (1.0, 4.0)])
            .unwrap()
            .with_y_sigma(0.5)
            .unwrap();
        assert_eq!(set.x_range(), Some((0.0, 1.0)));
        assert_eq!(set.y_range(), Some((0.5, 4.5)));
    }

    #[test]
    fn negative_sigma_is_rejected() {
        let set = SampleSet::from_pairs(&[(0.0, 1.0)]).unwrap();
        assert!(set.with_y_sigma(-0.1).is_err());
    }

    #[test]
    fn residuals_follow_the_line() {
        let set = SampleSet::from_pairs(&[(0.0, 1.0), (1.0, 4.0)]).unwrap();
        let fit = FitResult {
            slope: 2.0,
            intercept: 1.0,
            slope_error: 0.0,
            intercept_error: 0.0,
            n: 2,
            sse: 0.0,
            estimator: Estimator::ClosedForm,
            error_model: ErrorModel::Covariance,
        };
        let residuals = fit.residuals(&set);
        assert_eq!(residuals[0].residual, 0.0);
        assert_eq!(residuals[1].y_fit, 3.0);
        assert_eq!(residuals[1].residual, 1.0);
    }
}
