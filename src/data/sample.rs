//! Synthetic measurement generation around a known line.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::domain::{Sample, SampleSet};
use crate::error::FitError;

/// Parameters of a simulated experiment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub slope: f64,
    pub intercept: f64,
    /// Standard deviation of the Gaussian noise added to y.
    pub noise: f64,
    pub count: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub seed: u64,
}

/// Generate `count` samples at evenly spaced x with Gaussian y noise.
///
/// The noise level is attached to the set as its measurement uncertainty.
pub fn generate_sample(config: &SimulationConfig) -> Result<SampleSet, FitError> {
    if config.count == 0 {
        return Err(FitError::invalid("sample count must be > 0"));
    }
    if !(config.x_min.is_finite() && config.x_max.is_finite() && config.x_max > config.x_min) {
        return Err(FitError::invalid(format!(
            "invalid x range [{}, {}]",
            config.x_min, config.x_max
        )));
    }
    if !(config.slope.is_finite() && config.intercept.is_finite()) {
        return Err(FitError::invalid("line parameters must be finite"));
    }

    let normal = Normal::new(0.0, config.noise)
        .map_err(|e| FitError::invalid(format!("noise distribution error: {e}")))?;
    let mut rng = StdRng::seed_from_u64(config.seed);

    let step = if config.count > 1 {
        (config.x_max - config.x_min) / (config.count - 1) as f64
    } else {
        0.0
    };

    let samples = (0..config.count)
        .map(|i| {
            let x = config.x_min + step * i as f64;
            let y = config.slope * x + config.intercept + normal.sample(&mut rng);
            Sample { x, y }
        })
        .collect();

    SampleSet::from_samples(samples)?.with_y_sigma(config.noise)
}
