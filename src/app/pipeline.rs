//! Shared "fit pipeline" logic used by the `fit` and `simulate` commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! samples -> fit -> physical rounding -> residuals
//!
//! The commands can then focus on where samples come from and on presentation.

use crate::domain::{FitConfig, FitResult, Residual, SampleSet};
use crate::error::AppError;
use crate::report::RoundedFit;

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub samples: SampleSet,
    pub fit: FitResult,
    pub rounded: RoundedFit,
    pub residuals: Vec<Residual>,
}

/// Execute the fitting pipeline on an explicit sample set.
pub fn run_fit(samples: SampleSet, config: &FitConfig) -> Result<RunOutput, AppError> {
    let fit = crate::fit::fit(&samples, &config.options)?;
    let rounded = RoundedFit::from_fit(&fit)?;
    let residuals = fit.residuals(&samples);

    Ok(RunOutput {
        samples,
        fit,
        rounded,
        residuals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FitOptions;

    fn config() -> FitConfig {
        FitConfig {
            options: FitOptions::default(),
            plot: false,
            plot_width: 40,
            plot_height: 10,
            export_json: None,
            export_csv: None,
        }
    }

    #[test]
    fn pipeline_rounds_the_fit() {
        let samples = crate::data::Dataset::Pressure.samples().unwrap();
        let run = run_fit(samples, &config()).unwrap();
        assert_eq!(run.residuals.len(), 4);
        assert_eq!(run.rounded.slope.decimals, run.rounded.slope.value_string.split('.').nth(1).map_or(0, str::len));
        assert!(run.fit.slope > 0.0);
    }

    #[test]
    fn pipeline_maps_fit_errors_to_exit_codes() {
        let samples = SampleSet::from_pairs(&[(2.0, 1.0), (2.0, 5.0), (2.0, 9.0)]).unwrap();
        let err = run_fit(samples, &config()).unwrap_err();
        assert_eq!(err.exit_code(), 4);

        let samples = SampleSet::from_pairs(&[(1.0, 1.0), (2.0, 5.0)]).unwrap();
        let err = run_fit(samples, &config()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
