//! Export fits to JSON and per-sample results to CSV.
//!
//! The exports are meant to be easy to consume in spreadsheets, notebooks or
//! an external plotting tool.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::info;

use crate::domain::{FitFile, FitResult, SampleSet};
use crate::error::AppError;
use crate::fit::line_grid;
use crate::report::RoundedFit;

/// Number of points in the exported line grid.
const LINE_POINTS: usize = 101;

/// Build the JSON document for a fit.
pub fn fit_file(samples: &SampleSet, fit: &FitResult, rounded: &RoundedFit) -> FitFile {
    let (x_min, x_max) = samples.x_range().unwrap_or((0.0, 1.0));
    FitFile {
        tool: "labfit".to_string(),
        generated: chrono::Utc::now(),
        n: samples.len(),
        y_sigma: samples.y_sigma(),
        fit: *fit,
        slope: rounded.slope.clone(),
        intercept: rounded.intercept.clone(),
        line: line_grid(fit, x_min, x_max, LINE_POINTS),
    }
}

/// Write a fit JSON file.
pub fn write_fit_json(path: &Path, samples: &SampleSet, fit: &FitResult, rounded: &RoundedFit) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create fit JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &fit_file(samples, fit, rounded))
        .map_err(|e| AppError::new(2, format!("Failed to write fit JSON: {e}")))?;

    info!("wrote fit JSON to {}", path.display());
    Ok(())
}

/// Write per-sample observed/fitted values to a CSV file.
pub fn write_residuals_csv(path: &Path, samples: &SampleSet, fit: &FitResult) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writeln!(file, "x,y_obs,y_fit,residual,y_sigma")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    let sigma = samples.y_sigma().map(|s| s.to_string()).unwrap_or_default();
    for r in fit.residuals(samples) {
        writeln!(
            file,
            "{},{},{:.10},{:.10},{}",
            r.sample.x, r.sample.y, r.y_fit, r.residual, sigma
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    info!("wrote residual CSV to {}", path.display());
    Ok(())
}
