//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the fitting/rounding code stays clean and testable
//! - output changes are localized

use crate::domain::{FitResult, FormattedPair, Residual, SampleSet};
use crate::error::FitError;

/// Decimal places for the raw (unrounded) coefficient printout.
pub const RAW_DECIMALS: usize = 5;

/// Slope and intercept after physical rounding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundedFit {
    pub slope: FormattedPair,
    pub intercept: FormattedPair,
}

impl RoundedFit {
    pub fn from_fit(fit: &FitResult) -> Result<Self, FitError> {
        Ok(Self {
            slope: fit.slope_pair().round()?,
            intercept: fit.intercept_pair().round()?,
        })
    }
}

/// `name = (value ± error)`, the legend form.
pub fn format_with_uncertainty(name: &str, pair: &FormattedPair) -> String {
    format!("{name} = ({pair})")
}

/// Format the run summary (sample stats + raw and rounded coefficients).
pub fn format_run_summary(samples: &SampleSet, fit: &FitResult, rounded: &RoundedFit) -> String {
    let mut out = String::new();

    out.push_str("=== labfit - linear least squares ===\n");
    out.push_str(&format!("Samples: n={}", samples.len()));
    if let (Some((x_min, x_max)), Some((y_min, y_max))) = (samples.x_range(), samples.y_range()) {
        out.push_str(&format!(" | x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.3}, {y_max:.3}]"));
    }
    if let Some(sigma) = samples.y_sigma() {
        out.push_str(&format!(" | σy={sigma}"));
    }
    out.push('\n');
    out.push_str(&format!(
        "Estimator: {:?} (error model: {:?}) | S_res={:.6}\n",
        fit.estimator, fit.error_model, fit.sse
    ));

    out.push_str(&format!("\nCoefficients ({RAW_DECIMALS} decimals):\n"));
    out.push_str(&format!(
        "  k = {:.prec$} ± {:.prec$}\n",
        fit.slope,
        fit.slope_error,
        prec = RAW_DECIMALS
    ));
    out.push_str(&format!(
        "  b = {:.prec$} ± {:.prec$}\n",
        fit.intercept,
        fit.intercept_error,
        prec = RAW_DECIMALS
    ));

    out.push_str("\nRounded:\n");
    out.push_str(&format!("  {}\n", format_with_uncertainty("k", &rounded.slope)));
    out.push_str(&format!("  {}\n", format_with_uncertainty("b", &rounded.intercept)));
    out.push_str(&format!("\nLegend: {}\n", format_legend(rounded)));

    out
}

/// One-line legend for the fitted line.
pub fn format_legend(rounded: &RoundedFit) -> String {
    format!(
        "y = kx + b, {}, {}",
        format_with_uncertainty("k", &rounded.slope),
        format_with_uncertainty("b", &rounded.intercept)
    )
}

/// Per-sample table of observed and fitted values.
pub fn format_residuals(rows: &[Residual]) -> String {
    let mut out = String::new();
    out.push_str(format!("{:>12} {:>12} {:>12} {:>12}", "x", "y_obs", "y_fit", "residual").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<12} {:-<12} {:-<12} {:-<12}", "", "", "", "").trim_end());
    out.push('\n');

    for r in rows {
        out.push_str(
            format!(
                "{:>12.4} {:>12.4} {:>12.4} {:>12.4}",
                r.sample.x, r.sample.y, r.y_fit, r.residual
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FitOptions;
    use crate::fit::fit;

    fn primes() -> SampleSet {
        SampleSet::from_pairs(&[(1.0, 2.0), (2.0, 3.0), (3.0, 5.0), (4.0, 7.0), (5.0, 11.0)]).unwrap()
    }

    #[test]
    fn summary_contains_raw_and_rounded_coefficients() {
        let samples = primes();
        let fit = fit(&samples, &FitOptions::default()).unwrap();
        let rounded = RoundedFit::from_fit(&fit).unwrap();
        let text = format_run_summary(&samples, &fit, &rounded);

        assert!(text.contains("Samples: n=5 | x=[1.000, 5.000] | y=[2.000, 11.000]"));
        assert!(text.contains("k = 2.20000 ± 0.30551"));
        assert!(text.contains("b = -1.00000 ± 1.01325"));
        assert!(text.contains("k = (2.2 ± 0.3)"));
        assert!(text.contains("b = (-1.0 ± 1.0)"));
        assert!(text.contains("Legend: y = kx + b"));
    }

    #[test]
    fn summary_mentions_measurement_uncertainty() {
        let samples = primes().with_y_sigma(0.3).unwrap();
        let fit = fit(&samples, &FitOptions::default()).unwrap();
        let rounded = RoundedFit::from_fit(&fit).unwrap();
        let text = format_run_summary(&samples, &fit, &rounded);
        assert!(text.contains("σy=0.3"));
        assert!(text.contains("y=[1.700, 11.300]"));
    }

    #[test]
    fn residual_table_has_one_row_per_sample() {
        let samples = primes();
        let fit = fit(&samples, &FitOptions::default()).unwrap();
        let table = format_residuals(&fit.residuals(&samples));
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2 + 5);
        assert!(lines[2].ends_with("0.8000"));
    }
}
