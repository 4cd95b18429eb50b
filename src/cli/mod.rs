//! Command-line parsing for the line fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fitting/rounding code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::data::Dataset;
use crate::domain::{ErrorModel, Estimator};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "labfit", version, about = "Least-squares line fits with physically rounded uncertainties")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit a line to measured points, print coefficients and optionally plot/export.
    Fit(FitArgs),
    /// Round a single value and its uncertainty.
    Round(RoundArgs),
    /// Generate a noisy synthetic line and fit it.
    Simulate(SimulateArgs),
    /// List the built-in datasets.
    Datasets,
}

/// Options for fitting explicit or built-in samples.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// A measured point as `X,Y` (repeatable).
    #[arg(short = 'p', long = "point", value_name = "X,Y", value_parser = parse_point, allow_hyphen_values = true)]
    pub points: Vec<(f64, f64)>,

    /// Use a built-in dataset instead of explicit points.
    #[arg(short = 'd', long, value_enum, conflicts_with = "points")]
    pub dataset: Option<Dataset>,

    /// Measurement uncertainty on y (drawn as error bars).
    #[arg(long, env = "LABFIT_SIGMA")]
    pub sigma: Option<f64>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Options for the synthetic experiment.
#[derive(Debug, Parser, Clone)]
pub struct SimulateArgs {
    /// True slope of the simulated line.
    #[arg(long, default_value_t = 2.0, allow_hyphen_values = true)]
    pub slope: f64,

    /// True intercept of the simulated line.
    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    pub intercept: f64,

    /// Standard deviation of the y noise.
    #[arg(long, default_value_t = 0.5)]
    pub noise: f64,

    /// Number of samples.
    #[arg(short = 'n', long, default_value_t = 10)]
    pub count: usize,

    /// Smallest x.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub x_min: f64,

    /// Largest x.
    #[arg(long, default_value_t = 10.0, allow_hyphen_values = true)]
    pub x_max: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Estimator, plot and export options shared by `fit` and `simulate`.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// How slope and intercept are solved.
    #[arg(long, value_enum, env = "LABFIT_ESTIMATOR", default_value_t = Estimator::ClosedForm)]
    pub estimator: Estimator,

    /// How parameter errors are derived (`legacy` reproduces old lab scripts).
    #[arg(long, value_enum, env = "LABFIT_ERROR_MODEL", default_value_t = ErrorModel::Covariance)]
    pub error_model: ErrorModel,

    /// Print the per-sample residual table.
    #[arg(long)]
    pub residuals: bool,

    /// Render an ASCII plot in the terminal (the default).
    #[arg(long, overrides_with = "no_plot")]
    pub plot: bool,

    /// Disable the terminal plot. The last of `--plot`/`--no-plot` wins.
    #[arg(long, overrides_with = "plot")]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, env = "LABFIT_PLOT_WIDTH", default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, env = "LABFIT_PLOT_HEIGHT", default_value_t = 20)]
    pub height: usize,

    /// Export the fit (parameters, rounded strings, line grid) to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,

    /// Export per-sample fitted values to CSV.
    #[arg(long = "export-csv", value_name = "CSV")]
    pub export_csv: Option<PathBuf>,
}

/// Options for rounding a single pair.
#[derive(Debug, Parser)]
pub struct RoundArgs {
    /// Measured value.
    #[arg(allow_hyphen_values = true)]
    pub value: f64,

    /// Its uncertainty.
    #[arg(allow_hyphen_values = true)]
    pub error: f64,
}

/// Parse `X,Y` into a coordinate pair.
pub fn parse_point(s: &str) -> Result<(f64, f64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `X,Y`, got '{s}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid number '{}' in '{s}': {e}", v.trim()))
    };
    Ok((parse(x)?, parse(y)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_point_accepts_signed_numbers() {
        assert_eq!(parse_point("1,2").unwrap(), (1.0, 2.0));
        assert_eq!(parse_point(" -3.5 , 1e-3 ").unwrap(), (-3.5, 0.001));
    }

    #[test]
    fn parse_point_rejects_malformed_pairs() {
        assert!(parse_point("1").is_err());
        assert!(parse_point("1,two").is_err());
        assert!(parse_point("1,2,3").is_err());
    }

    #[test]
    fn fit_command_collects_points() {
        let cli = Cli::try_parse_from(["labfit", "fit", "-p", "1,2", "-p", "-2,3", "--no-plot"]).unwrap();
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        assert_eq!(args.points, vec![(1.0, 2.0), (-2.0, 3.0)]);
        assert!(args.output.no_plot);
        assert_eq!(args.output.estimator, Estimator::ClosedForm);
    }

    #[test]
    fn dataset_conflicts_with_points() {
        assert!(Cli::try_parse_from(["labfit", "fit", "-d", "primes", "-p", "1,2"]).is_err());
    }

    #[test]
    fn round_accepts_negative_values() {
        let cli = Cli::try_parse_from(["labfit", "round", "-1.5873", "0.055"]).unwrap();
        let Command::Round(args) = cli.command else {
            panic!("expected round");
        };
        assert_eq!(args.value, -1.5873);
        assert_eq!(args.error, 0.055);
    }
}
