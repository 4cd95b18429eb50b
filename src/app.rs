//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` defaults and parses CLI arguments
//! - builds the sample set (explicit points, built-in dataset or simulation)
//! - runs fit + rounding
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;
use log::{debug, warn};

use crate::cli::{Command, FitArgs, OutputArgs, RoundArgs, SimulateArgs};
use crate::data::{Dataset, SimulationConfig, generate_sample};
use crate::domain::{FitConfig, FitOptions, SampleSet};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `labfit` binary.
pub fn run() -> Result<(), AppError> {
    // Missing `.env` is fine; explicit env vars and flags still apply.
    if let Err(e) = dotenvy::dotenv() {
        debug!("no .env loaded: {e}");
    }
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Round(args) => handle_round(args),
        Command::Simulate(args) => handle_simulate(args),
        Command::Datasets => {
            handle_datasets();
            Ok(())
        }
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let samples = samples_from_args(&args)?;
    let config = fit_config_from_args(&args.output);
    report(samples, &config, args.output.residuals)
}

fn handle_simulate(args: SimulateArgs) -> Result<(), AppError> {
    let sim = SimulationConfig {
        slope: args.slope,
        intercept: args.intercept,
        noise: args.noise,
        count: args.count,
        x_min: args.x_min,
        x_max: args.x_max,
        seed: args.seed,
    };
    let samples = generate_sample(&sim)?;
    println!(
        "Simulated: y = {}x + {} with noise σ={} (seed {})",
        sim.slope, sim.intercept, sim.noise, sim.seed
    );

    let config = fit_config_from_args(&args.output);
    report(samples, &config, args.output.residuals)
}

fn handle_round(args: RoundArgs) -> Result<(), AppError> {
    let pair = crate::rounding::round_pair(args.value, args.error)?;
    println!("{pair}");
    Ok(())
}

fn handle_datasets() {
    for dataset in Dataset::ALL {
        println!("{:<10} {}", dataset.name(), dataset.description());
    }
}

fn report(samples: SampleSet, config: &FitConfig, show_residuals: bool) -> Result<(), AppError> {
    let run = pipeline::run_fit(samples, config)?;

    println!(
        "{}",
        crate::report::format_run_summary(&run.samples, &run.fit, &run.rounded)
    );

    if show_residuals {
        println!("{}", crate::report::format_residuals(&run.residuals));
    }

    if config.plot {
        let plot = crate::plot::render_ascii_plot(&run.samples, &run.fit, config.plot_width, config.plot_height);
        println!("{plot}");
    }

    // Optional exports.
    if let Some(path) = &config.export_json {
        crate::io::write_fit_json(path, &run.samples, &run.fit, &run.rounded)?;
    }
    if let Some(path) = &config.export_csv {
        crate::io::write_residuals_csv(path, &run.samples, &run.fit)?;
    }

    Ok(())
}

/// Resolve the sample set from `--point`/`--dataset` and `--sigma`.
pub fn samples_from_args(args: &FitArgs) -> Result<SampleSet, AppError> {
    let samples = match args.dataset {
        Some(dataset) => dataset.samples()?,
        None if args.points.is_empty() => {
            return Err(AppError::new(2, "No samples given: pass --point X,Y (repeatable) or --dataset NAME."));
        }
        None => SampleSet::from_pairs(&args.points)?,
    };

    match args.sigma {
        Some(sigma) => Ok(samples.with_y_sigma(sigma)?),
        None => Ok(samples),
    }
}

pub fn fit_config_from_args(args: &OutputArgs) -> FitConfig {
    let config = FitConfig {
        options: FitOptions {
            estimator: args.estimator,
            error_model: args.error_model,
        },
        plot: !args.no_plot,
        plot_width: args.width.max(10),
        plot_height: args.height.max(5),
        export_json: args.export_json.clone(),
        export_csv: args.export_csv.clone(),
    };

    if config.plot_width != args.width || config.plot_height != args.height {
        warn!(
            "plot size {}x{} clamped to {}x{}",
            args.width, args.height, config.plot_width, config.plot_height
        );
    }

    config
}
