//! `labfit` library crate.
//!
//! Least-squares straight-line fits with propagated parameter errors, and
//! "physical" rounding of `(value, uncertainty)` pairs for display.
//!
//! The binary (`labfit`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the fitter and rounder are reusable from other presentation layers

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
pub mod rounding;

pub use domain::{FitOptions, FitResult, FormattedPair, Sample, SampleSet, UncertaintyPair};
pub use error::FitError;
pub use fit::{fit, fit_line, fit_many, line_grid};
pub use rounding::round_pair;
