//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - validated input samples (`Sample`, `SampleSet`)
//! - fitting configuration enums (`Estimator`, `ErrorModel`)
//! - fit and rounding outputs (`FitResult`, `FormattedPair`, etc.)

pub mod types;

pub use types::*;
