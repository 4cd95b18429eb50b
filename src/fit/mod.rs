//! Line fitting orchestration.
//!
//! Responsibilities:
//!
//! - slope / intercept estimation (closed form or polynomial least squares)
//! - propagation of residual variance into parameter errors
//! - parallel fitting of independent sample sets

pub mod batch;
pub mod fitter;

pub use batch::*;
pub use fitter::*;
