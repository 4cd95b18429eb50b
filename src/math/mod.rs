//! Mathematical utilities: running sums and least squares solvers.

pub mod ols;
pub mod polyfit;

pub use ols::*;
pub use polyfit::*;
