//! Output helpers.
//!
//! - fit JSON export (`export::write_fit_json`)
//! - per-sample residual CSV export (`export::write_residuals_csv`)

pub mod export;

pub use export::*;
