//! Reporting utilities: coefficient summaries, legends and residual tables.

pub mod format;

pub use format::*;
