//! Metrology-style rounding of `(value, uncertainty)` pairs for display.

pub mod physical;

pub use physical::*;
