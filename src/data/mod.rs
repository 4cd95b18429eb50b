//! Sample sources: built-in datasets and the synthetic generator.

pub mod datasets;
pub mod sample;

pub use datasets::*;
pub use sample::*;
