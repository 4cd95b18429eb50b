//! Terminal plotting of fitted samples.

pub mod ascii;

pub use ascii::*;
