//! Analysis modules.
//!
//! Grouping of rows by category and per-group least squares fits.

pub mod grouping;
pub mod regression;

pub use grouping::{partition, Grouping};
pub use regression::{fit_line, FitError, LineFit};
