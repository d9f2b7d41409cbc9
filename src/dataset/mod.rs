//! Tabular input.
//!
//! Loads a CSV file fully into memory and exposes column lookups and
//! numeric coercion for the regression columns.

pub mod loader;

pub use loader::Dataset;
