//! Error types shared by the loading, fitting and plotting stages.

use crate::analysis::FitError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while turning a data file into a plot.
#[derive(Debug, Error)]
pub enum PlotError {
    /// The input path does not exist
    #[error("The path {} does not exist.", .0.display())]
    InputNotFound(PathBuf),

    /// The input path exists but is not a regular file
    #[error("The path {} is not a file.", .0.display())]
    InputNotFile(PathBuf),

    /// The data file could not be parsed into rows and columns
    #[error("Failed to parse {}: {source}", path.display())]
    DataParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The data file has a header but no rows
    #[error("The data file {} contains no rows", .0.display())]
    EmptyDataset(PathBuf),

    /// A requested column is not in the header
    #[error("Column '{0}' not found in data file")]
    MissingColumn(String),

    /// A cell in a numeric column could not be read as a number
    #[error("Column '{column}' row {row}: '{value}' is not a number")]
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },

    /// A group has too few points for a regression line
    #[error("Group '{group}' has {points} point(s); at least 2 are needed for a regression")]
    InsufficientData { group: String, points: usize },

    /// Every X value in a group is the same
    #[error("Group '{group}' has constant X values; the regression slope is undefined")]
    DegenerateInput { group: String },

    /// Any other fitting failure for a group
    #[error("Regression failed for group '{group}': {source}")]
    Fit {
        group: String,
        #[source]
        source: FitError,
    },

    /// The data span cannot be drawn on a finite axis
    #[error("The {axis} axis range [{min:e}, {max:e}] is too wide to plot")]
    AxisRange { axis: String, min: f64, max: f64 },

    /// The output extension is not a format we can write
    #[error("Unsupported plot format '{0}' (expected pdf, svg or png)")]
    UnsupportedFormat(String),

    /// The drawing or encoding backend failed
    #[error("Rendering error: {0}")]
    Render(String),

    /// The plot could not be written to disk
    #[error("Failed to write plot to {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Type alias for Results using PlotError
pub type Result<T> = std::result::Result<T, PlotError>;
