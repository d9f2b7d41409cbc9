//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation of the input path.

use crate::error::PlotError;
use clap::Parser;
use std::path::PathBuf;

/// regplot - regress and scatter-plot two columns of a CSV file
///
/// Fits one least squares line per category group and saves a scatter
/// plot with the regression lines overlaid. The plot format follows the
/// output extension (pdf, svg or png).
///
/// Examples:
///   regplot iris.csv
///   regplot iris.csv -x petal_width_cm -y petal_length_cm -o petals.svg
///   regplot data.csv -x height -y weight --no-category
///   regplot iris.csv --summary fits.json --summary-format json
///   regplot --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// A path to a CSV file
    #[arg(value_name = "PATH", required_unless_present = "init_config")]
    pub path: Option<PathBuf>,

    /// The column name to plot along the X axis [default: petal_length_cm]
    #[arg(short = 'x', long = "x", value_name = "COLUMN")]
    pub x: Option<String>,

    /// The column name to plot along the Y axis [default: sepal_length_cm]
    #[arg(short = 'y', long = "y", value_name = "COLUMN")]
    pub y: Option<String>,

    /// The column name to treat as a categorical variable [default: species]
    ///
    /// Pass an empty string to analyze all rows together.
    #[arg(short, long, value_name = "COLUMN", conflicts_with = "no_category")]
    pub category: Option<String>,

    /// Analyze all rows together as a single group
    #[arg(long)]
    pub no_category: bool,

    /// The desired path of the output plot
    ///
    /// Defaults to <X>-v-<Y>[-by-<CATEGORY>].pdf in the current directory.
    #[arg(short, long = "output-plot-path", value_name = "FILE")]
    pub output_plot_path: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .regplot.toml in the current directory
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Plot width in pixels
    #[arg(long, value_name = "PX")]
    pub width: Option<u32>,

    /// Plot height in pixels
    #[arg(long, value_name = "PX")]
    pub height: Option<u32>,

    /// Title drawn above the chart
    #[arg(long, value_name = "TEXT")]
    pub caption: Option<String>,

    /// Also write a summary of every fitted line to this file
    #[arg(long, value_name = "FILE")]
    pub summary: Option<PathBuf>,

    /// Summary format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub summary_format: SummaryFormat,

    /// Fit and print the regression lines without writing the plot
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .regplot.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the fit summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SummaryFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.width == Some(0) || self.height == Some(0) {
            return Err("Plot width and height must be at least 1 pixel".to_string());
        }

        self.check_input_path().map_err(|e| e.to_string())
    }

    /// Make sure the input path exists and is a regular file.
    pub fn check_input_path(&self) -> Result<(), PlotError> {
        let path = self.input_path();
        if !path.exists() {
            return Err(PlotError::InputNotFound(path.to_path_buf()));
        }
        if !path.is_file() {
            return Err(PlotError::InputNotFile(path.to_path_buf()));
        }
        Ok(())
    }

    /// The input path (empty when only `--init-config` was given).
    pub fn input_path(&self) -> &std::path::Path {
        self.path.as_deref().unwrap_or_else(|| std::path::Path::new(""))
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
