//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.regplot.toml` files.

use crate::plot::{Palette, PlotStyle};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".regplot.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default column names.
    #[serde(default)]
    pub columns: ColumnsConfig,

    /// Figure settings.
    #[serde(default)]
    pub plot: PlotConfig,
}

/// Columns used when none are given on the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnsConfig {
    /// Column plotted along the X axis (predictor).
    #[serde(default = "default_x")]
    pub x: String,

    /// Column plotted along the Y axis (response).
    #[serde(default = "default_y")]
    pub y: String,

    /// Categorical column; an empty string plots all rows as one group.
    #[serde(default = "default_category")]
    pub category: String,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            x: default_x(),
            y: default_y(),
            category: default_category(),
        }
    }
}

fn default_x() -> String {
    "petal_length_cm".to_string()
}

fn default_y() -> String {
    "sepal_length_cm".to_string()
}

fn default_category() -> String {
    "species".to_string()
}

/// Figure settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Figure width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Figure height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,

    /// Scatter point radius.
    #[serde(default = "default_point_size")]
    pub point_size: u32,

    /// Regression line stroke width.
    #[serde(default = "default_line_width")]
    pub line_width: u32,

    /// Optional title drawn above the chart.
    #[serde(default)]
    pub caption: Option<String>,

    /// Group colors as `#rrggbb`, cycled in group order.
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            point_size: default_point_size(),
            line_width: default_line_width(),
            caption: None,
            palette: default_palette(),
        }
    }
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

fn default_point_size() -> u32 {
    4
}

fn default_line_width() -> u32 {
    2
}

fn default_palette() -> Vec<String> {
    crate::plot::palette::DEFAULT_COLORS
        .iter()
        .map(|c| c.to_string())
        .collect()
}

impl PlotConfig {
    /// Drawing parameters for the renderer.
    pub fn style(&self) -> PlotStyle {
        PlotStyle {
            width: self.width,
            height: self.height,
            point_size: self.point_size,
            line_width: self.line_width,
            caption: self.caption.clone(),
        }
    }

    /// Parsed color cycle.
    pub fn palette(&self) -> Palette {
        Palette::from_hex(self.palette.iter().map(String::as_str))
    }
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were given explicitly.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref x) = args.x {
            self.columns.x = x.clone();
        }
        if let Some(ref y) = args.y {
            self.columns.y = y.clone();
        }
        if let Some(ref category) = args.category {
            self.columns.category = category.clone();
        }
        if args.no_category {
            self.columns.category = String::new();
        }

        if let Some(width) = args.width {
            self.plot.width = width;
        }
        if let Some(height) = args.height {
            self.plot.height = height;
        }
        if let Some(ref caption) = args.caption {
            self.plot.caption = Some(caption.clone());
        }
    }

    /// The category column, or `None` when plotting ungrouped.
    pub fn category_column(&self) -> Option<&str> {
        Some(self.columns.category.as_str()).filter(|c| !c.is_empty())
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
