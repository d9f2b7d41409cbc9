//! Data models for the fit summary report.
//!
//! This module contains the serializable structures describing one run:
//! which file and columns were used, and the regression line for each group.

use crate::plot::palette::to_hex;
use crate::plot::PlotModel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Regression result for one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    /// Category value, or "all" when ungrouped.
    pub label: String,
    /// Number of points in the group.
    pub n: usize,
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation coefficient.
    pub r_value: f64,
    /// Coefficient of determination.
    pub r_squared: f64,
    /// Standard error of the slope.
    pub stderr: f64,
    /// Series color as `#rrggbb`.
    pub color: String,
}

/// Metadata about a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Path of the input data file.
    pub input_path: String,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    pub x_column: String,
    pub y_column: String,
    /// Category column, if the data was grouped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_column: Option<String>,
    /// Where the plot was written; absent on a dry run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_path: Option<String>,
    /// Rows in the input.
    pub rows: usize,
    /// Global X extent shared by every regression line.
    pub x_extent: (f64, f64),
}

/// The complete fit summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitReport {
    pub metadata: ReportMetadata,
    pub groups: Vec<GroupSummary>,
}

impl FitReport {
    /// Summarize a computed plot model.
    pub fn from_model(
        model: &PlotModel,
        input_path: &Path,
        category_column: Option<&str>,
        plot_path: Option<&Path>,
    ) -> Self {
        let groups = model
            .series
            .iter()
            .map(|s| GroupSummary {
                label: s.label.clone(),
                n: s.fit.n,
                slope: s.fit.slope,
                intercept: s.fit.intercept,
                r_value: s.fit.r_value,
                r_squared: s.fit.r_squared(),
                stderr: s.fit.stderr,
                color: to_hex(s.color),
            })
            .collect::<Vec<_>>();

        let metadata = ReportMetadata {
            input_path: input_path.display().to_string(),
            generated_at: Utc::now(),
            x_column: model.x_label.clone(),
            y_column: model.y_label.clone(),
            category_column: category_column.map(String::from),
            plot_path: plot_path.map(|p| p.display().to_string()),
            rows: groups.iter().map(|g| g.n).sum(),
            x_extent: model.x_extent,
        };

        Self { metadata, groups }
    }
}
