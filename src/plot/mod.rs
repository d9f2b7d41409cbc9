//! Grouped regression scatter plots.
//!
//! [`plot`] fits one least squares line per category group, draws each
//! group's points and line in the group's color, and writes the figure to
//! a single file whose format follows the file extension.

pub mod model;
pub mod palette;
pub mod render;

pub use model::{build_model, PlotModel};
pub use palette::Palette;
pub use render::{PlotFormat, PlotStyle};

use crate::analysis::Grouping;
use crate::dataset::Dataset;
use crate::error::{PlotError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default plot file name for the given column labels.
///
/// `compose_plot_file_name("A", "B", None)` is `"A-v-B.pdf"`, and with a
/// category `"C"` it is `"A-v-B-by-C.pdf"`. An empty category counts as none.
pub fn compose_plot_file_name(x_label: &str, y_label: &str, category_label: Option<&str>) -> String {
    let category_str = match category_label {
        Some(c) if !c.is_empty() => format!("-by-{}", c),
        _ => String::new(),
    };
    format!("{}-v-{}{}.pdf", x_label, y_label, category_str)
}

/// Which columns to regress and where to save the figure.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotRequest {
    pub x_column: String,
    pub y_column: String,
    pub grouping: Grouping,
    /// Explicit output path; derived from the column names when absent.
    pub output_path: Option<PathBuf>,
}

impl PlotRequest {
    pub fn new(x_column: &str, y_column: &str, category_column: Option<&str>) -> Self {
        Self {
            x_column: x_column.to_string(),
            y_column: y_column.to_string(),
            grouping: Grouping::from_column(category_column),
            output_path: None,
        }
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// The explicit output path, or the composed default in the working directory.
    pub fn resolved_output_path(&self) -> PathBuf {
        match self.output_path {
            Some(ref path) if !path.as_os_str().is_empty() => path.clone(),
            _ => PathBuf::from(compose_plot_file_name(
                &self.x_column,
                &self.y_column,
                self.grouping.column(),
            )),
        }
    }
}

/// What [`plot`] produced.
#[derive(Debug, Clone)]
pub struct PlotOutcome {
    pub path: PathBuf,
    pub format: PlotFormat,
    pub bytes_written: usize,
    pub model: PlotModel,
}

/// Regress, draw and save.
///
/// All fits are computed before anything is written, so on error no file
/// is created.
pub fn plot(
    dataset: &Dataset,
    request: &PlotRequest,
    style: &PlotStyle,
    palette: &Palette,
) -> Result<PlotOutcome> {
    let path = request.resolved_output_path();
    let format = PlotFormat::from_path(&path)?;

    let model = build_model(
        dataset,
        &request.x_column,
        &request.y_column,
        &request.grouping,
        palette,
    )?;
    info!(
        "Fitted {} group(s) of '{}' on '{}'",
        model.series.len(),
        request.y_column,
        request.x_column
    );

    let svg = render::render_svg(&model, style)?;
    let bytes = render::encode(&svg, format)?;
    write_plot(&path, &bytes)?;

    Ok(PlotOutcome {
        path,
        format,
        bytes_written: bytes.len(),
        model,
    })
}

fn write_plot(path: &Path, bytes: &[u8]) -> Result<()> {
    debug!("Writing {} bytes to {}", bytes.len(), path.display());
    std::fs::write(path, bytes).map_err(|source| PlotError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}
