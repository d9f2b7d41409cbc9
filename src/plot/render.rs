//! Figure rendering and file encoding.
//!
//! The figure is always drawn once with the plotters SVG backend; PDF and
//! PNG output are converted from that SVG document.

use crate::error::{PlotError, Result};
use crate::plot::model::PlotModel;
use plotters::prelude::*;
use std::fmt::Display;
use std::path::Path;
use tracing::debug;

/// Output file formats, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotFormat {
    Pdf,
    Svg,
    Png,
}

impl PlotFormat {
    /// Format for a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "pdf" => Ok(PlotFormat::Pdf),
            "svg" => Ok(PlotFormat::Svg),
            "png" => Ok(PlotFormat::Png),
            _ => Err(PlotError::UnsupportedFormat(ext)),
        }
    }
}

/// Drawing parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub point_size: u32,
    pub line_width: u32,
    pub caption: Option<String>,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            point_size: 4,
            line_width: 2,
            caption: None,
        }
    }
}

fn render_err<E: Display>(e: E) -> PlotError {
    PlotError::Render(e.to_string())
}

/// Draw the model as an SVG document.
pub fn render_svg(model: &PlotModel, style: &PlotStyle) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (style.width, style.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut builder = ChartBuilder::on(&root);
        builder.margin(16).x_label_area_size(48).y_label_area_size(64);
        if let Some(ref caption) = style.caption {
            builder.caption(caption, ("sans-serif", 22));
        }

        let mut chart = builder
            .build_cartesian_2d(
                model.x_axis.0..model.x_axis.1,
                model.y_axis.0..model.y_axis.1,
            )
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(model.x_label.as_str())
            .y_desc(model.y_label.as_str())
            .axis_desc_style(("sans-serif", 18))
            .draw()
            .map_err(render_err)?;

        let point_size = style.point_size;
        for series in &model.series {
            let [r, g, b] = series.color;
            let color = RGBColor(r, g, b);

            chart
                .draw_series(
                    series
                        .points
                        .iter()
                        .map(|&(x, y)| Circle::new((x, y), point_size, color.filled())),
                )
                .map_err(render_err)?
                .label(series.label.as_str())
                .legend(move |(x, y)| Circle::new((x + 10, y), point_size, color.filled()));

            chart
                .draw_series(LineSeries::new(
                    series.line.iter().copied(),
                    color.stroke_width(style.line_width),
                ))
                .map_err(render_err)?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .border_style(BLACK.mix(0.4))
            .background_style(WHITE.mix(0.8))
            .draw()
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
    }
    Ok(svg)
}

/// Encode an SVG document in the requested format.
pub fn encode(svg: &str, format: PlotFormat) -> Result<Vec<u8>> {
    match format {
        PlotFormat::Svg => Ok(svg.as_bytes().to_vec()),
        PlotFormat::Pdf => svg_to_pdf(svg),
        PlotFormat::Png => svg_to_png(svg),
    }
}

fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    use svg2pdf::usvg;

    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &options).map_err(render_err)?;
    let pdf = svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(render_err)?;

    debug!("Converted SVG to PDF ({} bytes)", pdf.len());
    Ok(pdf)
}

fn svg_to_png(svg: &str) -> Result<Vec<u8>> {
    use resvg::{tiny_skia, usvg};

    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &options).map_err(render_err)?;
    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| PlotError::Render("invalid image size".to_string()))?;
    pixmap.fill(tiny_skia::Color::WHITE);

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    let png = pixmap.encode_png().map_err(render_err)?;
    debug!("Rasterized SVG to PNG ({} bytes)", png.len());
    Ok(png)
}
