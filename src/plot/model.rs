//! Plot model: everything that ends up on the figure, computed up front.
//!
//! Building the model performs every regression before anything is drawn,
//! so a failing group never leaves a partial plot on disk.

use crate::analysis::{fit_line, partition, FitError, Grouping, LineFit};
use crate::dataset::Dataset;
use crate::error::{PlotError, Result};
use crate::plot::palette::Palette;
use tracing::debug;

/// Fraction of the data span added on each side of an axis.
const AXIS_PADDING: f64 = 0.05;

/// One group's scatter points and regression line.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSeries {
    pub label: String,
    pub color: [u8; 3],
    pub points: Vec<(f64, f64)>,
    pub fit: LineFit,
    /// Line endpoints at the global X minimum and maximum.
    pub line: [(f64, f64); 2],
}

/// A fully computed figure.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotModel {
    pub x_label: String,
    pub y_label: String,
    /// Global X extent across all rows; every line spans exactly this.
    pub x_extent: (f64, f64),
    /// Padded axis ranges.
    pub x_axis: (f64, f64),
    pub y_axis: (f64, f64),
    pub series: Vec<GroupSeries>,
}

/// Regress every group and lay out the figure.
pub fn build_model(
    dataset: &Dataset,
    x_column: &str,
    y_column: &str,
    grouping: &Grouping,
    palette: &Palette,
) -> Result<PlotModel> {
    let xs = dataset.numeric_column(x_column)?;
    let ys = dataset.numeric_column(y_column)?;

    let x_min = xs.iter().copied().fold(f64::INFINITY, f64::min);
    let x_max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let groups = partition(dataset, grouping)?;
    debug!("Partitioned {} rows into {} group(s)", dataset.len(), groups.len());

    let mut series = Vec::with_capacity(groups.len());
    for (index, group) in groups.into_iter().enumerate() {
        let gx: Vec<f64> = group.rows.iter().map(|&r| xs[r]).collect();
        let gy: Vec<f64> = group.rows.iter().map(|&r| ys[r]).collect();

        let fit = fit_line(&gx, &gy).map_err(|e| match e {
            FitError::InsufficientData(points) => PlotError::InsufficientData {
                group: group.label.clone(),
                points,
            },
            FitError::ConstantX => PlotError::DegenerateInput {
                group: group.label.clone(),
            },
            other => PlotError::Fit {
                group: group.label.clone(),
                source: other,
            },
        })?;

        debug!(
            "Group '{}': n={} slope={:.4} intercept={:.4} r={:.4}",
            group.label, fit.n, fit.slope, fit.intercept, fit.r_value
        );

        series.push(GroupSeries {
            color: palette.color(index),
            points: gx.into_iter().zip(gy).collect(),
            line: [(x_min, fit.predict(x_min)), (x_max, fit.predict(x_max))],
            fit,
            label: group.label,
        });
    }

    let (y_lo, y_hi) = series
        .iter()
        .flat_map(|s| s.points.iter().chain(s.line.iter()).map(|&(_, y)| y))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });

    Ok(PlotModel {
        x_label: x_column.to_string(),
        y_label: y_column.to_string(),
        x_extent: (x_min, x_max),
        x_axis: axis_range("x", x_min, x_max)?,
        y_axis: axis_range("y", y_lo, y_hi)?,
        series,
    })
}

/// Padded axis range. Both ends and the span between them must be finite.
fn axis_range(axis: &str, min: f64, max: f64) -> Result<(f64, f64)> {
    // Halve before subtracting so extreme but finite data cannot overflow here.
    let half_span = max / 2.0 - min / 2.0;
    let pad = if half_span > 0.0 {
        half_span * (2.0 * AXIS_PADDING)
    } else {
        1.0
    };
    let (lo, hi) = (min - pad, max + pad);

    if lo.is_finite() && hi.is_finite() && (hi - lo).is_finite() {
        Ok((lo, hi))
    } else {
        Err(PlotError::AxisRange {
            axis: axis.to_string(),
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-10;

    fn dataset(rows: &[(f64, f64, &str)]) -> Dataset {
        Dataset::new(
            vec!["x".into(), "y".into(), "cat".into()],
            rows.iter()
                .map(|(x, y, c)| vec![x.to_string(), y.to_string(), c.to_string()])
                .collect(),
        )
    }

    fn grouped() -> Grouping {
        Grouping::from_column(Some("cat"))
    }

    #[test]
    fn test_two_group_example() {
        let ds = dataset(&[(1.0, 2.0, "A"), (2.0, 4.0, "A"), (1.0, 1.0, "B"), (3.0, 3.0, "B")]);
        let model = build_model(&ds, "x", "y", &grouped(), &Palette::default()).unwrap();

        assert_eq!(model.series.len(), 2);
        let a = &model.series[0];
        let b = &model.series[1];
        assert_eq!(a.label, "A");
        assert_eq!(b.label, "B");
        assert!((a.fit.slope - 2.0).abs() < EPS);
        assert!(a.fit.intercept.abs() < EPS);
        assert!((b.fit.slope - 1.0).abs() < EPS);
        assert!(b.fit.intercept.abs() < EPS);
        assert_eq!(model.x_label, "x");
        assert_eq!(model.y_label, "y");
    }

    #[test]
    fn test_lines_span_global_extent() {
        // Group A lives in [1, 2], group B in [5, 10]; both lines must cover [1, 10].
        let ds = dataset(&[
            (1.0, 1.0, "A"),
            (2.0, 3.0, "A"),
            (5.0, 0.0, "B"),
            (10.0, 5.0, "B"),
        ]);
        let model = build_model(&ds, "x", "y", &grouped(), &Palette::default()).unwrap();

        assert_eq!(model.x_extent, (1.0, 10.0));
        for s in &model.series {
            assert_eq!(s.line[0].0, 1.0);
            assert_eq!(s.line[1].0, 10.0);
            assert!((s.line[0].1 - s.fit.predict(1.0)).abs() < EPS);
            assert!((s.line[1].1 - s.fit.predict(10.0)).abs() < EPS);
        }
    }

    #[test]
    fn test_known_linear_relationship_any_group() {
        let rows: Vec<(f64, f64, &str)> = (0..6)
            .map(|i| {
                let x = i as f64;
                (x, 2.0 * x + 1.0, if i % 2 == 0 { "even" } else { "odd" })
            })
            .collect();
        let model = build_model(&dataset(&rows), "x", "y", &grouped(), &Palette::default()).unwrap();

        for s in &model.series {
            assert!((s.fit.slope - 2.0).abs() < EPS);
            assert!((s.fit.intercept - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn test_colors_follow_group_order() {
        let palette = Palette::from_hex(["#000000", "#ffffff"]);
        let ds = dataset(&[
            (1.0, 1.0, "a"),
            (2.0, 2.0, "a"),
            (1.0, 1.0, "b"),
            (2.0, 3.0, "b"),
            (1.0, 2.0, "c"),
            (2.0, 1.0, "c"),
        ]);
        let model = build_model(&ds, "x", "y", &grouped(), &palette).unwrap();
        let colors: Vec<[u8; 3]> = model.series.iter().map(|s| s.color).collect();
        assert_eq!(colors, vec![[0, 0, 0], [255, 255, 255], [0, 0, 0]]);
    }

    #[test]
    fn test_ungrouped_single_series() {
        let ds = dataset(&[(1.0, 2.0, "A"), (2.0, 4.0, "B"), (3.0, 6.0, "C")]);
        let model = build_model(&ds, "x", "y", &Grouping::Ungrouped, &Palette::default()).unwrap();
        assert_eq!(model.series.len(), 1);
        assert_eq!(model.series[0].label, "all");
        assert_eq!(model.series[0].points.len(), 3);
    }

    #[test]
    fn test_single_row_group_fails() {
        let ds = dataset(&[(1.0, 2.0, "A"), (2.0, 4.0, "A"), (3.0, 1.0, "B")]);
        let result = build_model(&ds, "x", "y", &grouped(), &Palette::default());
        assert!(matches!(
            result,
            Err(PlotError::InsufficientData { ref group, points: 1 }) if group == "B"
        ));
    }

    #[test]
    fn test_constant_x_group_fails() {
        let ds = dataset(&[(1.0, 2.0, "A"), (2.0, 4.0, "A"), (3.0, 1.0, "B"), (3.0, 5.0, "B")]);
        let result = build_model(&ds, "x", "y", &grouped(), &Palette::default());
        assert!(matches!(
            result,
            Err(PlotError::DegenerateInput { ref group }) if group == "B"
        ));
    }

    #[test]
    fn test_axes_cover_points_and_lines() {
        let ds = dataset(&[(0.0, 0.0, "A"), (10.0, 10.0, "A")]);
        let model = build_model(&ds, "x", "y", &grouped(), &Palette::default()).unwrap();
        assert!(model.x_axis.0 < 0.0 && model.x_axis.1 > 10.0);
        assert!(model.y_axis.0 < 0.0 && model.y_axis.1 > 10.0);
    }

    #[test]
    fn test_x_span_beyond_f64_is_rejected() {
        let ds = dataset(&[(-1e308, 0.0, "A"), (1e308, 1.0, "A")]);
        let result = build_model(&ds, "x", "y", &Grouping::Ungrouped, &Palette::default());
        assert!(matches!(
            result,
            Err(PlotError::AxisRange { ref axis, .. }) if axis == "x"
        ));
    }

    #[test]
    fn test_wide_but_finite_axes() {
        let ds = dataset(&[(-1e300, 0.0, "A"), (1e300, 1.0, "A")]);
        let model = build_model(&ds, "x", "y", &Grouping::Ungrouped, &Palette::default()).unwrap();
        assert!(model.x_axis.0 < -1e300 && model.x_axis.1 > 1e300);
        assert!((model.x_axis.1 - model.x_axis.0).is_finite());
    }

    #[test]
    fn test_overflowing_fit_is_an_error() {
        let ds = dataset(&[(0.0, 0.0, "A"), (1e200, 1e200, "A")]);
        let result = build_model(&ds, "x", "y", &grouped(), &Palette::default());
        assert!(matches!(
            result,
            Err(PlotError::Fit { ref group, source: FitError::Overflow }) if group == "A"
        ));
    }

    #[test]
    fn test_input_not_mutated() {
        let ds = dataset(&[(1.0, 2.0, "A"), (2.0, 4.0, "A")]);
        let before = ds.clone();
        build_model(&ds, "x", "y", &grouped(), &Palette::default()).unwrap();
        assert_eq!(ds, before);
    }
}
