//! Fit summary generation.
//!
//! Renders a [`FitReport`] as Markdown or JSON.

use crate::models::{FitReport, GroupSummary, ReportMetadata};
use anyhow::Result;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &FitReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "# {} vs {}\n\n",
        report.metadata.y_column, report.metadata.x_column
    ));

    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_fits_section(&report.groups));

    output
}

/// Generate a JSON report.
pub fn generate_json_report(report: &FitReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Input:** `{}`\n", metadata.input_path));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **X column:** `{}`\n", metadata.x_column));
    section.push_str(&format!("- **Y column:** `{}`\n", metadata.y_column));
    match metadata.category_column {
        Some(ref category) => section.push_str(&format!("- **Grouped by:** `{}`\n", category)),
        None => section.push_str("- **Grouped by:** (none)\n"),
    }
    if let Some(ref plot_path) = metadata.plot_path {
        section.push_str(&format!("- **Plot:** `{}`\n", plot_path));
    }
    section.push_str(&format!("- **Rows:** {}\n", metadata.rows));
    section.push_str(&format!(
        "- **Line extent:** {} to {}\n",
        metadata.x_extent.0, metadata.x_extent.1
    ));
    section.push('\n');

    section
}

fn generate_fits_section(groups: &[GroupSummary]) -> String {
    let mut section = String::new();

    section.push_str("## Regression Lines\n\n");
    section.push_str("| Group | n | Slope | Intercept | r | r² | Slope SE | Color |\n");
    section.push_str("|:---|---:|---:|---:|---:|---:|---:|:---:|\n");

    for g in groups {
        section.push_str(&format!(
            "| {} | {} | {:.4} | {:.4} | {:.4} | {:.4} | {:.4} | `{}` |\n",
            escape_cell(&g.label),
            g.n,
            g.slope,
            g.intercept,
            g.r_value,
            g.r_squared,
            g.stderr,
            g.color
        ));
    }
    section.push('\n');

    section
}

fn escape_cell(text: &str) -> String {
    if text.is_empty() {
        "(empty)".to_string()
    } else {
        text.replace('|', "\\|")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn create_test_report() -> FitReport {
        FitReport {
            metadata: ReportMetadata {
                input_path: "iris.csv".to_string(),
                generated_at: Utc::now(),
                x_column: "petal_length_cm".to_string(),
                y_column: "sepal_length_cm".to_string(),
                category_column: Some("species".to_string()),
                plot_path: Some("petal_length_cm-v-sepal_length_cm-by-species.pdf".to_string()),
                rows: 4,
                x_extent: (1.0, 3.0),
            },
            groups: vec![
                GroupSummary {
                    label: "setosa".to_string(),
                    n: 2,
                    slope: 2.0,
                    intercept: 0.0,
                    r_value: 1.0,
                    r_squared: 1.0,
                    stderr: 0.0,
                    color: "#1f77b4".to_string(),
                },
                GroupSummary {
                    label: "a|b".to_string(),
                    n: 2,
                    slope: 1.0,
                    intercept: 0.0,
                    r_value: 1.0,
                    r_squared: 1.0,
                    stderr: 0.0,
                    color: "#ff7f0e".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_markdown_report() {
        let md = generate_markdown_report(&create_test_report());
        assert!(md.starts_with("# sepal_length_cm vs petal_length_cm"));
        assert!(md.contains("## Metadata"));
        assert!(md.contains("- **Grouped by:** `species`"));
        assert!(md.contains("| setosa | 2 | 2.0000 | 0.0000 |"));
        assert!(md.contains("a\\|b"));
    }

    #[test]
    fn test_json_report_round_trips() {
        let report = create_test_report();
        let json = generate_json_report(&report).unwrap();
        let parsed: FitReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.groups, report.groups);
    }
}
