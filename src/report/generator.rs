//! Markdown and JSON report generation.
//!
//! This module renders a `DashboardReport` as a Markdown document (one
//! section per insight plus the heatmap table) or as pretty-printed JSON.

use crate::analysis::format_number;
use crate::error::Result;
use crate::models::{DashboardReport, InsightSection, Matrix, ReportMetadata};
use std::io::Write;
use std::path::Path;

const HEATMAP_TITLE: &str = "Age × Product Heatmap";

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &DashboardReport) -> String {
    let mut output = String::new();

    output.push_str("# Insightboard Report\n\n");

    output.push_str(&generate_metadata_section(&report.metadata));

    output.push_str(&generate_table_of_contents(report));

    for section in &report.insights {
        output.push_str(&generate_insight_section(section));
    }

    if let Some(ref matrix) = report.heatmap {
        output.push_str(&generate_heatmap_section(matrix));
    }

    output.push_str(&generate_footer());

    output
}

fn anchor(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => Some(c),
            ' ' => Some('-'),
            _ => None,
        })
        .collect()
}

/// Escape a value for use inside a Markdown table cell.
fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Dataset:** `{}`\n", metadata.dataset));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!(
        "- **Records:** {}\n",
        format_number(metadata.record_count as f64)
    ));
    section.push('\n');

    section
}

/// Generate the table of contents.
fn generate_table_of_contents(report: &DashboardReport) -> String {
    let mut toc = String::new();

    toc.push_str("## Table of Contents\n\n");
    toc.push_str("- [Metadata](#metadata)\n");

    for section in &report.insights {
        toc.push_str(&format!("- [{}](#{})\n", section.title, anchor(&section.title)));
    }

    if report.heatmap.is_some() {
        toc.push_str(&format!("- [{}](#{})\n", HEATMAP_TITLE, anchor(HEATMAP_TITLE)));
    }

    toc.push('\n');

    toc
}

/// Generate the section for one insight.
fn generate_insight_section(insight: &InsightSection) -> String {
    let mut section = String::new();

    section.push_str(&format!("## {}\n\n", insight.title));

    if insight.kind.is_none() {
        section.push_str(&format!(
            "*Unknown insight `{}`. No data available.*\n\n",
            insight.identifier
        ));
        return section;
    }

    section.push_str(&format!(
        "*Insight: `{}` | Labels: {} | Total: {}*\n\n",
        insight.identifier,
        insight.series.len(),
        format_number(insight.series.total())
    ));

    if insight.series.is_empty() {
        section.push_str("No data available for this insight.\n\n");
    } else {
        section.push_str("| Label | Value |\n");
        section.push_str("|:---|---:|\n");
        for (label, value) in insight.series.iter() {
            section.push_str(&format!(
                "| {} | {} |\n",
                escape_cell(label),
                format_number(value)
            ));
        }
        section.push('\n');
    }

    if !insight.takeaways.is_empty() {
        section.push_str("### Key Takeaways\n\n");
        for takeaway in &insight.takeaways {
            section.push_str(&format!("- {}\n", takeaway));
        }
        section.push('\n');
    }

    section
}

/// Generate the heatmap table. Cells above half the maximum count are bold.
fn generate_heatmap_section(matrix: &Matrix) -> String {
    let mut section = String::new();

    section.push_str(&format!("## {}\n\n", HEATMAP_TITLE));

    if matrix.is_empty() {
        section.push_str("No records to tabulate.\n\n");
        return section;
    }

    let max = matrix.max_count();

    section.push_str("| Age ↓ / Product → |");
    for product in &matrix.products {
        section.push_str(&format!(" {} |", escape_cell(product)));
    }
    section.push('\n');

    section.push_str("|:---:|");
    for _ in &matrix.products {
        section.push_str(":---:|");
    }
    section.push('\n');

    for (age, row) in matrix.ages.iter().zip(&matrix.counts) {
        section.push_str(&format!("| {} |", age));
        for &count in row {
            if count * 2 > max {
                section.push_str(&format!(" **{}** |", count));
            } else {
                section.push_str(&format!(" {} |", count));
            }
        }
        section.push('\n');
    }
    section.push('\n');

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    let mut footer = String::new();

    footer.push_str("---\n\n");
    footer.push_str("*Report generated by Insightboard*\n");

    footer
}

/// Generate a JSON report.
pub fn generate_json_report(report: &DashboardReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Write rendered report content to `path`, or to stdout for `-`.
pub fn write_report(content: &str, path: &Path) -> Result<()> {
    if crate::cli::is_stdout(&path.to_string_lossy()) {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(content.as_bytes())?;
        handle.flush()?;
        return Ok(());
    }

    let mut file = std::fs::File::create(path)?;
    file.write_all(content.as_bytes())?;

    Ok(())
}
