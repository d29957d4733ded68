//! Renders analysis results as a text table, CSV or JSON.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{ImageOutcome, ImageResult};

const TABLE_HEADER: [&str; 7] = ["Image", "Min", "Max", "Mean", "Std Dev", "Variance", "Objects"];
const CSV_HEADER: &str = "name,min,max,mean,stddev,variance,status";

/// Human-readable table, one row per image
pub fn render_table(results: &[ImageResult]) -> String {
    let rows: Vec<Vec<String>> = results.iter().map(table_row).collect();

    let mut widths: Vec<usize> = TABLE_HEADER.iter().map(|h| h.len()).collect();
    for row in &rows {
        // Marker rows span the numeric columns and do not widen them
        if row.len() == TABLE_HEADER.len() {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        } else {
            widths[0] = widths[0].max(row[0].chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = TABLE_HEADER.iter().map(|h| h.to_string()).collect();
    push_row(&mut out, &header, &widths);

    let separator: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    push_row(&mut out, &separator, &widths);

    for row in &rows {
        push_row(&mut out, row, &widths);
    }

    out
}

fn table_row(result: &ImageResult) -> Vec<String> {
    match &result.outcome {
        ImageOutcome::Measured(stats) => vec![
            result.name.clone(),
            stats.min.to_string(),
            stats.max.to_string(),
            format!("{:.3}", stats.mean),
            format!("{:.3}", stats.std_dev),
            format!("{:.3}", stats.variance),
            stats.samples.to_string(),
        ],
        ImageOutcome::NoObjects => vec![result.name.clone(), "no objects detected".to_string()],
        ImageOutcome::Failed { reason } => vec![result.name.clone(), format!("failed: {}", reason)],
    }
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let full_row = cells.len() == widths.len();
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push_str(" | ");
        }
        let width = if full_row || i == 0 { widths[i] } else { 0 };
        // Names are left-aligned, numbers right-aligned
        if i == 0 {
            let _ = write!(line, "{:<width$}", cell);
        } else {
            let _ = write!(line, "{:>width$}", cell);
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Delimited report: `name,min,max,mean,stddev,variance,status`
///
/// Numeric columns are left empty for images without measurements.
pub fn render_csv(results: &[ImageResult]) -> String {
    let mut out = String::new();
    out.push_str(CSV_HEADER);
    out.push('\n');

    for result in results {
        let name = csv_field(&result.name);
        let line = match &result.outcome {
            ImageOutcome::Measured(stats) => format!(
                "{},{},{},{},{},{},ok",
                name, stats.min, stats.max, stats.mean, stats.std_dev, stats.variance
            ),
            ImageOutcome::NoObjects => format!("{},,,,,,no_objects", name),
            ImageOutcome::Failed { .. } => format!("{},,,,,,failed", name),
        };
        out.push_str(&line);
        out.push('\n');
    }

    out
}

/// Quote a CSV field when it contains a delimiter, quote or line break
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub fn write_csv(path: &Path, results: &[ImageResult]) -> Result<()> {
    std::fs::write(path, render_csv(results))
        .with_context(|| format!("Failed to write CSV report to {}", path.display()))
}

pub fn render_json(results: &[ImageResult]) -> Result<String> {
    serde_json::to_string_pretty(results).context("Failed to serialize results")
}
