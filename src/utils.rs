//! Utility functions for querynova
//!
//! Plain-text rendering of results for the terminal.

use crate::schema::Schema;
use crate::storage::QueryRows;
use std::time::Duration;

/// Format a duration as seconds with two decimals
pub fn format_seconds(duration: Duration) -> String {
    format!("{:.2} seconds", duration.as_secs_f64())
}

/// Shorten a cell to at most `max_width` characters, marking the cut with "..."
pub fn truncate_cell(text: &str, max_width: usize) -> String {
    let text = text.replace('\n', " ");
    if text.chars().count() <= max_width {
        return text;
    }
    let kept: String = text.chars().take(max_width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Render rows as an aligned text table, showing at most `max_rows` rows
pub fn format_table(rows: &QueryRows, max_rows: usize, max_cell_width: usize) -> String {
    if rows.columns.is_empty() {
        return "(no columns)".to_string();
    }

    let header: Vec<String> = rows
        .columns
        .iter()
        .map(|c| truncate_cell(c, max_cell_width))
        .collect();
    let body: Vec<Vec<String>> = rows
        .rows
        .iter()
        .take(max_rows)
        .map(|row| {
            row.iter()
                .map(|cell| truncate_cell(&cell.to_string(), max_cell_width))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &body {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }

    let render_line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(body.len() + 3);
    lines.push(render_line(&header));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in &body {
        lines.push(render_line(row));
    }

    if rows.is_empty() {
        lines.push("(0 rows)".to_string());
    } else if rows.row_count() > max_rows {
        lines.push(format!("... {} more rows", rows.row_count() - max_rows));
    }

    lines.join("\n")
}

/// One line per table: `name (col1, col2)`
pub fn format_schema(schema: &Schema) -> String {
    schema
        .tables()
        .iter()
        .map(|t| format!("{} ({})", t.name, t.columns.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}
