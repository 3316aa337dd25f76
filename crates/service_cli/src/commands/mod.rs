//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Commands build plain
//! rows first and then render them as a table or as JSON.

pub mod calendar;
pub mod check;
pub mod progress;
pub mod upcoming;

use serde::Serialize;

use crate::config::OutputFormat;
use crate::Result;

/// Print `rows` in the configured format
pub(crate) fn emit<T, F>(format: OutputFormat, rows: &T, table: F) -> Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    let output = match format {
        OutputFormat::Json => serde_json::to_string_pretty(rows)?,
        OutputFormat::Table => table(rows),
    };
    println!("{output}");
    Ok(())
}

/// Render a box-drawn table with left-aligned columns
pub(crate) fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let placeholder = [vec!["(no data)".to_string()]];
    let rows = if rows.is_empty() { &placeholder[..] } else { rows };

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{left}{}{right}", segments.join(mid))
    };
    let line = |cells: &[String]| {
        let padded: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                let pad = w - cell.chars().count();
                format!(" {cell}{} ", " ".repeat(pad))
            })
            .collect();
        format!("│{}│", padded.join("│"))
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let mut out = vec![rule("┌", "┬", "┐"), line(&header_cells), rule("├", "┼", "┤")];
    out.extend(rows.iter().map(|row| line(row)));
    out.push(rule("└", "┴", "┘"));
    out.join("\n")
}

/// Display an optional value, or a dash when absent
pub(crate) fn or_dash<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
