//! Plain-text rendering of tables and summaries for the terminal.

use std::fmt::Write as _;

use super::model::{format_decimal, is_integral, CellValue, Column, ColumnType, Table, SCIENTIFIC_ABOVE};
use super::ops::{ColumnInfo, Schema};
use super::stats::ColumnSummary;

const GAP: &str = "  ";

/// Render a table with its row labels. Tables longer than `max_rows`
/// (when non-zero) show the head and tail around a `...` line.
pub fn render_table(table: &Table, max_rows: usize) -> String {
    if table.column_count() == 0 || table.is_empty() {
        return format!(
            "Empty table\nColumns: [{}]\nIndex: []\n",
            table.column_names().join(", ")
        );
    }

    let total = table.row_count();
    let truncated = max_rows > 0 && total > max_rows;
    let shown: Vec<Option<usize>> = if truncated {
        let half = (max_rows / 2).max(1);
        (0..half)
            .map(Some)
            .chain(std::iter::once(None))
            .chain((total - half..total).map(Some))
            .collect()
    } else {
        (0..total).map(Some).collect()
    };

    let mut grid: Vec<Vec<String>> = Vec::with_capacity(table.column_count() + 1);
    let mut labels = vec![String::new()];
    labels.extend(shown.iter().map(|row| match row {
        Some(r) => table.index()[*r].to_string(),
        None => "...".to_string(),
    }));
    grid.push(labels);

    for col in table.columns() {
        let integral = integral_column(col);
        let mut cells = vec![col.name.clone()];
        cells.extend(shown.iter().map(|row| match row {
            Some(r) => format_cell(&col.values[*r], integral),
            None => "...".to_string(),
        }));
        grid.push(cells);
    }

    let mut out = render_grid(&grid);
    if truncated {
        let _ = writeln!(out, "\n[{total} rows x {} columns]", table.column_count());
    }
    out
}

pub fn render_column_names(schema: &Schema) -> String {
    let quoted: Vec<String> = schema.column_names.iter().map(|n| format!("'{n}'")).collect();
    format!("Columns: [{}]\n", quoted.join(", "))
}

pub fn render_types(schema: &Schema) -> String {
    let width = schema
        .column_names
        .iter()
        .map(|n| n.chars().count())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for (name, kind) in schema.column_names.iter().zip(&schema.column_types) {
        let _ = writeln!(out, "{name:<width$}{GAP}{kind}");
    }
    out
}

/// `index` holds the row labels, which survive drops and sorts.
pub fn render_info(schema: &Schema, info: &[ColumnInfo], index: &[usize]) -> String {
    let mut out = String::new();
    let rows = schema.row_count;
    match (index.first(), index.last()) {
        (Some(first), Some(last)) => {
            let _ = writeln!(out, "Index: {rows} entries, {first} to {last}");
        }
        _ => {
            let _ = writeln!(out, "Index: 0 entries");
        }
    }
    let _ = writeln!(out, "Data columns (total {} columns):", info.len());

    let mut grid = vec![
        vec!["#".to_string()],
        vec!["Column".to_string()],
        vec!["Non-Null Count".to_string()],
        vec!["Dtype".to_string()],
    ];
    for (i, col) in info.iter().enumerate() {
        grid[0].push(i.to_string());
        grid[1].push(col.name.clone());
        grid[2].push(format!("{} non-null", col.non_missing));
        grid[3].push(col.kind.to_string());
    }
    out.push_str(&render_grid_left(&grid));

    let numeric = info.iter().filter(|c| c.kind == ColumnType::Numeric).count();
    let _ = writeln!(out, "dtypes: numeric({numeric}), text({})", info.len() - numeric);
    out
}

/// `describe()`-style layout: statistic names down, columns across.
pub fn render_stats(stats: &[(String, ColumnSummary)]) -> String {
    if stats.is_empty() {
        return "No numeric columns to describe.\n".to_string();
    }
    let labels = ["", "count", "mean", "std", "min", "25%", "50%", "75%", "max"];
    let mut grid = vec![labels.iter().map(|s| s.to_string()).collect::<Vec<_>>()];
    for (name, summary) in stats {
        let mut cells = vec![name.clone()];
        cells.extend(summary.rows().iter().map(|(_, v)| match v {
            Some(v) => stat_cell(*v),
            None => "NaN".to_string(),
        }));
        grid.push(cells);
    }
    render_grid(&grid)
}

/// First `n` values of a derived sequence, e.g. `[10.0, 25.0, NaN]`.
pub fn render_sequence(values: &[Option<f64>], n: usize) -> String {
    let parts: Vec<String> = values
        .iter()
        .take(n)
        .map(|v| v.map_or_else(|| "NaN".to_string(), format_decimal))
        .collect();
    format!("[{}]", parts.join(", "))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Six decimals, or scientific notation once the magnitude gets large.
fn stat_cell(v: f64) -> String {
    if v.is_finite() && v.abs() >= SCIENTIFIC_ABOVE {
        format!("{v:.6e}")
    } else {
        format!("{v:.6}")
    }
}

fn integral_column(col: &Column) -> bool {
    col.is_numeric() && col.values.iter().all(|v| v.as_f64().is_some_and(is_integral))
}

fn format_cell(value: &CellValue, integral: bool) -> String {
    match value {
        CellValue::Number(v) if integral => format!("{v:.0}"),
        CellValue::Number(v) => format_decimal(*v),
        CellValue::Text(s) => s.clone(),
        CellValue::Missing => "NaN".to_string(),
    }
}

/// Column-major grid, every column right-aligned.
fn render_grid(grid: &[Vec<String>]) -> String {
    render_aligned(grid, |cell, width| format!("{cell:>width$}"))
}

fn render_grid_left(grid: &[Vec<String>]) -> String {
    render_aligned(grid, |cell, width| format!("{cell:<width$}"))
}

fn render_aligned(grid: &[Vec<String>], pad: impl Fn(&str, usize) -> String) -> String {
    let widths: Vec<usize> = grid
        .iter()
        .map(|col| col.iter().map(|c| c.chars().count()).max().unwrap_or(0))
        .collect();
    let height = grid.first().map_or(0, Vec::len);

    let mut out = String::new();
    for row in 0..height {
        let line: Vec<String> = grid
            .iter()
            .zip(&widths)
            .map(|(col, &w)| pad(&col[row], w))
            .collect();
        out.push_str(line.join(GAP).trim_end());
        out.push('\n');
    }
    out
}
