use std::cmp::Ordering;
use std::collections::HashMap;

use super::model::{CellValue, Column, ColumnType, Table};
use crate::error::ColumnError;

// ---------------------------------------------------------------------------
// Inspection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub row_count: usize,
    pub column_names: Vec<String>,
    pub column_types: Vec<ColumnType>,
}

/// One line of the "Basic info" summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub non_missing: usize,
    pub kind: ColumnType,
}

pub fn describe_schema(table: &Table) -> Schema {
    Schema {
        row_count: table.row_count(),
        column_names: table.column_names(),
        column_types: table.columns().iter().map(|c| c.kind).collect(),
    }
}

pub fn info(table: &Table) -> Vec<ColumnInfo> {
    table
        .columns()
        .iter()
        .map(|c| ColumnInfo {
            name: c.name.clone(),
            non_missing: c.len() - c.missing_count(),
            kind: c.kind,
        })
        .collect()
}

pub fn head(table: &Table, n: usize) -> Table {
    let rows: Vec<usize> = (0..n.min(table.row_count())).collect();
    table.take_rows(&rows)
}

pub fn tail(table: &Table, n: usize) -> Table {
    let total = table.row_count();
    let rows: Vec<usize> = (total - n.min(total)..total).collect();
    table.take_rows(&rows)
}

// ---------------------------------------------------------------------------
// Column lookups
// ---------------------------------------------------------------------------

pub fn require_column<'a>(table: &'a Table, name: &str) -> Result<&'a Column, ColumnError> {
    table
        .column(name)
        .ok_or_else(|| ColumnError::NotFound(name.to_string()))
}

pub fn require_numeric<'a>(table: &'a Table, name: &str) -> Result<&'a Column, ColumnError> {
    let col = require_column(table, name)?;
    if col.is_numeric() {
        Ok(col)
    } else {
        Err(ColumnError::NotNumeric(name.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Derivations
// ---------------------------------------------------------------------------

/// Scale a numeric column by `factor`. The table itself is not modified;
/// missing cells stay `None`.
pub fn multiply_column(table: &Table, name: &str, factor: f64) -> Result<Vec<Option<f64>>, ColumnError> {
    let col = require_numeric(table, name)?;
    Ok(col.values.iter().map(|v| v.as_f64().map(|x| x * factor)).collect())
}

/// Stable descending sort on one column. Missing values go last.
pub fn sort_by_column_descending(table: &Table, name: &str) -> Result<Table, ColumnError> {
    let col = require_column(table, name)?;
    let mut rows: Vec<usize> = (0..table.row_count()).collect();
    rows.sort_by(|&a, &b| descending_missing_last(&col.values[a], &col.values[b]));
    Ok(table.take_rows(&rows))
}

fn descending_missing_last(a: &CellValue, b: &CellValue) -> Ordering {
    match (a.is_missing(), b.is_missing()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.cmp(a),
    }
}

/// Count occurrences of each non-missing value, most frequent first;
/// ties keep first-seen order.
pub fn value_counts(table: &Table, name: &str) -> Result<Vec<(CellValue, usize)>, ColumnError> {
    let col = require_column(table, name)?;
    let mut position: HashMap<&CellValue, usize> = HashMap::new();
    let mut counts: Vec<(CellValue, usize)> = Vec::new();

    for value in col.values.iter().filter(|v| !v.is_missing()) {
        match position.get(value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                position.insert(value, counts.len());
                counts.push((value.clone(), 1));
            }
        }
    }

    // `sort_by` is stable, which keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(counts)
}
