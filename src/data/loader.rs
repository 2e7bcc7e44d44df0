use std::collections::HashSet;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use super::model::{CellValue, Column, ColumnType, Table};
use crate::error::LoadError;

/// Cell contents read as the missing sentinel.
pub const MISSING_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a table from a CSV file with a header row.
pub fn load_csv(path: &Path) -> Result<Table, LoadError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    read_csv(file)
}

/// Parse CSV from any reader.
///
/// Two passes: every raw cell is read first, then each column is typed as
/// numeric when all of its non-missing cells parse as `f64`, else text.
pub fn read_csv<R: Read>(reader: R) -> Result<Table, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = unique_headers(reader.headers()?.iter());
    if headers.is_empty() {
        return Err(LoadError::NoColumns);
    }

    let width = headers.len();
    let mut raw: Vec<Vec<String>> = vec![Vec::new(); width];

    for result in reader.records() {
        let record = result?;
        if record.len() > width {
            return Err(LoadError::RaggedRecord {
                line: record.position().map_or(0, |p| p.line()),
                expected: width,
                found: record.len(),
            });
        }
        for (col_idx, cells) in raw.iter_mut().enumerate() {
            // Short records are padded with missing cells.
            cells.push(record.get(col_idx).unwrap_or("").to_string());
        }
    }

    let columns = headers
        .into_iter()
        .zip(raw)
        .map(|(name, cells)| infer_column(name, cells))
        .collect();

    let table = Table::new(columns)?;
    log::debug!(
        "parsed CSV: {} rows x {} columns",
        table.row_count(),
        table.column_count()
    );
    Ok(table)
}

pub fn is_missing_token(s: &str) -> bool {
    MISSING_TOKENS.contains(&s)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Blank headers become `Unnamed: <i>`; repeats get `.1`, `.2`, … suffixes.
fn unique_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let raw: Vec<String> = raw
        .enumerate()
        .map(|(i, h)| {
            if h.is_empty() {
                format!("Unnamed: {i}")
            } else {
                h.to_string()
            }
        })
        .collect();

    // A trailing delimiter-only header line produces no real columns.
    if raw.len() == 1 && raw[0] == "Unnamed: 0" {
        return Vec::new();
    }

    let mut taken: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(raw.len());
    for name in raw {
        let mut candidate = name.clone();
        let mut n = 0;
        while taken.contains(&candidate) {
            n += 1;
            candidate = format!("{name}.{n}");
        }
        taken.insert(candidate.clone());
        out.push(candidate);
    }
    out
}

fn infer_column(name: String, cells: Vec<String>) -> Column {
    let numeric: Option<Vec<CellValue>> = cells
        .iter()
        .map(|s| {
            if is_missing_token(s) {
                Some(CellValue::Missing)
            } else {
                // Spellings such as `NAN` or `+nan` parse; they still mean missing.
                s.trim().parse::<f64>().ok().map(|v| {
                    if v.is_nan() {
                        CellValue::Missing
                    } else {
                        CellValue::Number(v)
                    }
                })
            }
        })
        .collect();

    match numeric {
        Some(values) => Column {
            name,
            kind: ColumnType::Numeric,
            values,
        },
        None => Column {
            name,
            kind: ColumnType::Text,
            values: cells
                .into_iter()
                .map(|s| {
                    if is_missing_token(&s) {
                        CellValue::Missing
                    } else {
                        CellValue::Text(s)
                    }
                })
                .collect(),
        },
    }
}
