use std::collections::HashSet;
use std::fmt;

use crate::error::TableError;

// ---------------------------------------------------------------------------
// CellValue – a single cell of a column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value.
/// Counting and sorting key on values, so `CellValue` must be `Ord + Hash`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    /// The missing sentinel.
    Missing,
}

// -- Manual Eq/Ord so CellValue can be a map key and a sort key --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Missing => 0,
                Number(_) => 1,
                Text(_) => 2,
            }
        }
        match (self, other) {
            (Number(a), Number(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => discriminant(self).cmp(&discriminant(other)),
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Number(v) => v.to_bits().hash(state),
            CellValue::Text(s) => s.hash(state),
            CellValue::Missing => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) if is_integral(*v) => write!(f, "{v:.0}"),
            CellValue::Number(v) => write!(f, "{}", format_decimal(*v)),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Missing => write!(f, "NaN"),
        }
    }
}

impl CellValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }
}

/// Magnitude from which numbers print in scientific notation.
pub const SCIENTIFIC_ABOVE: f64 = 1e15;

/// Whole numbers small enough to print without an exponent.
pub fn is_integral(v: f64) -> bool {
    v.is_finite() && v.fract() == 0.0 && v.abs() < SCIENTIFIC_ABOVE
}

/// Up to six decimals, trailing zeros trimmed, at least one decimal kept.
/// Large magnitudes switch to scientific notation.
pub fn format_decimal(v: f64) -> String {
    if !v.is_finite() {
        return if v.is_nan() {
            "NaN".to_string()
        } else if v > 0.0 {
            "inf".to_string()
        } else {
            "-inf".to_string()
        };
    }
    if v.abs() >= SCIENTIFIC_ABOVE {
        return format!("{v:e}");
    }
    let mut s = format!("{v:.6}");
    while s.ends_with('0') && !s.ends_with(".0") {
        s.pop();
    }
    if s == "-0.0" {
        s.remove(0);
    }
    s
}

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Numeric,
    Text,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Numeric => write!(f, "numeric"),
            ColumnType::Text => write!(f, "text"),
        }
    }
}

/// A named column. Numeric columns hold only `Number`/`Missing`,
/// text columns only `Text`/`Missing`.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnType,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn numeric(name: &str, values: impl IntoIterator<Item = Option<f64>>) -> Self {
        Column {
            name: name.to_string(),
            kind: ColumnType::Numeric,
            values: values
                .into_iter()
                .map(|v| v.map_or(CellValue::Missing, CellValue::Number))
                .collect(),
        }
    }

    pub fn text<S: Into<String>>(name: &str, values: impl IntoIterator<Item = Option<S>>) -> Self {
        Column {
            name: name.to_string(),
            kind: ColumnType::Text,
            values: values
                .into_iter()
                .map(|v| v.map_or(CellValue::Missing, |s| CellValue::Text(s.into())))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_numeric(&self) -> bool {
        self.kind == ColumnType::Numeric
    }

    /// Non-missing numbers in row order.
    pub fn numbers(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().filter_map(CellValue::as_f64)
    }

    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }

    fn take(&self, rows: &[usize]) -> Column {
        Column {
            name: self.name.clone(),
            kind: self.kind,
            values: rows.iter().map(|&r| self.values[r].clone()).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Uniquely named, equal-length columns plus the original label of each row.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    index: Vec<usize>,
}

impl Table {
    /// Build a table whose rows are labelled `0..n`.
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        let rows = columns.first().map_or(0, Column::len);
        Self::with_index(columns, (0..rows).collect())
    }

    pub fn with_index(columns: Vec<Column>, index: Vec<usize>) -> Result<Self, TableError> {
        let mut seen = HashSet::new();
        for col in &columns {
            if !seen.insert(col.name.as_str()) {
                return Err(TableError::DuplicateColumn(col.name.clone()));
            }
        }
        let expected = columns.first().map_or(index.len(), Column::len);
        if let Some(bad) = columns.iter().find(|c| c.len() != expected) {
            return Err(TableError::RaggedColumn {
                name: bad.name.clone(),
                expected,
                found: bad.len(),
            });
        }
        if index.len() != expected {
            return Err(TableError::IndexLength {
                expected,
                found: index.len(),
            });
        }
        Ok(Table { columns, index })
    }

    pub fn row_count(&self) -> usize {
        self.index.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub(crate) fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Original row labels, one per row.
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    pub fn row_has_missing(&self, row: usize) -> bool {
        self.columns.iter().any(|c| c.values[row].is_missing())
    }

    /// New table holding the given row positions, in the given order.
    pub fn take_rows(&self, rows: &[usize]) -> Table {
        Table {
            columns: self.columns.iter().map(|c| c.take(rows)).collect(),
            index: rows.iter().map(|&r| self.index[r]).collect(),
        }
    }

    /// Keep only the rows for which `keep` holds, preserving order.
    pub(crate) fn retain_rows(&mut self, keep: impl Fn(usize) -> bool) {
        let rows: Vec<usize> = (0..self.row_count()).filter(|&r| keep(r)).collect();
        *self = self.take_rows(&rows);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_names() {
        let err = Table::new(vec![
            Column::numeric("a", [Some(1.0)]),
            Column::numeric("a", [Some(2.0)]),
        ])
        .unwrap_err();
        assert_eq!(err, TableError::DuplicateColumn("a".into()));
    }

    #[test]
    fn rejects_ragged_columns() {
        let err = Table::new(vec![
            Column::numeric("a", [Some(1.0), Some(2.0)]),
            Column::text("b", [Some("x")]),
        ])
        .unwrap_err();
        assert!(matches!(err, TableError::RaggedColumn { found: 1, .. }));
    }

    #[test]
    fn take_rows_keeps_labels() {
        let t = Table::new(vec![Column::text("c", [Some("x"), Some("y"), Some("z")])]).unwrap();
        let sub = t.take_rows(&[2, 0]);
        assert_eq!(sub.index(), &[2, 0]);
        assert_eq!(sub.columns()[0].values[0], CellValue::Text("z".into()));
    }

    #[test]
    fn ordering_puts_missing_first_then_numbers_then_text() {
        let mut v = vec![
            CellValue::Text("b".into()),
            CellValue::Number(2.0),
            CellValue::Missing,
            CellValue::Number(-1.0),
        ];
        v.sort();
        assert_eq!(
            v,
            vec![
                CellValue::Missing,
                CellValue::Number(-1.0),
                CellValue::Number(2.0),
                CellValue::Text("b".into()),
            ]
        );
    }

    #[test]
    fn decimal_formatting() {
        assert_eq!(format_decimal(2.0), "2.0");
        assert_eq!(format_decimal(12.345000000000001), "12.345");
        assert_eq!(format_decimal(-0.0000001), "0.0");
        assert_eq!(CellValue::Number(2021.0).to_string(), "2021");
        assert_eq!(CellValue::Number(0.5).to_string(), "0.5");
    }
}
