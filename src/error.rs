use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Table invariants
// ---------------------------------------------------------------------------

/// A column set that cannot form a [`Table`](crate::data::model::Table).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),

    #[error("column '{name}' has {found} rows, expected {expected}")]
    RaggedColumn {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("row index has {found} labels, expected {expected}")]
    IndexLength { expected: usize, found: usize },
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Parse(#[from] csv::Error),

    #[error("no columns to parse from file")]
    NoColumns,

    #[error("line {line}: expected {expected} fields, saw {found}")]
    RaggedRecord {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Table(#[from] TableError),
}

// ---------------------------------------------------------------------------
// Column lookups
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColumnError {
    #[error("no column named '{0}'")]
    NotFound(String),

    #[error("column '{0}' is not numeric")]
    NotNumeric(String),
}

/// Failure of an operation on the held dataset.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DatasetError {
    #[error("no dataset loaded")]
    NotLoaded,

    #[error(transparent)]
    Column(#[from] ColumnError),
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Column(#[from] ColumnError),

    #[error("nothing to plot: {0}")]
    NoData(String),

    #[error("no chart has been rendered yet")]
    NoFigure,

    #[error("cannot infer an image format from {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("image output failed: {0}")]
    Image(#[from] image::ImageError),
}
