use std::path::Path;

use super::cleaning::{self, FillReport};
use super::loader;
use super::model::{CellValue, Table};
use super::ops::{self, ColumnInfo, Schema};
use super::stats::{self, ColumnSummary};
use crate::error::{DatasetError, LoadError};

/// Holder of at most one loaded table.
#[derive(Debug, Default)]
pub struct TabularDataset {
    table: Option<Table>,
}

impl TabularDataset {
    #[cfg(test)]
    pub fn from_table(table: Table) -> Self {
        TabularDataset { table: Some(table) }
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.table.is_some()
    }

    /// Replace the held table with the contents of `path`.
    /// On failure the previous table, if any, is kept.
    pub fn load(&mut self, path: &Path) -> Result<&Table, LoadError> {
        let table = loader::load_csv(path)?;
        log::info!(
            "Loaded {} rows with columns {:?} from {}",
            table.row_count(),
            table.column_names(),
            path.display()
        );
        Ok(&*self.table.insert(table))
    }

    pub fn describe_schema(&self) -> Result<Schema, DatasetError> {
        Ok(ops::describe_schema(self.loaded()?))
    }

    pub fn info(&self) -> Result<Vec<ColumnInfo>, DatasetError> {
        Ok(ops::info(self.loaded()?))
    }

    /// Original row labels of the held table.
    pub fn row_labels(&self) -> Result<&[usize], DatasetError> {
        Ok(self.loaded()?.index())
    }

    pub fn head_rows(&self, n: usize) -> Result<Table, DatasetError> {
        Ok(ops::head(self.loaded()?, n))
    }

    pub fn tail_rows(&self, n: usize) -> Result<Table, DatasetError> {
        Ok(ops::tail(self.loaded()?, n))
    }

    pub fn find_missing(&self) -> Result<Table, DatasetError> {
        Ok(cleaning::find_missing(self.loaded()?))
    }

    pub fn fill_missing_with_mean(&mut self) -> Result<FillReport, DatasetError> {
        let report = cleaning::fill_missing_with_mean(self.loaded_mut()?);
        log::info!("filled {} missing cells with column means", report.cells_filled());
        Ok(report)
    }

    /// Returns the number of rows removed.
    pub fn drop_missing_rows(&mut self) -> Result<usize, DatasetError> {
        let removed = cleaning::drop_missing_rows(self.loaded_mut()?);
        log::info!("dropped {removed} rows with missing values");
        Ok(removed)
    }

    /// Values of a numeric column, `None` where missing.
    pub fn column_values(&self, name: &str) -> Result<Vec<Option<f64>>, DatasetError> {
        let col = ops::require_numeric(self.loaded()?, name)?;
        Ok(col.values.iter().map(CellValue::as_f64).collect())
    }

    pub fn multiply_column(&self, name: &str, factor: f64) -> Result<Vec<Option<f64>>, DatasetError> {
        Ok(ops::multiply_column(self.loaded()?, name, factor)?)
    }

    pub fn sort_by_column_descending(&self, name: &str) -> Result<Table, DatasetError> {
        Ok(ops::sort_by_column_descending(self.loaded()?, name)?)
    }

    pub fn summary_statistics(&self) -> Result<Vec<(String, ColumnSummary)>, DatasetError> {
        Ok(stats::summary_statistics(self.loaded()?))
    }

    pub fn value_counts(&self, name: &str) -> Result<Vec<(CellValue, usize)>, DatasetError> {
        Ok(ops::value_counts(self.loaded()?, name)?)
    }

    fn loaded(&self) -> Result<&Table, DatasetError> {
        self.table.as_ref().ok_or(DatasetError::NotLoaded)
    }

    fn loaded_mut(&mut self) -> Result<&mut Table, DatasetError> {
        self.table.as_mut().ok_or(DatasetError::NotLoaded)
    }
}
