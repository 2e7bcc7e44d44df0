use std::path::Path;

use crate::chart::{self, ChartRequest, Figure};
use crate::data::dataset::TabularDataset;
use crate::error::{LoadError, RenderError};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Everything the session holds, independent of terminal I/O.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (empty until the user loads a file).
    pub dataset: TabularDataset,

    /// Last rendered chart, kept for "Save Visualization".
    pub figure: Option<Figure>,
}

impl AppState {
    /// Load `path`, keeping the previous table when it fails.
    pub fn load(&mut self, path: &Path) -> Result<(), LoadError> {
        match self.dataset.load(path) {
            Ok(_) => Ok(()),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                Err(e)
            }
        }
    }

    /// Render a chart from the held table and make it the current figure.
    pub fn render_chart(&mut self, request: &ChartRequest, width: u32, height: u32) -> Result<&Figure, RenderError> {
        let table = self
            .dataset
            .table()
            .ok_or_else(|| RenderError::NoData("no dataset loaded".to_string()))?;
        let figure = chart::render(table, request, width, height)?;
        Ok(&*self.figure.insert(figure))
    }

    pub fn save_chart(&self, path: &Path) -> Result<(), RenderError> {
        self.figure.as_ref().ok_or(RenderError::NoFigure)?.save(path)
    }
}
