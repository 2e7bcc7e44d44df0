use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::chart::ChartRequest;
use crate::color;
use crate::config::Config;
use crate::data::model::format_decimal;
use crate::data::{display, ops};
use crate::menu::{ChartKind, CleanCommand, ExploreCommand, MainCommand, MenuItem, OperationCommand};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Menu-driven session over any input/output pair
// ---------------------------------------------------------------------------

pub struct AnalyzerApp<R, W> {
    pub state: AppState,
    config: Config,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> AnalyzerApp<R, W> {
    pub fn new(config: Config, input: R, out: W) -> Self {
        Self {
            state: AppState::default(),
            config,
            input,
            out,
        }
    }

    /// Read and dispatch menu selections until Exit or end of input.
    /// Only a failing output stream ends the loop with an error.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.out, "--- Sales Analyzer Initialized ---")?;

        if let Some(path) = self.config.data.clone() {
            let loaded = self.load(path);
            self.report(MainCommand::Load, loaded)?;
        }

        loop {
            write!(self.out, "{}", MainCommand::render())?;
            writeln!(self.out, "{}", "=".repeat(MainCommand::TITLE.len()))?;

            let Some(line) = self.prompt("Enter your choice: ")? else {
                writeln!(self.out)?;
                break;
            };
            let Some(command) = MainCommand::from_choice(&line) else {
                writeln!(self.out, "Invalid choice, please try again.")?;
                continue;
            };
            if command == MainCommand::Exit {
                writeln!(self.out, "Exiting the program. Goodbye!")?;
                break;
            }

            let outcome = self.dispatch(command);
            self.report(command, outcome)?;
        }
        Ok(())
    }

    /// Explicit teardown; hands back the output stream.
    pub fn shutdown(mut self) -> Result<W> {
        writeln!(self.out, "Cleaning up resources... Goodbye!")?;
        self.out.flush()?;
        log::debug!("session closed");
        Ok(self.out)
    }

    fn report(&mut self, command: MainCommand, outcome: Result<()>) -> Result<()> {
        if let Err(e) = outcome {
            log::warn!("{command:?} failed: {e:#}");
            writeln!(self.out, "Error: {e:#}")?;
        }
        Ok(())
    }

    fn dispatch(&mut self, command: MainCommand) -> Result<()> {
        let needs_data = !matches!(
            command,
            MainCommand::Load | MainCommand::SaveChart | MainCommand::Exit
        );
        if needs_data && !self.state.dataset.is_loaded() {
            writeln!(self.out, "Please load a dataset first.")?;
            return Ok(());
        }

        match command {
            MainCommand::Load => {
                let Some(path) = self.prompt("Enter the path of the dataset (CSV file): ")? else {
                    return Ok(());
                };
                self.load(PathBuf::from(path))
            }
            MainCommand::Explore => self.explore(),
            MainCommand::Operations => self.operations(),
            MainCommand::Clean => self.clean(),
            MainCommand::Statistics => self.statistics(),
            MainCommand::Visualize => self.visualize(),
            MainCommand::SaveChart => self.save_chart(),
            MainCommand::Exit => Ok(()),
        }
    }

    // -- Actions ------------------------------------------------------------

    fn load(&mut self, path: PathBuf) -> Result<()> {
        self.state
            .load(&path)
            .with_context(|| format!("loading {}", path.display()))?;
        let schema = self.state.dataset.describe_schema()?;
        writeln!(
            self.out,
            "Dataset loaded successfully! ({} rows x {} columns)",
            schema.row_count,
            schema.column_names.len()
        )?;
        Ok(())
    }

    fn explore(&mut self) -> Result<()> {
        let Some(choice) = self.choose::<ExploreCommand>()? else {
            return Ok(());
        };
        let ds = &self.state.dataset;
        let text = match choice {
            ExploreCommand::Head => display::render_table(&ds.head_rows(self.config.preview_rows)?, 0),
            ExploreCommand::Tail => display::render_table(&ds.tail_rows(self.config.preview_rows)?, 0),
            ExploreCommand::ColumnNames => display::render_column_names(&ds.describe_schema()?),
            ExploreCommand::DataTypes => display::render_types(&ds.describe_schema()?),
            ExploreCommand::Info => {
                display::render_info(&ds.describe_schema()?, &ds.info()?, ds.row_labels()?)
            }
        };
        write!(self.out, "{text}")?;
        Ok(())
    }

    fn operations(&mut self) -> Result<()> {
        let Some(choice) = self.choose::<OperationCommand>()? else {
            return Ok(());
        };
        let n = self.config.preview_rows;
        match choice {
            OperationCommand::Tax => {
                let column = self.config.value_column.clone();
                let rate = self.config.tax_rate;
                let original = self
                    .state
                    .dataset
                    .column_values(&column)
                    .context("tax calculation")?;
                let taxed = self.state.dataset.multiply_column(&column, rate)?;
                let percent = format_decimal(rate * 100.0);
                let percent = percent.strip_suffix(".0").unwrap_or(&percent);
                writeln!(
                    self.out,
                    "Original {column} (first {n} values): {}",
                    display::render_sequence(&original, n)
                )?;
                writeln!(
                    self.out,
                    "Tax calculation ({percent}% of {column}, first {n} values): {}",
                    display::render_sequence(&taxed, n)
                )?;
            }
            OperationCommand::SortDescending => {
                let prompt = format!("Column to sort by [{}]: ", self.config.value_column);
                let Some(input) = self.prompt(&prompt)? else {
                    return Ok(());
                };
                let column = if input.is_empty() {
                    self.config.value_column.clone()
                } else {
                    input
                };
                let sorted = self
                    .state
                    .dataset
                    .sort_by_column_descending(&column)
                    .context("sorting")?;
                writeln!(self.out, "Top {n} rows after sorting by {column} (descending):")?;
                write!(self.out, "{}", display::render_table(&ops::head(&sorted, n), 0))?;
            }
        }
        Ok(())
    }

    fn clean(&mut self) -> Result<()> {
        let Some(choice) = self.choose::<CleanCommand>()? else {
            return Ok(());
        };
        match choice {
            CleanCommand::ShowMissing => {
                let missing = self.state.dataset.find_missing()?;
                if missing.is_empty() {
                    writeln!(self.out, "No missing values found.")?;
                } else {
                    write!(self.out, "{}", display::render_table(&missing, self.config.max_rows))?;
                }
            }
            CleanCommand::FillMean => {
                let report = self.state.dataset.fill_missing_with_mean()?;
                writeln!(self.out, "Missing values filled with mean.")?;
                for (column, mean, count) in &report.filled {
                    writeln!(self.out, "  {column}: {count} cell(s) set to {mean}")?;
                }
                for column in &report.skipped {
                    writeln!(self.out, "  {column}: no mean to fill with, left missing")?;
                }
            }
            CleanCommand::DropMissing => {
                let removed = self.state.dataset.drop_missing_rows()?;
                let remaining = self.state.dataset.describe_schema()?.row_count;
                writeln!(
                    self.out,
                    "Rows with missing values dropped. ({removed} removed, {remaining} remain)"
                )?;
            }
        }
        Ok(())
    }

    fn statistics(&mut self) -> Result<()> {
        let stats = self.state.dataset.summary_statistics()?;
        writeln!(self.out, "\n--- Descriptive Statistics ---")?;
        write!(self.out, "{}", display::render_stats(&stats))?;
        Ok(())
    }

    fn visualize(&mut self) -> Result<()> {
        let Some(kind) = self.choose::<ChartKind>()? else {
            return Ok(());
        };
        let Some(request) = self.chart_request(kind)? else {
            return Ok(());
        };

        let (width, height) = (self.config.width, self.config.height);
        let figure = self
            .state
            .render_chart(&request, width, height)
            .context("rendering chart")?;
        writeln!(self.out, "{}", figure.title)?;
        for (label, c) in &figure.legend {
            writeln!(self.out, "  {} {label}", color::hex(*c))?;
        }

        let preview = self.config.preview_path.clone();
        figure
            .save(&preview)
            .with_context(|| format!("writing chart preview {}", preview.display()))?;
        writeln!(self.out, "Plot displayed successfully! (preview: {})", preview.display())?;
        Ok(())
    }

    fn chart_request(&mut self, kind: ChartKind) -> Result<Option<ChartRequest>> {
        let request = match kind {
            ChartKind::Bar => ChartRequest::Bar {
                category: self.config.category_column.clone(),
                value: self.config.value_column.clone(),
            },
            ChartKind::Line => ChartRequest::Line {
                x: self.config.time_column.clone(),
                y: self.config.value_column.clone(),
            },
            ChartKind::Scatter => {
                let Some(x) = self.prompt("Enter x-axis column: ")? else {
                    return Ok(None);
                };
                let Some(y) = self.prompt("Enter y-axis column: ")? else {
                    return Ok(None);
                };
                ChartRequest::Scatter { x, y }
            }
            ChartKind::Pie => {
                let Some(column) = self.prompt("Enter column for Pie Chart (e.g., Region): ")? else {
                    return Ok(None);
                };
                ChartRequest::Pie { column }
            }
            ChartKind::Histogram => {
                let Some(column) = self.prompt("Enter numeric column for Histogram: ")? else {
                    return Ok(None);
                };
                ChartRequest::Histogram {
                    column,
                    bins: self.config.bins as usize,
                }
            }
        };
        Ok(Some(request))
    }

    fn save_chart(&mut self) -> Result<()> {
        let Some(name) = self.prompt("Enter file name to save (e.g., plot.png): ")? else {
            return Ok(());
        };
        self.state
            .save_chart(&PathBuf::from(&name))
            .context("saving visualization")?;
        writeln!(self.out, "Visualization saved as {name}")?;
        Ok(())
    }

    // -- Input --------------------------------------------------------------

    /// Show a sub-menu and parse the selection; `None` on invalid input or EOF.
    fn choose<M: MenuItem>(&mut self) -> Result<Option<M>> {
        write!(self.out, "{}", M::render())?;
        let Some(line) = self.prompt("Enter your choice: ")? else {
            return Ok(None);
        };
        let choice = M::from_choice(&line);
        if choice.is_none() {
            writeln!(self.out, "Invalid choice.")?;
        }
        Ok(choice)
    }

    /// Trimmed line of input, `None` at end of input.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.out, "{message}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line).context("reading input")? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
