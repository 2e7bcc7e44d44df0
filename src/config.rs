use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Interactive CSV explorer: inspect, clean, summarise and chart a dataset.
#[derive(Debug, Clone, Parser)]
#[command(name = "rusty-analyzer", version, about)]
pub struct Config {
    /// CSV file to load before the menu starts
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Rows shown by the head/tail and sort previews
    #[arg(long, default_value_t = 5)]
    pub preview_rows: usize,

    /// Longest table printed in full; longer ones show head and tail only (0 = no limit)
    #[arg(long, default_value_t = 60)]
    pub max_rows: usize,

    /// Numeric column used for the tax calculation, sorting and bar/line charts
    #[arg(long, default_value = "Sales")]
    pub value_column: String,

    /// Category column for the bar chart
    #[arg(long, default_value = "Region")]
    pub category_column: String,

    /// X-axis column for the line chart
    #[arg(long, default_value = "Year")]
    pub time_column: String,

    /// Factor applied by the tax calculation
    #[arg(long, default_value_t = 0.10)]
    pub tax_rate: f64,

    /// Where each freshly rendered chart is written for viewing
    #[arg(long, default_value = "chart_preview.png")]
    pub preview_path: PathBuf,

    /// Chart width in pixels
    #[arg(long, default_value_t = 1000)]
    pub width: u32,

    /// Chart height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Histogram bin count
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub bins: u32,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::parse_from(["rusty-analyzer"])
    }
}
