mod app;
mod chart;
mod color;
mod config;
mod data;
mod error;
mod menu;
mod state;

use std::io;

use anyhow::Result;
use clap::Parser;

use app::AnalyzerApp;
use config::Config;

fn main() -> Result<()> {
    let config = Config::parse();

    // RUST_LOG still wins over -v when set.
    env_logger::Builder::new()
        .filter_level(config.log_level())
        .parse_default_env()
        .init();

    log::info!("starting with {config:?}");

    let stdin = io::stdin();
    let mut app = AnalyzerApp::new(config, stdin.lock(), io::stdout());
    let outcome = app.run();
    app.shutdown()?;
    outcome
}
