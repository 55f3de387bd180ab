mod config;
mod export;
mod form;
mod logging;
mod models;
mod run;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;

fn main() -> Result<()> {
    let cli = run::Cli::parse();
    let (config, config_path) =
        config::Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        None => {
            if let Err(e) = logging::init_file(&config.logging) {
                eprintln!("Warning: logging disabled: {e:#}");
            }
            run::as_tui(&config)
        }
        Some(command) => {
            logging::init_stderr(&config.logging)?;
            run::as_cli(command, &config, &config_path)
        }
    }
}
