mod cli;
mod config;
mod models;
mod prayer_times;
mod render;
mod schedule;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load().context("Loading config")?;

    match cli.command {
        Commands::Setup { reset } => {
            handlers::handle_setup(&mut config, reset)?;
        }
        Commands::Generate {
            month,
            year,
            json,
            policy,
        } => {
            ensure_setup(&mut config)?;
            handlers::handle_generate(&config, month, year, json, policy)?;
        }
        Commands::Iqamah { action } => {
            ensure_setup(&mut config)?;
            handlers::handle_iqamah(&mut config, &action)?;
        }
    }

    Ok(())
}

/// Check if setup has been done; if not, run the wizard automatically.
fn ensure_setup(config: &mut AppConfig) -> Result<()> {
    if !config.configured {
        eprintln!("No configuration found. Running setup...");
        eprintln!();
        handlers::handle_setup(config, false)?;
    }
    Ok(())
}
