mod cli;
mod commands;
mod logging;

use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use capstone_schedule::{SchedulingValidator, ValidatorConfig};

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    let config = match &cli.config {
        Some(path) => ValidatorConfig::from_file(path)
            .with_context(|| format!("failed to load config: {}", path.display()))?,
        None => ValidatorConfig::default(),
    };
    let validator = SchedulingValidator::new(config);

    match cli.command {
        Command::Semester(args) => commands::semester(&validator, args),
        Command::Delay(args) => commands::delay(&validator, args),
        Command::Progress(args) => commands::progress(args),
    }
}
