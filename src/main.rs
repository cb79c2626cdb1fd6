mod cases;
mod cli;
mod config;
mod convert;
mod ensemble_cmd;
#[cfg(test)]
mod fixtures;
mod input;
mod logging;
mod report;
mod score_cmd;
mod sweep_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Score(args) => score_cmd::run(args),
        Command::Sweep(args) => sweep_cmd::run(args),
        Command::Ensemble(args) => ensemble_cmd::run(args),
    }
}
