//! QueryShape CLI - SQL template extraction from the command line

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{extract, normalize};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        cli::Commands::Extract(args) => extract::execute(args, &cli.global),
        cli::Commands::Normalize(args) => normalize::execute(args, &cli.global),
    }
}
