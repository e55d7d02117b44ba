use anyhow::Result;
use clap::Parser;

use bear::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Conform(args) => bear::conform_command(&cli, args),
        Commands::Conflate(args) => bear::conflate_command(&cli, args),
    }
}
