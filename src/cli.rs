use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

/// BEAR: conflation pipeline reconciling U.S. building footprint and address
/// datasets into a unified entity registry, one county at a time.
#[derive(Parser, Debug)]
#[command(name = "bear", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ingest and schema-normalize one or more providers for given counties
    Conform(ConformArgs),

    /// Run the conflation core for given counties
    Conflate(ConflateArgs),
}

#[derive(Args, Debug)]
pub struct ConformArgs {
    /// 5-digit FIPS codes to conform
    #[arg(required = true)]
    pub fips: Vec<String>,

    /// Providers to conform (defaults to all five)
    #[arg(long)]
    pub providers: Vec<String>,

    /// Directory to read raw provider sources from
    #[arg(long = "input-directory", value_hint = ValueHint::DirPath)]
    pub input_directory: PathBuf,

    /// Directory to write `conform/fips=<F>/provider=<NAME>/data.parquet` into
    #[arg(long = "output-directory", value_hint = ValueHint::DirPath)]
    pub output_directory: PathBuf,
}

#[derive(Args, Debug)]
pub struct ConflateArgs {
    /// 5-digit FIPS codes to conflate
    #[arg(required = true)]
    pub fips: Vec<String>,

    /// Directory containing `conform/fips=<F>/provider=<NAME>/data.parquet`
    #[arg(long = "input-directory", value_hint = ValueHint::DirPath)]
    pub input_directory: PathBuf,

    /// Directory to write `conflate/{entities,crossref,footprints}/fips=<F>/data.parquet` into
    #[arg(long = "output-directory", value_hint = ValueHint::DirPath)]
    pub output_directory: PathBuf,
}
