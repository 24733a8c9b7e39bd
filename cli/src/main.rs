//! lmfilter CLI - Command-line interface for ARPA model filtering.
//!
//! This is the main entry point for the `lmfilter` command-line tool.

mod commands;

use clap::{ArgAction, Parser, Subcommand};
use commands::{MultipleCommand, SingleCommand, UnionCommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lmfilter")]
#[command(about = "Filter ARPA language models to a vocabulary", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Keep n-grams whose words are all in one vocabulary
    Single(SingleCommand),
    /// Keep n-grams fully covered by any one of several vocabularies
    Union(UnionCommand),
    /// Write one filtered model per vocabulary
    Multiple(MultipleCommand),
}

/// Log to stderr; `RUST_LOG` takes precedence over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Single(cmd) => commands::single::run(cmd)?,
        Commands::Union(cmd) => commands::union::run(cmd)?,
        Commands::Multiple(cmd) => commands::multiple::run(cmd)?,
    }

    Ok(())
}
