//! Multiple command implementation.

use super::{report, InputArgs};
use clap::Parser;

/// Multiple command arguments.
#[derive(Parser)]
pub struct MultipleCommand {
    // The vocabulary file holds one vocabulary per line.
    #[command(flatten)]
    pub source: InputArgs,

    /// Output name prefix; line i of the vocabulary is written to <prefix>i
    #[arg(short, long)]
    pub prefix: String,
}

use anyhow::{Context, Result as AnyhowResult};
use lmfilter_core::{filter, MultipleOutputFilter, Router};

pub fn run(cmd: MultipleCommand) -> AnyhowResult<()> {
    let vocabs = cmd.source.load_vocabs()?;

    let model = cmd.source.open_input()?;
    let router = Router::create(&cmd.prefix, vocabs)
        .with_context(|| format!("Failed to create outputs with prefix {}", cmd.prefix))?;
    let mut multiple = MultipleOutputFilter::new(router);
    let counts = filter::run(model, &mut multiple)
        .with_context(|| format!("Failed to filter {}", cmd.source.input))?;

    for dest in multiple.router().iter() {
        report(dest.name(), &counts, dest.output().counts());
    }
    Ok(())
}
