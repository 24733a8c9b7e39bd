//! Union command implementation.

use super::{report, InputArgs};
use clap::Parser;

/// Union command arguments.
#[derive(Parser)]
pub struct UnionCommand {
    // The vocabulary file holds one vocabulary per line.
    #[command(flatten)]
    pub source: InputArgs,

    /// Path of the filtered model
    #[arg(short, long)]
    pub output: String,
}

use anyhow::{Context, Result as AnyhowResult};
use lmfilter_core::{filter, OutputModel, UnionFilter};

pub fn run(cmd: UnionCommand) -> AnyhowResult<()> {
    let vocabs = cmd.source.load_vocabs()?;

    let model = cmd.source.open_input()?;
    let output = OutputModel::create(&cmd.output)?;
    let mut any_vocab = UnionFilter::new(vocabs, output);
    let counts = filter::run(model, &mut any_vocab)
        .with_context(|| format!("Failed to filter {}", cmd.source.input))?;

    report(&cmd.output, &counts, any_vocab.output().counts());
    Ok(())
}
