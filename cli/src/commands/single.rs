//! Single command implementation.

use super::{report, InputArgs};
use clap::Parser;

/// Single command arguments.
#[derive(Parser)]
pub struct SingleCommand {
    #[command(flatten)]
    pub source: InputArgs,

    /// Path of the filtered model
    #[arg(short, long)]
    pub output: String,
}

use anyhow::{Context, Result as AnyhowResult};
use lmfilter_core::{filter, OutputModel, SingleVocabFilter, VocabularyBuilder};
use std::sync::Arc;

pub fn run(cmd: SingleCommand) -> AnyhowResult<()> {
    // Load vocabulary
    let mut builder = if cmd.source.no_reserved {
        VocabularyBuilder::new()
    } else {
        VocabularyBuilder::with_reserved()
    };
    builder
        .extend_from(cmd.source.open_vocab()?)
        .with_context(|| format!("Failed to read vocabulary {}", cmd.source.vocab))?;
    let vocab = builder.build();
    tracing::info!(words = vocab.len(), "loaded vocabulary");

    // Filter
    let model = cmd.source.open_input()?;
    let output = OutputModel::create(&cmd.output)?;
    let mut single = SingleVocabFilter::new(Arc::new(vocab), output);
    let counts = filter::run(model, &mut single)
        .with_context(|| format!("Failed to filter {}", cmd.source.input))?;

    report(&cmd.output, &counts, single.output().counts());
    Ok(())
}
