//! CLI commands for lmfilter.

pub mod multiple;
pub mod single;
pub mod union;

pub use multiple::MultipleCommand;
pub use single::SingleCommand;
pub use union::UnionCommand;

use anyhow::{bail, Context, Result as AnyhowResult};
use clap::Args;
use lmfilter_core::{CountLedger, VocabularySet};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::sync::Arc;

/// Input arguments shared by every mode.
#[derive(Args)]
pub struct InputArgs {
    /// Vocabulary file ("-" for stdin)
    #[arg(long, default_value = "-")]
    pub vocab: String,

    /// ARPA model to filter ("-" for stdin)
    #[arg(short, long)]
    pub input: String,

    /// Do not add <s>, </s> and <unk> to the vocabularies
    #[arg(long, default_value_t = false)]
    pub no_reserved: bool,
}

impl InputArgs {
    /// Open the model input.
    pub fn open_input(&self) -> AnyhowResult<Box<dyn BufRead>> {
        self.check_stdin()?;
        open(&self.input).with_context(|| format!("Failed to open model {}", self.input))
    }

    /// Open the vocabulary input.
    pub fn open_vocab(&self) -> AnyhowResult<Box<dyn BufRead>> {
        self.check_stdin()?;
        open(&self.vocab).with_context(|| format!("Failed to open vocabulary {}", self.vocab))
    }

    fn check_stdin(&self) -> AnyhowResult<()> {
        if self.vocab == "-" && self.input == "-" {
            bail!("the vocabulary and the model cannot both be read from stdin");
        }
        Ok(())
    }

    /// Read one vocabulary per line.
    pub fn load_vocabs(&self) -> AnyhowResult<Vec<Arc<VocabularySet>>> {
        let sets = VocabularySet::build_per_line(self.open_vocab()?, !self.no_reserved)
            .with_context(|| format!("Failed to read vocabulary {}", self.vocab))?;
        if sets.is_empty() {
            bail!("vocabulary {} has no lines", self.vocab);
        }
        tracing::info!(vocabularies = sets.len(), "loaded vocabularies");
        Ok(sets.into_iter().map(Arc::new).collect())
    }
}

fn open(path: &str) -> io::Result<Box<dyn BufRead>> {
    if path == "-" {
        Ok(Box::new(BufReader::new(io::stdin())))
    } else {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }
}

/// Print the counts kept for one output next to the input counts.
pub fn report(name: &str, input: &CountLedger, kept: &CountLedger) {
    println!("{}:", name);
    for (length, count) in input.iter() {
        println!("  {}-grams: {} of {}", length, kept.get(length).unwrap_or(0), count);
    }
}
