//! Filters that write to a single output.

use super::{intersect, Filter};
use crate::arpa::CountLedger;
use crate::error::Result;
use crate::output::OutputModel;
use crate::vocab::VocabularySet;
use std::io::{Seek, Write};
use std::sync::Arc;

/// Keeps the n-grams whose words all belong to one vocabulary.
pub struct SingleVocabFilter<W: Write + Seek> {
    vocab: Arc<VocabularySet>,
    output: OutputModel<W>,
}

impl<W: Write + Seek> SingleVocabFilter<W> {
    pub fn new(vocab: Arc<VocabularySet>, output: OutputModel<W>) -> Self {
        Self { vocab, output }
    }

    #[inline]
    pub fn output(&self) -> &OutputModel<W> {
        &self.output
    }

    pub fn into_output(self) -> OutputModel<W> {
        self.output
    }
}

impl<W: Write + Seek> Filter for SingleVocabFilter<W> {
    fn reserve(&mut self, bound: &CountLedger) -> Result<()> {
        self.output.reserve_header(bound)
    }

    fn begin_length(&mut self, length: usize) -> Result<()> {
        self.output.begin_length(length)
    }

    fn add_ngram(&mut self, words: &[&str], line: &str) -> Result<()> {
        if self.vocab.contains_all(words.iter().copied()) {
            self.output.write_record(line.as_bytes())?;
        }
        Ok(())
    }

    fn end_length(&mut self, length: usize) -> Result<()> {
        self.output.end_length(length)
    }

    fn finish(&mut self) -> Result<()> {
        self.output.finish()
    }
}

/// Keeps the n-grams that at least one vocabulary fully covers.
pub struct UnionFilter<W: Write + Seek> {
    vocabs: Vec<Arc<VocabularySet>>,
    output: OutputModel<W>,
}

impl<W: Write + Seek> UnionFilter<W> {
    pub fn new(vocabs: Vec<Arc<VocabularySet>>, output: OutputModel<W>) -> Self {
        Self { vocabs, output }
    }

    #[inline]
    pub fn output(&self) -> &OutputModel<W> {
        &self.output
    }

    pub fn into_output(self) -> OutputModel<W> {
        self.output
    }
}

impl<W: Write + Seek> Filter for UnionFilter<W> {
    fn reserve(&mut self, bound: &CountLedger) -> Result<()> {
        self.output.reserve_header(bound)
    }

    fn begin_length(&mut self, length: usize) -> Result<()> {
        self.output.begin_length(length)
    }

    fn add_ngram(&mut self, words: &[&str], line: &str) -> Result<()> {
        if intersect::accepts_any(self.vocabs.iter().map(Arc::as_ref), words) {
            self.output.write_record(line.as_bytes())?;
        }
        Ok(())
    }

    fn end_length(&mut self, length: usize) -> Result<()> {
        self.output.end_length(length)
    }

    fn finish(&mut self) -> Result<()> {
        self.output.finish()
    }
}
