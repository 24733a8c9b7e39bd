//! Filtering an ARPA model through one or more vocabularies.
//!
//! [`run`] reads a model section by section and hands every n-gram to a
//! [`Filter`], which decides where (if anywhere) the record is written.
//! Three filters are provided:
//!
//! - [`SingleVocabFilter`]: one vocabulary, one output
//! - [`UnionFilter`]: several vocabularies, one output keeping n-grams any
//!   single vocabulary fully covers
//! - [`MultipleOutputFilter`]: one output per vocabulary

pub mod intersect;
pub mod multiple;
pub mod single;

pub use intersect::DestinationIndex;
pub use multiple::MultipleOutputFilter;
pub use single::{SingleVocabFilter, UnionFilter};

use crate::arpa::{read_end, read_section_header, record, CountLedger, ModelReader};
use crate::error::Result;
use std::io::BufRead;
use tracing::{debug, info};

/// Receiver of a model's n-grams, driven by [`run`].
///
/// Calls arrive in order: `reserve`, then for each length `begin_length`,
/// `add_ngram` per record and `end_length`, then `finish`.
pub trait Filter {
    /// Prepare outputs for a model with the given input counts.
    fn reserve(&mut self, bound: &CountLedger) -> Result<()>;

    fn begin_length(&mut self, length: usize) -> Result<()>;

    /// Offer one record. `words` is its word sequence, `line` the raw record.
    fn add_ngram(&mut self, words: &[&str], line: &str) -> Result<()>;

    fn end_length(&mut self, length: usize) -> Result<()>;

    fn finish(&mut self) -> Result<()>;
}

/// Stream a model through `filter`. Returns the input's counts.
pub fn run<R: BufRead, F: Filter + ?Sized>(input: R, filter: &mut F) -> Result<CountLedger> {
    let mut reader = ModelReader::new(input);
    let counts = CountLedger::decode(&mut reader)?;
    info!(lengths = counts.len(), ngrams = counts.total(), "read model header");

    filter.reserve(&counts)?;
    for (length, count) in counts.iter() {
        read_section_header(&mut reader, length)?;
        filter.begin_length(length)?;
        for _ in 0..count {
            let line = reader.read_record(length)?;
            let words = record::words(line, length)?;
            filter.add_ngram(&words, line.text)?;
        }
        filter.end_length(length)?;
        debug!(length, count, "filtered section");
    }
    reader.skip_blank_lines()?;
    read_end(&mut reader)?;

    filter.finish()?;
    info!("finished filtering");
    Ok(counts)
}
