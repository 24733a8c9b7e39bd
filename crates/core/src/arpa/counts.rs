//! Count header encoding and decoding.
//!
//! The header lists, for every n-gram length starting at 1, how many records
//! the model holds. Writers size their placeholder header with
//! [`CountLedger::encoded_len`] before the real counts are known, so the
//! encoder here is the single source of truth for header layout.

use super::section::ModelReader;
use super::DATA_MARKER;
use crate::error::{FilterError, Result};
use std::fmt;
use std::io::{BufRead, Write};

/// Per-length n-gram counts. Index `i` holds the count of length `i + 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountLedger {
    counts: Vec<u64>,
}

impl CountLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self { counts: Vec::new() }
    }

    /// Number of n-gram lengths in the ledger.
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Count for a 1-based n-gram length.
    #[inline]
    pub fn get(&self, length: usize) -> Option<u64> {
        length.checked_sub(1).and_then(|i| self.counts.get(i).copied())
    }

    /// Store the count for a 1-based length, growing the ledger with zeros
    /// when `length` is past the end.
    pub fn set(&mut self, length: usize, count: u64) {
        assert!(length >= 1, "n-gram lengths start at 1");
        if length > self.counts.len() {
            self.counts.resize(length, 0);
        }
        self.counts[length - 1] = count;
    }

    /// Counts in length order.
    #[inline]
    pub fn as_slice(&self) -> &[u64] {
        &self.counts
    }

    /// Iterate `(length, count)` pairs in ascending length order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.counts.iter().enumerate().map(|(i, &c)| (i + 1, c))
    }

    /// Total number of n-grams across all lengths.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Write the header block: a blank line, `\data\`, one `ngram n=c` line
    /// per length and a trailing blank line.
    ///
    /// Seeking is the responsibility of the caller.
    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        write!(out, "{}", self)
    }

    /// Encode the header block into a byte buffer.
    pub fn encode(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    /// Size in bytes of [`encode`](Self::encode) for this ledger, measured
    /// by running the encoder.
    pub fn encoded_len(&self) -> usize {
        self.to_string().len()
    }

    /// Size of a header with `lengths` entries whose counts all have the
    /// widest representable value. Any ledger of that shape fits in it.
    pub fn max_encoded_len(lengths: usize) -> usize {
        Self::from(vec![u64::MAX; lengths]).encoded_len()
    }

    /// Read the header block from a model.
    ///
    /// Lengths must appear contiguously in ascending order starting at 1.
    pub fn decode<R: BufRead>(reader: &mut ModelReader<R>) -> Result<Self> {
        let first = reader
            .next_line()?
            .ok_or_else(|| FilterError::truncated("the blank line before \\data\\"))?;
        if !first.text.is_empty() {
            return Err(FilterError::format(first.number, first.text, "first line is not blank"));
        }

        let second = reader
            .next_line()?
            .ok_or_else(|| FilterError::truncated("the \\data\\ marker"))?;
        if second.text != DATA_MARKER {
            return Err(FilterError::format(
                second.number,
                second.text,
                "expected \\data\\",
            ));
        }

        let mut ledger = CountLedger::new();
        loop {
            let line = reader
                .next_line()?
                .ok_or_else(|| FilterError::truncated("the n-gram count header"))?;
            if line.text.is_empty() {
                return Ok(ledger);
            }
            let (length, count) = parse_count_line(line.text)
                .map_err(|reason| FilterError::format(line.number, line.text, reason))?;
            if length != ledger.len() + 1 {
                return Err(FilterError::format(
                    line.number,
                    line.text,
                    format!("n-gram length {} is not expected {}", length, ledger.len() + 1),
                ));
            }
            ledger.counts.push(count);
        }
    }
}

impl fmt::Display for CountLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n{}\n", DATA_MARKER)?;
        for (length, count) in self.iter() {
            writeln!(f, "ngram {}={}", length, count)?;
        }
        writeln!(f)
    }
}

impl From<Vec<u64>> for CountLedger {
    fn from(counts: Vec<u64>) -> Self {
        Self { counts }
    }
}

/// Parse `ngram <length>=<count>`.
fn parse_count_line(line: &str) -> std::result::Result<(usize, u64), String> {
    let rest = line
        .strip_prefix("ngram ")
        .ok_or_else(|| "count line does not begin with \"ngram \"".to_string())?;
    let (length, count) = rest
        .split_once('=')
        .ok_or_else(|| "no equals sign in count line".to_string())?;
    let length: usize = parse_unsigned(length)
        .ok_or_else(|| format!("bad n-gram length \"{}\"", length))?;
    let count: u64 = parse_unsigned(count)
        .ok_or_else(|| format!("bad n-gram count \"{}\"", count))?;
    Ok((length, count))
}

/// Plain decimal digits only: no sign, no surrounding spaces.
fn parse_unsigned<T: std::str::FromStr>(field: &str) -> Option<T> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}
