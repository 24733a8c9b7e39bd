//! Streaming ARPA output with a header patched after the body.
//!
//! The header lists per-length counts before any n-gram, but a filter only
//! knows a length's count after its last record is written. Two layouts
//! solve this:
//!
//! - buffer the whole body, then write the header followed by the body;
//! - reserve blank space for the header, stream the body, then seek back to
//!   the start and overwrite the reserved space with the real header.
//!
//! [`OutputModel`] takes the second route. Memory stays bounded no matter
//! how large the model is, at the cost of requiring a seekable sink. Any
//! reserved bytes the real header does not use remain as blank lines ahead
//! of the first section marker, which ARPA readers skip.

use crate::arpa::{section_marker, CountLedger, END_MARKER};
use crate::error::{FilterError, Result};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Lifecycle of an [`OutputModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputState {
    /// Sink open, nothing written
    Created,
    /// Header space reserved, no section started
    HeaderReserved,
    /// Records of this length are being written
    WritingLength(usize),
    /// A section was closed and the next may begin
    BetweenLengths,
    /// Header patched and end marker written
    Finished,
}

impl fmt::Display for OutputState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputState::Created => write!(f, "created"),
            OutputState::HeaderReserved => write!(f, "header-reserved"),
            OutputState::WritingLength(k) => write!(f, "writing {}-grams", k),
            OutputState::BetweenLengths => write!(f, "between lengths"),
            OutputState::Finished => write!(f, "finished"),
        }
    }
}

/// One destination's ARPA output.
///
/// The writer owns its sink exclusively until [`finish`](Self::finish) or
/// until it is dropped. Out-of-order calls fail with
/// [`FilterError::StateViolation`].
pub struct OutputModel<W: Write + Seek> {
    sink: W,
    state: OutputState,
    /// Records written for the length in progress
    counter: u64,
    counts: CountLedger,
    /// Sink offset where the reserved header space begins
    header_start: u64,
    reserved_bytes: usize,
    reserved_lengths: usize,
}

impl OutputModel<BufWriter<File>> {
    /// Create (or truncate) a file and write the model into it.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|err| FilterError::Open {
            path: path.to_path_buf(),
            err,
        })?;
        debug!(path = %path.display(), "opened output model");
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write + Seek> OutputModel<W> {
    /// Wrap a seekable sink. The model is written from the sink's position
    /// at the time header space is reserved.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            state: OutputState::Created,
            counter: 0,
            counts: CountLedger::new(),
            header_start: 0,
            reserved_bytes: 0,
            reserved_lengths: 0,
        }
    }

    /// Current lifecycle state.
    #[inline]
    pub fn state(&self) -> OutputState {
        self.state
    }

    /// Counts of every section closed so far.
    #[inline]
    pub fn counts(&self) -> &CountLedger {
        &self.counts
    }

    /// Write `byte_count` newlines where the header will be patched in, for
    /// a header of `lengths` entries.
    pub fn reserve_header_space(&mut self, byte_count: usize, lengths: usize) -> Result<()> {
        self.require("reserve header space", |s| s == OutputState::Created)?;
        self.header_start = self.sink.stream_position()?;
        const CHUNK: [u8; 256] = [b'\n'; 256];
        let mut left = byte_count;
        while left > 0 {
            let n = left.min(CHUNK.len());
            self.sink.write_all(&CHUNK[..n])?;
            left -= n;
        }
        self.reserved_bytes = byte_count;
        self.reserved_lengths = lengths;
        self.state = OutputState::HeaderReserved;
        Ok(())
    }

    /// Reserve room for a header shaped like `bound`.
    ///
    /// Enough whenever each final count is at most `bound`'s count for the
    /// same length, as with any filtered copy of the model `bound` came from.
    pub fn reserve_header(&mut self, bound: &CountLedger) -> Result<()> {
        self.reserve_header_space(bound.encoded_len(), bound.len())
    }

    /// Reserve room for `lengths` entries of any representable count.
    pub fn reserve_header_for(&mut self, lengths: usize) -> Result<()> {
        self.reserve_header_space(CountLedger::max_encoded_len(lengths), lengths)
    }

    /// Open the section for n-grams of `length`.
    ///
    /// Sections are written once each, in ascending order from 1.
    pub fn begin_length(&mut self, length: usize) -> Result<()> {
        self.require("begin a section", |s| {
            matches!(s, OutputState::HeaderReserved | OutputState::BetweenLengths)
        })?;
        if length != self.counts.len() + 1 {
            return Err(self.violation("begin a section out of length order"));
        }
        writeln!(self.sink, "{}", section_marker(length))?;
        self.counter = 0;
        self.state = OutputState::WritingLength(length);
        Ok(())
    }

    /// Append one record verbatim followed by a newline.
    pub fn write_record(&mut self, record: &[u8]) -> Result<()> {
        self.require("write a record", |s| matches!(s, OutputState::WritingLength(_)))?;
        self.sink.write_all(record)?;
        self.sink.write_all(b"\n")?;
        self.counter += 1;
        Ok(())
    }

    /// Close the section for `length` and record its count.
    pub fn end_length(&mut self, length: usize) -> Result<()> {
        self.require("end a section", |s| s == OutputState::WritingLength(length))?;
        self.sink.write_all(b"\n")?;
        self.counts.set(length, self.counter);
        self.state = OutputState::BetweenLengths;
        Ok(())
    }

    /// Write `\end\`, patch the header over the reserved space and flush.
    ///
    /// The sink is left positioned just after the patched header.
    pub fn finish(&mut self) -> Result<()> {
        self.require("finish", |s| {
            matches!(s, OutputState::HeaderReserved | OutputState::BetweenLengths)
        })?;
        if self.counts.len() != self.reserved_lengths {
            return Err(FilterError::ShapeMismatch {
                reserved: self.reserved_lengths,
                written: self.counts.len(),
            });
        }
        let header = self.counts.encode();
        if header.len() > self.reserved_bytes {
            warn!(
                needed = header.len(),
                reserved = self.reserved_bytes,
                "header does not fit in reserved space"
            );
            return Err(FilterError::HeaderOverflow {
                reserved: self.reserved_bytes,
                needed: header.len(),
            });
        }

        writeln!(self.sink, "{}", END_MARKER)?;
        self.sink.seek(SeekFrom::Start(self.header_start))?;
        self.sink.write_all(&header)?;
        self.sink.flush()?;
        self.state = OutputState::Finished;
        debug!(ngrams = self.counts.total(), "finished output model");
        Ok(())
    }

    /// Release the sink.
    pub fn into_inner(self) -> W {
        self.sink
    }

    fn require(&self, operation: &'static str, ok: impl Fn(OutputState) -> bool) -> Result<()> {
        if ok(self.state) {
            Ok(())
        } else {
            Err(self.violation(operation))
        }
    }

    fn violation(&self, operation: &'static str) -> FilterError {
        FilterError::StateViolation {
            operation,
            state: self.state.to_string(),
        }
    }
}
