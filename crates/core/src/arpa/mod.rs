//! ARPA text format plumbing.
//!
//! An ARPA model is laid out as:
//!
//! ```text
//!
//! \data\
//! ngram 1=<count>
//! ngram 2=<count>
//!
//! \1-grams:
//! <prob>\t<word>[\t<backoff>]
//!
//! \2-grams:
//! <prob>\t<word> <word>[\t<backoff>]
//!
//! \end\
//! ```
//!
//! This module reads and writes the structural parts (the count header and
//! the section markers). Record contents pass through untouched apart from
//! the word sequence, which [`record::words`] extracts for filtering.

pub mod counts;
pub mod record;
pub mod section;

pub use counts::CountLedger;
pub use section::{read_end, read_section_header, Line, ModelReader};

/// Marker line that opens the count header.
pub const DATA_MARKER: &str = "\\data\\";

/// Marker line that terminates a model.
pub const END_MARKER: &str = "\\end\\";

/// Section marker for n-grams of the given length, e.g. `\2-grams:`.
pub fn section_marker(length: usize) -> String {
    format!("\\{}-grams:", length)
}
