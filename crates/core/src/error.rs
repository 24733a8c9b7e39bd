//! Error types for the ARPA filter library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for reading, filtering and writing language models.
///
/// Every variant is fatal: the text format has no way to resume in the
/// middle of a section, so callers abandon the affected destination (or the
/// whole run) instead of retrying.
#[derive(Error, Debug)]
pub enum FilterError {
    /// Structurally invalid header line, section marker or record
    #[error("Format error at line {line_number}: {reason} in \"{line}\"")]
    Format {
        line_number: usize,
        line: String,
        reason: String,
    },

    /// End of input where more content was required
    #[error("Unexpected end of input while reading {context}")]
    Truncated { context: String },

    /// Underlying read, write or seek failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A destination file could not be opened
    #[error("I/O error for {path}: {err}")]
    Open {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// The number of lengths written differs from the reserved header shape
    #[error("Header reserved for {reserved} n-gram lengths but {written} were written")]
    ShapeMismatch { reserved: usize, written: usize },

    /// The final header does not fit in the reserved space
    #[error("Header needs {needed} bytes but only {reserved} were reserved")]
    HeaderOverflow { reserved: usize, needed: usize },

    /// An output operation was called in the wrong state
    #[error("Cannot {operation} while output is {state}")]
    StateViolation {
        operation: &'static str,
        state: String,
    },
}

impl FilterError {
    /// Build a format error for a specific input line.
    pub(crate) fn format(line_number: usize, line: &str, reason: impl Into<String>) -> Self {
        FilterError::Format {
            line_number,
            line: line.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn truncated(context: impl Into<String>) -> Self {
        FilterError::Truncated {
            context: context.into(),
        }
    }
}

/// Result type alias for filter operations.
pub type Result<T> = std::result::Result<T, FilterError>;
