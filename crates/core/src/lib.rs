//! lmfilter-core - Streaming ARPA language model filtering
//!
//! This crate reads ARPA language models, decides per output which n-grams
//! to keep according to vocabulary membership, and writes filtered models
//! without buffering them in memory.
//!
//! # Features
//!
//! - Count header codec and section framing with line-level diagnostics
//! - Output writer that reserves header space and patches it in place
//! - Vocabulary sets backed by `AHashSet` and `CompactString`
//! - Routing of one input pass to any number of outputs
//!
//! # Example
//!
//! ```rust
//! use lmfilter_core::{filter, OutputModel, SingleVocabFilter, VocabularyBuilder};
//! use std::io::Cursor;
//! use std::sync::Arc;
//!
//! let model = "\n\\data\\\nngram 1=2\n\n\\1-grams:\n-1.0\ta\n-1.0\tb\n\n\\end\\\n";
//!
//! let mut vocab = VocabularyBuilder::with_reserved();
//! vocab.insert("a");
//!
//! let output = OutputModel::new(Cursor::new(Vec::new()));
//! let mut single = SingleVocabFilter::new(Arc::new(vocab.build()), output);
//! filter::run(Cursor::new(model), &mut single)?;
//!
//! assert_eq!(single.output().counts().as_slice(), &[1]);
//! # Ok::<(), lmfilter_core::FilterError>(())
//! ```

pub mod error;
pub use error::{FilterError, Result};

// ARPA format reading
pub mod arpa;
pub use arpa::{CountLedger, ModelReader};

// Output writing
pub mod output;
pub use output::{OutputModel, OutputState};

// Vocabularies
pub mod vocab;
pub use vocab::{VocabularyBuilder, VocabularySet, RESERVED_TOKENS};

// Multi-destination routing
pub mod router;
pub use router::{Destination, Router};

// Filters
pub mod filter;
pub use filter::{Filter, MultipleOutputFilter, SingleVocabFilter, UnionFilter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
