//! Vocabulary membership sets.
//!
//! Words are stored in an `AHashSet` of `CompactString`s: lookups are exact
//! and case-sensitive, and most words stay inline without a heap allocation.

use crate::error::Result;
use ahash::AHashSet;
use compact_str::CompactString;
use std::io::BufRead;

/// Sentence-begin token
pub const SENTENCE_BEGIN: &str = "<s>";
/// Sentence-end token
pub const SENTENCE_END: &str = "</s>";
/// Unknown-word token
pub const UNKNOWN: &str = "<unk>";

/// Tokens every filtered model must keep, whatever the vocabulary says.
pub const RESERVED_TOKENS: [&str; 3] = [SENTENCE_BEGIN, SENTENCE_END, UNKNOWN];

/// Immutable set of words a destination accepts.
///
/// Share between destinations and the intersection step with an `Arc`; the
/// set never changes after it is built.
#[derive(Debug, Clone, Default)]
pub struct VocabularySet {
    words: AHashSet<CompactString>,
}

impl VocabularySet {
    /// Read every whitespace-delimited word from `input`.
    ///
    /// The reserved tokens are not added; seed them with
    /// [`VocabularyBuilder::with_reserved`] when the caller needs them.
    pub fn build<R: BufRead>(input: R) -> Result<Self> {
        let mut builder = VocabularyBuilder::new();
        builder.extend_from(input)?;
        Ok(builder.build())
    }

    /// Read one vocabulary per input line, for multi-destination filtering.
    ///
    /// Line `i` holds the words of destination `i`. When `reserved` is set,
    /// every set also contains [`RESERVED_TOKENS`].
    pub fn build_per_line<R: BufRead>(input: R, reserved: bool) -> Result<Vec<Self>> {
        let mut sets = Vec::new();
        for line in input.lines() {
            let line = line?;
            let mut builder = if reserved {
                VocabularyBuilder::with_reserved()
            } else {
                VocabularyBuilder::new()
            };
            builder.extend(line.split_whitespace());
            sets.push(builder.build());
        }
        Ok(sets)
    }

    /// Exact membership test.
    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// True when every word is in the set.
    pub fn contains_all<'a>(&self, words: impl IntoIterator<Item = &'a str>) -> bool {
        words.into_iter().all(|w| self.contains(w))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate the words in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|w| w.as_str())
    }
}

/// Incremental construction of a [`VocabularySet`].
#[derive(Debug, Default)]
pub struct VocabularyBuilder {
    words: AHashSet<CompactString>,
}

impl VocabularyBuilder {
    /// Start from an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a set holding `<s>`, `</s>` and `<unk>`.
    pub fn with_reserved() -> Self {
        let mut builder = Self::new();
        builder.extend(RESERVED_TOKENS);
        builder
    }

    /// Add one word. Returns false if it was already present.
    pub fn insert(&mut self, word: &str) -> bool {
        self.words.insert(CompactString::new(word))
    }

    /// Add several words.
    pub fn extend<'a>(&mut self, words: impl IntoIterator<Item = &'a str>) {
        for word in words {
            self.insert(word);
        }
    }

    /// Add every whitespace-delimited word of `input` until it is exhausted.
    ///
    /// Read failures, including invalid UTF-8, are returned as I/O errors.
    /// On error the builder should be discarded.
    pub fn extend_from<R: BufRead>(&mut self, mut input: R) -> Result<()> {
        let mut line = String::new();
        loop {
            line.clear();
            if input.read_line(&mut line)? == 0 {
                return Ok(());
            }
            self.extend(line.split_whitespace());
        }
    }

    /// Freeze the builder into an immutable set.
    pub fn build(self) -> VocabularySet {
        VocabularySet { words: self.words }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilterError;
    use std::io::Cursor;

    #[test]
    fn test_build_deduplicates() {
        let vocab = VocabularySet::build(Cursor::new("a b a c")).unwrap();
        assert_eq!(vocab.len(), 3);
        assert!(vocab.contains("a"));
        assert!(vocab.contains("b"));
        assert!(vocab.contains("c"));
        assert!(!vocab.contains("d"));
    }

    #[test]
    fn test_build_any_line_structure() {
        let vocab = VocabularySet::build(Cursor::new("  the\tcat\n\nsat on\r\nthe mat")).unwrap();
        let mut words: Vec<&str> = vocab.iter().collect();
        words.sort_unstable();
        assert_eq!(words, vec!["cat", "mat", "on", "sat", "the"]);
    }

    #[test]
    fn test_contains_is_case_sensitive() {
        let vocab = VocabularySet::build(Cursor::new("Cat")).unwrap();
        assert!(vocab.contains("Cat"));
        assert!(!vocab.contains("cat"));
        assert!(!vocab.contains("Cat "));
    }

    #[test]
    fn test_build_does_not_add_reserved() {
        let vocab = VocabularySet::build(Cursor::new("a")).unwrap();
        assert!(!vocab.contains(SENTENCE_BEGIN));
        assert!(!vocab.contains(UNKNOWN));
    }

    #[test]
    fn test_with_reserved() {
        let mut builder = VocabularyBuilder::with_reserved();
        assert!(builder.insert("a"));
        assert!(!builder.insert("<s>"));
        let vocab = builder.build();
        assert_eq!(vocab.len(), 4);
        assert!(vocab.contains_all(RESERVED_TOKENS));
    }

    #[test]
    fn test_build_rejects_invalid_utf8() {
        let bytes: &[u8] = b"good \xff\xfe bad";
        let err = VocabularySet::build(Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, FilterError::Io(_)));
    }

    #[test]
    fn test_build_per_line() {
        let sets = VocabularySet::build_per_line(Cursor::new("a b\nc\n\n"), true).unwrap();
        assert_eq!(sets.len(), 3);
        assert!(sets[0].contains_all(["a", "b", "<s>"]));
        assert!(!sets[0].contains("c"));
        assert!(sets[1].contains("c"));
        assert_eq!(sets[2].len(), RESERVED_TOKENS.len());
    }
}
