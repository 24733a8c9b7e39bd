//! Which vocabularies accept an n-gram.
//!
//! A vocabulary accepts an n-gram when it contains every one of its words.
//! [`accepting`] scans each set directly; [`DestinationIndex`] inverts the
//! sets into per-word posting lists, which is much cheaper when there are
//! many small vocabularies (one per sentence, say).

use crate::vocab::VocabularySet;
use ahash::AHashMap;
use compact_str::CompactString;

/// Indices of the sets that contain every word, ascending.
pub fn accepting<'a>(sets: impl IntoIterator<Item = &'a VocabularySet>, words: &[&str]) -> Vec<usize> {
    sets.into_iter()
        .enumerate()
        .filter(|(_, set)| set.contains_all(words.iter().copied()))
        .map(|(i, _)| i)
        .collect()
}

/// True when at least one set contains every word.
pub fn accepts_any<'a>(sets: impl IntoIterator<Item = &'a VocabularySet>, words: &[&str]) -> bool {
    sets.into_iter()
        .any(|set| set.contains_all(words.iter().copied()))
}

/// Inverted index from word to the sorted destinations whose vocabulary
/// holds it.
#[derive(Debug, Default)]
pub struct DestinationIndex {
    postings: AHashMap<CompactString, Vec<u32>>,
    destinations: usize,
}

impl DestinationIndex {
    /// Index vocabularies in destination order.
    pub fn new<'a>(sets: impl IntoIterator<Item = &'a VocabularySet>) -> Self {
        let mut postings: AHashMap<CompactString, Vec<u32>> = AHashMap::new();
        let mut destinations = 0;
        for (i, set) in sets.into_iter().enumerate() {
            for word in set.iter() {
                postings
                    .entry(CompactString::new(word))
                    .or_default()
                    .push(i as u32);
            }
            destinations += 1;
        }
        Self {
            postings,
            destinations,
        }
    }

    /// Number of indexed destinations.
    #[inline]
    pub fn destinations(&self) -> usize {
        self.destinations
    }

    /// Fill `out` with the destinations accepting `words`, ascending.
    ///
    /// An empty word sequence is accepted everywhere.
    pub fn accepting_into(&self, words: &[&str], out: &mut Vec<usize>) {
        out.clear();
        if words.is_empty() {
            out.extend(0..self.destinations);
            return;
        }

        let mut lists = Vec::with_capacity(words.len());
        for word in words {
            match self.postings.get(*word) {
                Some(list) => lists.push(list.as_slice()),
                None => return,
            }
        }
        // Walk the shortest list and look each id up in the others.
        lists.sort_unstable_by_key(|l| l.len());
        let Some((shortest, rest)) = lists.split_first() else {
            return;
        };
        out.extend(
            shortest
                .iter()
                .filter(|&&id| rest.iter().all(|l| l.binary_search(&id).is_ok()))
                .map(|&id| id as usize),
        );
    }

    /// Destinations accepting `words`, ascending.
    pub fn accepting(&self, words: &[&str]) -> Vec<usize> {
        let mut out = Vec::new();
        self.accepting_into(words, &mut out);
        out
    }
}
