//! One output per vocabulary.

use super::intersect::DestinationIndex;
use super::Filter;
use crate::arpa::CountLedger;
use crate::error::Result;
use crate::router::Router;
use std::io::{Seek, Write};

/// Writes each n-gram to every destination whose vocabulary holds all of
/// its words.
pub struct MultipleOutputFilter<W: Write + Seek> {
    router: Router<W>,
    index: DestinationIndex,
    /// Scratch space for the destinations accepting the current n-gram
    hits: Vec<usize>,
}

impl<W: Write + Seek> MultipleOutputFilter<W> {
    pub fn new(router: Router<W>) -> Self {
        let index = DestinationIndex::new(router.vocabularies());
        Self {
            router,
            index,
            hits: Vec::new(),
        }
    }

    #[inline]
    pub fn router(&self) -> &Router<W> {
        &self.router
    }

    pub fn into_router(self) -> Router<W> {
        self.router
    }
}

impl<W: Write + Seek> Filter for MultipleOutputFilter<W> {
    fn reserve(&mut self, bound: &CountLedger) -> Result<()> {
        self.router.reserve_header(bound)
    }

    fn begin_length(&mut self, length: usize) -> Result<()> {
        self.router.begin_length(length)
    }

    fn add_ngram(&mut self, words: &[&str], line: &str) -> Result<()> {
        self.index.accepting_into(words, &mut self.hits);
        for &i in &self.hits {
            if let Some(dest) = self.router.get_mut(i) {
                dest.output_mut().write_record(line.as_bytes())?;
            }
        }
        Ok(())
    }

    fn end_length(&mut self, length: usize) -> Result<()> {
        self.router.end_length(length)
    }

    fn finish(&mut self) -> Result<()> {
        self.router.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::run;
    use crate::output::OutputModel;
    use crate::router::Destination;
    use crate::vocab::VocabularySet;
    use std::io::Cursor;
    use std::sync::Arc;

    fn router(lines: &str) -> Router<Cursor<Vec<u8>>> {
        let sets = VocabularySet::build_per_line(Cursor::new(lines), true).unwrap();
        Router::new(
            sets.into_iter()
                .enumerate()
                .map(|(i, set)| {
                    Destination::new(
                        format!("sentence{}", i),
                        Arc::new(set),
                        OutputModel::new(Cursor::new(Vec::new())),
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn test_disjoint_vocabularies_are_isolated() {
        let model = "\n\\data\\\nngram 1=3\nngram 2=1\n\n\
                     \\1-grams:\n-1.0\t<s>\n-1.0\tcat\n-1.0\tdog\n\n\
                     \\2-grams:\n-0.5\t<s> cat\n\n\
                     \\end\\\n";
        let mut filter = MultipleOutputFilter::new(router("cat\ndog\n"));
        run(Cursor::new(model), &mut filter).unwrap();

        let router = filter.into_router();
        assert_eq!(router.get(0).unwrap().output().counts().as_slice(), &[2, 1]);
        assert_eq!(router.get(1).unwrap().output().counts().as_slice(), &[2, 0]);

        let texts: Vec<String> = router
            .into_destinations()
            .into_iter()
            .map(|d| String::from_utf8(d.into_output().into_inner().into_inner()).unwrap())
            .collect();
        assert!(texts[0].contains("-0.5\t<s> cat\n"));
        assert!(!texts[0].contains("dog"));
        assert!(texts[1].contains("\\2-grams:\n\n\\end\\\n"));
        assert!(!texts[1].contains("cat"));
    }
}
