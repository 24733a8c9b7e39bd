//! One output per vocabulary, advanced in lockstep.
//!
//! The router owns an indexed collection of destinations so that each one
//! is addressed explicitly instead of through shared global state. It does
//! no filtering: callers decide which destinations receive a record (see
//! [`crate::filter::intersect`]) and write through [`Router::get_mut`].

use crate::arpa::CountLedger;
use crate::error::Result;
use crate::output::OutputModel;
use crate::vocab::VocabularySet;
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

/// A named output paired with the vocabulary that feeds it.
pub struct Destination<W: Write + Seek> {
    name: String,
    vocab: Arc<VocabularySet>,
    output: OutputModel<W>,
}

impl<W: Write + Seek> Destination<W> {
    pub fn new(name: impl Into<String>, vocab: Arc<VocabularySet>, output: OutputModel<W>) -> Self {
        Self {
            name: name.into(),
            vocab,
            output,
        }
    }

    /// Identity of the destination (the file name for file outputs).
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn vocab(&self) -> &Arc<VocabularySet> {
        &self.vocab
    }

    #[inline]
    pub fn output(&self) -> &OutputModel<W> {
        &self.output
    }

    #[inline]
    pub fn output_mut(&mut self) -> &mut OutputModel<W> {
        &mut self.output
    }

    /// Release the output's sink.
    pub fn into_output(self) -> OutputModel<W> {
        self.output
    }
}

/// Fixed set of destinations, each with its own vocabulary and output.
pub struct Router<W: Write + Seek> {
    destinations: Vec<Destination<W>>,
}

impl Router<BufWriter<File>> {
    /// Create file `<prefix><i>` for the `i`-th vocabulary.
    ///
    /// All or nothing: if any file cannot be created, the files already
    /// created are closed and removed before the error is returned.
    pub fn create(prefix: &str, vocabs: Vec<Arc<VocabularySet>>) -> Result<Self> {
        let mut destinations = Vec::with_capacity(vocabs.len());
        let mut created: Vec<PathBuf> = Vec::with_capacity(vocabs.len());
        for (i, vocab) in vocabs.into_iter().enumerate() {
            let name = format!("{}{}", prefix, i);
            match OutputModel::create(&name) {
                Ok(output) => {
                    created.push(PathBuf::from(&name));
                    destinations.push(Destination::new(name, vocab, output));
                }
                Err(e) => {
                    drop(destinations);
                    for path in &created {
                        if let Err(err) = std::fs::remove_file(path) {
                            warn!(path = %path.display(), %err, "could not remove partial output");
                        }
                    }
                    return Err(e);
                }
            }
        }
        debug!(count = destinations.len(), prefix, "created destinations");
        Ok(Self { destinations })
    }
}

impl<W: Write + Seek> Router<W> {
    /// Take ownership of already opened destinations.
    pub fn new(destinations: Vec<Destination<W>>) -> Self {
        Self { destinations }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Destination<W>> {
        self.destinations.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Destination<W>> {
        self.destinations.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Destination<W>> {
        self.destinations.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Destination<W>> {
        self.destinations.iter_mut()
    }

    /// Vocabularies in destination order.
    pub fn vocabularies(&self) -> impl Iterator<Item = &VocabularySet> {
        self.destinations.iter().map(|d| d.vocab.as_ref())
    }

    /// Reserve header space on every output.
    pub fn reserve_header(&mut self, bound: &CountLedger) -> Result<()> {
        self.each(|out| out.reserve_header(bound))
    }

    pub fn begin_length(&mut self, length: usize) -> Result<()> {
        self.each(|out| out.begin_length(length))
    }

    pub fn end_length(&mut self, length: usize) -> Result<()> {
        self.each(|out| out.end_length(length))
    }

    /// Finish every output, stopping at the first failure.
    pub fn finish(&mut self) -> Result<()> {
        self.each(|out| out.finish())
    }

    /// Release the destinations.
    pub fn into_destinations(self) -> Vec<Destination<W>> {
        self.destinations
    }

    fn each(&mut self, mut op: impl FnMut(&mut OutputModel<W>) -> Result<()>) -> Result<()> {
        for dest in &mut self.destinations {
            op(&mut dest.output)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilterError;
    use std::io::Cursor;

    fn vocab(words: &str) -> Arc<VocabularySet> {
        Arc::new(VocabularySet::build(Cursor::new(words)).unwrap())
    }

    fn memory_router(vocabs: &[&str]) -> Router<Cursor<Vec<u8>>> {
        Router::new(
            vocabs
                .iter()
                .enumerate()
                .map(|(i, w)| {
                    Destination::new(format!("out{}", i), vocab(w), OutputModel::new(Cursor::new(Vec::new())))
                })
                .collect(),
        )
    }

    #[test]
    fn test_lockstep_sections() {
        let mut router = memory_router(&["a", "b"]);
        router.reserve_header(&CountLedger::from(vec![1])).unwrap();
        router.begin_length(1).unwrap();
        router.get_mut(1).unwrap().output_mut().write_record(b"-1.0\tb").unwrap();
        router.end_length(1).unwrap();
        router.finish().unwrap();

        assert_eq!(router.get(0).unwrap().output().counts().as_slice(), &[0]);
        assert_eq!(router.get(1).unwrap().output().counts().as_slice(), &[1]);
    }

    #[test]
    fn test_vocabularies_keep_pairing() {
        let router = memory_router(&["x", "y z"]);
        let sizes: Vec<usize> = router.vocabularies().map(|v| v.len()).collect();
        assert_eq!(sizes, vec![1, 2]);
        assert_eq!(router.get(1).unwrap().name(), "out1");
        assert!(router.get(1).unwrap().vocab().contains("z"));
    }

    #[test]
    fn test_create_names_files_with_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = format!("{}/part.", dir.path().display());
        let router = Router::create(&prefix, vec![vocab("a"), vocab("b"), vocab("c")]).unwrap();
        assert_eq!(router.len(), 3);
        for i in 0..3 {
            assert!(dir.path().join(format!("part.{}", i)).exists());
        }
    }

    #[test]
    fn test_create_is_all_or_nothing() {
        let dir = tempfile::tempdir().unwrap();
        // Destination 1 collides with an existing directory.
        std::fs::create_dir(dir.path().join("part.1")).unwrap();
        let prefix = format!("{}/part.", dir.path().display());

        let err = match Router::create(&prefix, vec![vocab("a"), vocab("b"), vocab("c")]) {
            Ok(_) => panic!("router creation should fail"),
            Err(e) => e,
        };
        assert!(matches!(err, FilterError::Open { .. }));
        assert!(!dir.path().join("part.0").exists());
        assert!(!dir.path().join("part.2").exists());
    }
}
