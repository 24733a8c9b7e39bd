//! End-to-end filtering through files on disk.

use lmfilter_core::arpa::{read_end, read_section_header, ModelReader};
use lmfilter_core::{filter, CountLedger, MultipleOutputFilter, OutputModel, Router, SingleVocabFilter, VocabularySet};
use std::fs::{self, File};
use std::io::{BufReader, Cursor};
use std::path::Path;
use std::sync::Arc;

const MODEL: &str = "\n\\data\\\nngram 1=2\nngram 2=1\n\n\
                     \\1-grams:\n-0.7\thello\t-0.1\n-0.9\tworld\t-0.2\n\n\
                     \\2-grams:\n-0.3\thello world\n\n\
                     \\end\\\n";

/// Re-read a written model, returning its counts and records.
fn reread(path: &Path) -> (CountLedger, Vec<String>) {
    let mut reader = ModelReader::new(BufReader::new(File::open(path).unwrap()));
    let counts = CountLedger::decode(&mut reader).unwrap();
    let mut records = Vec::new();
    for (length, count) in counts.iter() {
        read_section_header(&mut reader, length).unwrap();
        for _ in 0..count {
            records.push(reader.read_record(length).unwrap().text.to_string());
        }
    }
    reader.skip_blank_lines().unwrap();
    read_end(&mut reader).unwrap();
    (counts, records)
}

#[test]
fn full_vocabulary_reproduces_counts() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("filtered.arpa");

    let vocab = Arc::new(VocabularySet::build(Cursor::new("hello world")).unwrap());
    let mut single = SingleVocabFilter::new(vocab, OutputModel::create(&out_path).unwrap());
    let input_counts = filter::run(Cursor::new(MODEL), &mut single).unwrap();
    drop(single);

    let written = fs::read_to_string(&out_path).unwrap();
    assert_eq!(written, MODEL);

    let (counts, records) = reread(&out_path);
    assert_eq!(counts, input_counts);
    assert_eq!(records, vec!["-0.7\thello\t-0.1", "-0.9\tworld\t-0.2", "-0.3\thello world"]);
}

#[test]
fn multiple_outputs_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let prefix = format!("{}/sentence.", dir.path().display());

    let vocabs = VocabularySet::build_per_line(Cursor::new("hello\nworld\nhello world\n"), true)
        .unwrap()
        .into_iter()
        .map(Arc::new)
        .collect();
    let router = Router::create(&prefix, vocabs).unwrap();
    let mut multiple = MultipleOutputFilter::new(router);
    filter::run(Cursor::new(MODEL), &mut multiple).unwrap();
    drop(multiple);

    let (counts, records) = reread(&dir.path().join("sentence.0"));
    assert_eq!(counts.as_slice(), &[1, 0]);
    assert_eq!(records, vec!["-0.7\thello\t-0.1"]);

    let (counts, records) = reread(&dir.path().join("sentence.1"));
    assert_eq!(counts.as_slice(), &[1, 0]);
    assert_eq!(records, vec!["-0.9\tworld\t-0.2"]);

    let (counts, _) = reread(&dir.path().join("sentence.2"));
    assert_eq!(counts.as_slice(), &[2, 1]);
}

#[test]
fn malformed_header_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("filtered.arpa");
    let bad = MODEL.replace("ngram 1=2\nngram 2=1", "ngram 2=1\nngram 1=2");

    let vocab = Arc::new(VocabularySet::build(Cursor::new("hello world")).unwrap());
    let mut single = SingleVocabFilter::new(vocab, OutputModel::create(&out_path).unwrap());
    let err = filter::run(Cursor::new(bad), &mut single).unwrap_err();
    assert!(matches!(err, lmfilter_core::FilterError::Format { .. }));
    drop(single);

    assert_eq!(fs::metadata(&out_path).unwrap().len(), 0);
}
