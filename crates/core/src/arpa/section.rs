//! Line reading and section framing.
//!
//! A malformed model is fatal for the whole run, so every check here either
//! succeeds or returns an error naming the offending line. Nothing retries.

use super::{section_marker, END_MARKER};
use crate::error::{FilterError, Result};
use std::io::BufRead;

/// One line of model input without its terminating newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based line number in the input
    pub number: usize,
    /// Line contents
    pub text: &'a str,
}

/// Line-oriented reader over a model stream that tracks line numbers.
pub struct ModelReader<R> {
    inner: R,
    buf: String,
    line_number: usize,
}

impl<R: BufRead> ModelReader<R> {
    /// Wrap a buffered reader.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: String::new(),
            line_number: 0,
        }
    }

    /// Number of the last line consumed (0 before any read).
    #[inline]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read the next line, or `None` at end of input.
    pub fn next_line(&mut self) -> Result<Option<Line<'_>>> {
        self.buf.clear();
        if self.inner.read_line(&mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        if self.buf.ends_with('\n') {
            self.buf.pop();
        }
        Ok(Some(Line {
            number: self.line_number,
            text: &self.buf,
        }))
    }

    /// Consume blank lines without reading past the first non-blank one.
    pub fn skip_blank_lines(&mut self) -> Result<()> {
        loop {
            let buf = self.inner.fill_buf()?;
            if buf.first() != Some(&b'\n') {
                return Ok(());
            }
            self.inner.consume(1);
            self.line_number += 1;
        }
    }

    /// Read one record of the section for `length`.
    ///
    /// Records are never blank and never start with `\`; either means the
    /// section ended before its declared count was reached.
    pub fn read_record(&mut self, length: usize) -> Result<Line<'_>> {
        let line = self
            .next_line()?
            .ok_or_else(|| FilterError::truncated(format!("{}-gram records", length)))?;
        if line.text.is_empty() || line.text.starts_with('\\') {
            return Err(FilterError::format(
                line.number,
                line.text,
                format!("{}-gram section ended before its declared count", length),
            ));
        }
        Ok(line)
    }
}

/// Skip blank lines, then require the marker `\<length>-grams:`.
pub fn read_section_header<R: BufRead>(reader: &mut ModelReader<R>, length: usize) -> Result<()> {
    reader.skip_blank_lines()?;
    let line = reader
        .next_line()?
        .ok_or_else(|| FilterError::truncated(format!("the \\{}-grams: marker", length)))?;
    if line.text != section_marker(length) {
        return Err(FilterError::format(line.number, line.text, "wrong n-gram section marker"));
    }
    Ok(())
}

/// Require the next line to be `\end\`.
pub fn read_end<R: BufRead>(reader: &mut ModelReader<R>) -> Result<()> {
    let line = reader
        .next_line()?
        .ok_or_else(|| FilterError::truncated("the \\end\\ marker"))?;
    if line.text != END_MARKER {
        return Err(FilterError::format(line.number, line.text, "bad end marker"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(text: &str) -> ModelReader<Cursor<&[u8]>> {
        ModelReader::new(Cursor::new(text.as_bytes()))
    }

    #[test]
    fn test_next_line_tracks_numbers() {
        let mut r = reader("a\n\nb");
        assert_eq!(r.next_line().unwrap().unwrap(), Line { number: 1, text: "a" });
        assert_eq!(r.next_line().unwrap().unwrap(), Line { number: 2, text: "" });
        assert_eq!(r.next_line().unwrap().unwrap(), Line { number: 3, text: "b" });
        assert!(r.next_line().unwrap().is_none());
    }

    #[test]
    fn test_section_header_skips_blank_lines() {
        let mut r = reader("\n\n\n\\2-grams:\nrest\n");
        read_section_header(&mut r, 2).unwrap();
        assert_eq!(r.line_number(), 4);
        assert_eq!(r.next_line().unwrap().unwrap().text, "rest");
    }

    #[test]
    fn test_section_header_wrong_length() {
        let mut r = reader("\\3-grams:\n");
        let err = read_section_header(&mut r, 2).unwrap_err();
        assert!(matches!(err, FilterError::Format { line_number: 1, .. }));
    }

    #[test]
    fn test_section_header_at_end_of_input() {
        let mut r = reader("\n\n");
        let err = read_section_header(&mut r, 1).unwrap_err();
        assert!(matches!(err, FilterError::Truncated { .. }));
    }

    #[test]
    fn test_read_end() {
        read_end(&mut reader("\\end\\\n")).unwrap();
        read_end(&mut reader("\\end\\")).unwrap();

        let err = read_end(&mut reader("\\end\n")).unwrap_err();
        assert!(matches!(err, FilterError::Format { .. }));

        let err = read_end(&mut reader("")).unwrap_err();
        assert!(matches!(err, FilterError::Truncated { .. }));
    }

    #[test]
    fn test_read_record_stops_at_section_boundary() {
        let mut r = reader("-1.0\ta\n\n");
        assert_eq!(r.read_record(1).unwrap().text, "-1.0\ta");
        assert!(matches!(r.read_record(1), Err(FilterError::Format { .. })));

        let mut r = reader("\\2-grams:\n");
        assert!(matches!(r.read_record(1), Err(FilterError::Format { .. })));

        let mut r = reader("");
        assert!(matches!(r.read_record(1), Err(FilterError::Truncated { .. })));
    }
}
