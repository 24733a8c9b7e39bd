//! Word extraction from raw n-gram records.

use super::section::Line;
use crate::error::{FilterError, Result};

/// Return the `length` words of an n-gram record.
///
/// A record is `<prob>\t<w1> ... <wn>[\t<backoff>]`. The probability and
/// backoff are left uninterpreted.
pub fn words<'a>(line: Line<'a>, length: usize) -> Result<Vec<&'a str>> {
    let mut fields = line.text.split('\t');
    let _probability = fields.next();
    let sequence = fields
        .next()
        .ok_or_else(|| FilterError::format(line.number, line.text, "no tab after the probability"))?;
    if fields.count() > 1 {
        return Err(FilterError::format(line.number, line.text, "too many tab-separated fields"));
    }

    let words: Vec<&str> = sequence.split_whitespace().collect();
    if words.len() != length {
        return Err(FilterError::format(
            line.number,
            line.text,
            format!("expected {} words but found {}", length, words.len()),
        ));
    }
    Ok(words)
}
