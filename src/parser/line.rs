//! Unfold ICS content into logical lines.
//!
//! RFC 5545 folds long content lines by inserting a line break followed by a single
//! whitespace character (space or horizontal tab). Unfolding removes the break and that
//! one character, appending the remainder to the previous logical line.
//!
//! Line terminators may be CRLF or bare LF.
//!
//! # Examples
//!
//! ```rust
//! let lines: Vec<String> = calfeed::LineReader::from_str("SUMMARY:Long\r\n  title\r\n")
//!     .map(|line| line.into_inner())
//!     .collect();
//!
//! assert_eq!(lines, vec!["SUMMARY:Long title".to_owned(), String::new()]);
//! ```

use derive_more::Display;
use std::vec;

const CONTINUATION: [char; 2] = [' ', '\t'];

/// A logical (unfolded) line.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{number}: {inner}")]
pub struct Line {
    /// Physical line number (1-based) at which the logical line starts.
    number: usize,
    inner: String,
}

impl Line {
    pub fn new(number: usize, inner: String) -> Self {
        Self { number, inner }
    }

    #[inline]
    pub fn number(&self) -> usize {
        self.number
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    pub fn into_inner(self) -> String {
        self.inner
    }
}

/// Unfold `input` in a single left-to-right pass.
///
/// A continuation is only ever joined to the line already emitted before it, so a
/// leading whitespace line at the very start of the input is kept as its own line.
pub fn unfold(input: &str) -> Vec<Line> {
    let normalized = input.replace("\r\n", "\n");
    let mut lines: Vec<Line> = Vec::new();

    for (idx, raw) in normalized.split('\n').enumerate() {
        if raw.starts_with(CONTINUATION)
            && let Some(prev) = lines.last_mut()
        {
            // Both continuation markers are a single byte.
            prev.inner.push_str(&raw[1..]);
            continue;
        }
        lines.push(Line::new(idx + 1, raw.to_owned()));
    }

    lines
}

/// Iterator over the logical lines of an ICS document.
pub struct LineReader {
    lines: vec::IntoIter<Line>,
}

impl LineReader {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &str) -> Self {
        Self {
            lines: unfold(input).into_iter(),
        }
    }
}

impl Iterator for LineReader {
    type Item = Line;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next()
    }
}
