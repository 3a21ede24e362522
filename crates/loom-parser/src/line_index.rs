//! Conversion from byte offsets to 1-based line/column positions.
//!
//! Editors address markers by line and column. Columns count characters,
//! not bytes, so multi-byte text before a diagnostic does not shift its
//! marker.

use serde::Serialize;

use crate::span::Span;

/// A 1-based line/column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
}

/// Precomputed line starts for one source text.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    /// Index the line starts of `text`.
    pub fn new(text: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                text.bytes()
                    .enumerate()
                    .filter(|(_, byte)| *byte == b'\n')
                    .map(|(idx, _)| idx + 1),
            )
            .collect();
        Self { text, line_starts }
    }

    /// Position of a byte offset.
    ///
    /// Offsets past the end clamp to the end of the text, and offsets inside
    /// a multi-byte character resolve to that character.
    pub fn position(&self, offset: usize) -> Position {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }

        let line_idx = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts[line_idx];
        let column = self.text[line_start..offset].chars().count() + 1;

        Position {
            line: line_idx + 1,
            column,
        }
    }

    /// Start and end positions of a span.
    pub fn range(&self, span: Span) -> (Position, Position) {
        (self.position(span.start()), self.position(span.end()))
    }
}
