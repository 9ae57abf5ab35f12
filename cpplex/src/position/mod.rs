//! Source location tracking
//!
//! [`LineIndex`] is built once from the original text and maps a character
//! offset to a 1-based line and column. Only `'\n'` starts a new line; a
//! `'\r'` is an ordinary column.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text: character offset plus 1-based line and column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Character offset from start of input (0-based)
    pub offset: usize,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based, in characters)
    pub column: usize,
}

impl Position {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// The starting position (offset 0, line 1, column 1)
    pub fn start() -> Self {
        Self::new(0, 1, 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Sorted table of line-start offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &[char]) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.iter()
                .enumerate()
                .filter(|&(_, &ch)| ch == '\n')
                .map(|(i, _)| i + 1),
        );
        Self { line_starts }
    }

    pub fn from_text(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        Self::new(&chars)
    }

    /// Number of lines, counting a trailing empty line after a final `'\n'`
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Resolve `offset` to a position.
    ///
    /// Offsets past the end of the text resolve against the last line.
    pub fn position(&self, offset: usize) -> Position {
        let line_index = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts[line_index];

        Position::new(offset, line_index + 1, offset - line_start + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line() {
        let index = LineIndex::from_text("int x;");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.position(0), Position::new(0, 1, 1));
        assert_eq!(index.position(4), Position::new(4, 1, 5));
    }

    #[test]
    fn test_multiple_lines() {
        let index = LineIndex::from_text("a\nbc\n\nd");
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.position(1), Position::new(1, 1, 2)); // the '\n' itself
        assert_eq!(index.position(2), Position::new(2, 2, 1));
        assert_eq!(index.position(3), Position::new(3, 2, 2));
        assert_eq!(index.position(5), Position::new(5, 3, 1));
        assert_eq!(index.position(6), Position::new(6, 4, 1));
    }

    #[test]
    fn test_carriage_return_is_a_column() {
        let index = LineIndex::from_text("a\r\nb");
        assert_eq!(index.position(1).line, 1);
        assert_eq!(index.position(1).column, 2);
        assert_eq!(index.position(3), Position::new(3, 2, 1));
    }

    #[test]
    fn test_columns_count_characters() {
        let index = LineIndex::from_text("é\"ü\" x");
        assert_eq!(index.position(5).column, 6);
    }

    #[test]
    fn test_past_end_uses_last_line() {
        let index = LineIndex::from_text("ab\ncd");
        assert_eq!(index.position(10), Position::new(10, 2, 8));

        let empty = LineIndex::from_text("");
        assert_eq!(empty.position(0), Position::start());
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(9, 3, 7).to_string(), "3:7");
    }
}
