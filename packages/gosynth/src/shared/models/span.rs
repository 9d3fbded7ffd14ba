//! Source location types
//!
//! These types represent positions in source code.

use serde::{Deserialize, Serialize};

/// Span in source code (1-indexed lines, 0-indexed columns)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl Span {
    pub fn new(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Create a zero span (0:0-0:0)
    pub fn zero() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::zero()
    }
}

/// Position-tracking table for one file
///
/// Maps byte offsets back to line/column pairs. Built once per parsed file.
#[derive(Debug, Clone, Default)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { line_starts }
    }

    /// Line (1-indexed) and column (0-indexed) of a byte offset
    pub fn position(&self, offset: usize) -> (u32, u32) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(next) => next - 1,
        };
        let col = offset - self.line_starts[line];
        (line as u32 + 1, col as u32)
    }

    /// Span covering a byte range
    pub fn span(&self, start: usize, end: usize) -> Span {
        let (start_line, start_col) = self.position(start);
        let (end_line, end_col) = self.position(end);
        Span::new(start_line, start_col, end_line, end_col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_span_is_zero() {
        assert_eq!(Span::default(), Span::new(0, 0, 0, 0));
    }

    #[test]
    fn test_line_index_positions() {
        let index = LineIndex::new("package a\n\nfunc F() {}\n");
        assert_eq!(index.position(0), (1, 0));
        assert_eq!(index.position(8), (1, 8));
        assert_eq!(index.position(10), (2, 0));
        assert_eq!(index.position(11), (3, 0));
        assert_eq!(index.position(16), (3, 5));
    }

    #[test]
    fn test_line_index_span() {
        let source = "package a\nfunc F() {\n}\n";
        let index = LineIndex::new(source);
        let start = source.find("func").unwrap();
        let end = source.rfind('}').unwrap() + 1;
        assert_eq!(index.span(start, end), Span::new(2, 0, 3, 1));
    }
}
