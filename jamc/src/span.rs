use std::fmt;

/// Position of a token in the source, 1-based. `col_end` is inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub col_start: usize,
    pub col_end: usize,
}

impl Span {
    pub fn new(line: usize, col_start: usize, col_end: usize) -> Self {
        Self { line, col_start, col_end }
    }

    /// Single-column span, used for newline and end-of-input tokens.
    pub fn point(line: usize, column: usize) -> Self {
        Self::new(line, column, column)
    }
}

impl Default for Span {
    fn default() -> Self {
        Self {
            line: 1,
            col_start: 1,
            col_end: 1,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col_start)
    }
}
