/// Character cursor over the source text.
///
/// Tracks the byte offset, line and column of the next character, plus a
/// checkpoint marking where the token being scanned began. It knows nothing
/// about lexical meaning.
pub struct Cursor<'a> {
    source: &'a str,
    pos: usize,
    line: usize,
    col: usize,

    start: usize,
    start_line: usize,
    start_col: usize,
}

/// Returned by `peek`/`peek_next` past the end of input.
pub const EOF_CHAR: char = '\0';

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            col: 1,
            start: 0,
            start_line: 1,
            start_col: 1,
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn peek(&self) -> char {
        self.rest().chars().next().unwrap_or(EOF_CHAR)
    }

    pub fn peek_next(&self) -> char {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next().unwrap_or(EOF_CHAR)
    }

    /// Consumes one character. `None` means the cursor was already at the end,
    /// which callers treat as a bug in their loop condition.
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.rest().chars().next()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    /// Consumes the next character only if it equals `expected`.
    pub fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.peek() != expected {
            return false;
        }
        self.advance().is_some()
    }

    pub fn begin_token(&mut self) {
        self.start = self.pos;
        self.start_line = self.line;
        self.start_col = self.col;
    }

    /// Text from the token checkpoint up to the current position.
    pub fn lexeme(&self) -> &'a str {
        &self.source[self.start..self.pos]
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn start_line(&self) -> usize {
        self.start_line
    }

    pub fn start_col(&self) -> usize {
        self.start_col
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }
}
