use crate::error::CompileError;
use crate::span::Span;

use super::cursor::Cursor;
use super::token::{Literal, Token, TokenKind};

/// Scans the whole source into a token sequence ending with a single `Eof`.
///
/// Newlines are kept as `Newline` tokens; use [`without_newlines`] to get the
/// sequence the parser consumes. The first lexical error aborts the scan.
pub fn tokenize(source: &str) -> Result<Vec<Token>, CompileError> {
    let mut lexer = Lexer::new(source);
    lexer.scan_tokens()?;
    Ok(lexer.tokens)
}

/// Copy of `tokens` with every `Newline` dropped.
pub fn without_newlines(tokens: &[Token]) -> Vec<Token> {
    tokens
        .iter()
        .filter(|token| token.kind != TokenKind::Newline)
        .cloned()
        .collect()
}

struct Lexer<'a> {
    cursor: Cursor<'a>,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            tokens: Vec::new(),
        }
    }

    fn scan_tokens(&mut self) -> Result<(), CompileError> {
        while !self.cursor.is_at_end() {
            self.cursor.begin_token();
            self.scan_token()?;
        }

        let (line, col) = (self.cursor.line(), self.cursor.col());
        self.tokens
            .push(Token::new(TokenKind::Eof, "", Span::point(line, col)));
        Ok(())
    }

    fn scan_token(&mut self) -> Result<(), CompileError> {
        let Some(ch) = self.cursor.advance() else {
            return Ok(());
        };

        match ch {
            '(' => self.add(TokenKind::LParen),
            ')' => self.add(TokenKind::RParen),
            '{' => self.add(TokenKind::LBrace),
            '}' => self.add(TokenKind::RBrace),
            '[' => self.add(TokenKind::LBracket),
            ']' => self.add(TokenKind::RBracket),
            ',' => self.add(TokenKind::Comma),
            ';' => self.add(TokenKind::Semicolon),
            ':' => self.add(TokenKind::Colon),
            '-' => self.add(TokenKind::Minus),
            '*' => self.add(TokenKind::Star),
            '/' => self.add(TokenKind::Slash),
            '%' => self.add(TokenKind::Percent),
            '+' => {
                let kind = if self.cursor.match_char('+') {
                    TokenKind::Increment
                } else {
                    TokenKind::Plus
                };
                self.add(kind);
            }
            '<' => {
                let kind = if self.cursor.match_char('=') {
                    TokenKind::LessEqual
                } else {
                    TokenKind::Less
                };
                self.add(kind);
            }
            '>' => {
                let kind = if self.cursor.match_char('=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                };
                self.add(kind);
            }
            '=' => {
                let kind = if self.cursor.match_char('=') {
                    TokenKind::Equal
                } else {
                    TokenKind::Assign
                };
                self.add(kind);
            }
            '!' => {
                let kind = if self.cursor.match_char('=') {
                    TokenKind::NotEqual
                } else {
                    TokenKind::Not
                };
                self.add(kind);
            }
            '&' => {
                if self.cursor.match_char('&') {
                    self.add(TokenKind::AndAnd);
                } else {
                    return Err(self.error("lone '&', expected '&&'"));
                }
            }
            '\n' => {
                let (line, col) = (self.cursor.start_line(), self.cursor.start_col());
                self.tokens
                    .push(Token::new(TokenKind::Newline, "\n", Span::point(line, col)));
            }
            ' ' | '\t' | '\r' => {}
            c if c.is_ascii_digit() => self.number()?,
            c if is_ident_start(c) => self.identifier(),
            _ => return Err(self.error("unrecognized character")),
        }

        Ok(())
    }

    fn number(&mut self) -> Result<(), CompileError> {
        while self.cursor.peek().is_ascii_digit() {
            self.cursor.advance();
        }

        if self.cursor.peek().is_alphabetic() {
            return Err(self.error("letter directly after integer literal"));
        }

        let text = self.cursor.lexeme();
        let value: i64 = text
            .parse()
            .map_err(|_| self.error("integer literal out of range"))?;

        let token = Token::new(TokenKind::IntLiteral, text, self.span())
            .with_literal(Literal::Int(value));
        self.tokens.push(token);
        Ok(())
    }

    fn identifier(&mut self) {
        while is_ident_part(self.cursor.peek()) {
            self.cursor.advance();
        }

        let text = self.cursor.lexeme();
        let kind = TokenKind::keyword(text).unwrap_or(TokenKind::Identifier);
        self.add(kind);
    }

    fn add(&mut self, kind: TokenKind) {
        let token = Token::new(kind, self.cursor.lexeme(), self.span());
        self.tokens.push(token);
    }

    /// Span from the token checkpoint to the last consumed character.
    fn span(&self) -> Span {
        Span::new(
            self.cursor.start_line(),
            self.cursor.start_col(),
            self.cursor.col() - 1,
        )
    }

    fn error(&self, message: &str) -> CompileError {
        CompileError::LexerError {
            message: message.to_string(),
            snippet: self.cursor.lexeme().to_string(),
            line: self.cursor.start_line(),
            column: self.cursor.start_col(),
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
