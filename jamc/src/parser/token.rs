use std::fmt;

use crate::span::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Punctuation
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    LBracket,  // [
    RBracket,  // ]
    Comma,     // ,
    Semicolon, // ;
    Colon,     // :
    // Operators
    Plus,         // +
    Minus,        // -
    Star,         // *
    Slash,        // /
    Percent,      // %
    Increment,    // ++
    Less,         // <
    LessEqual,    // <=
    Greater,      // >
    GreaterEqual, // >=
    Assign,       // =
    Equal,        // ==
    NotEqual,     // !=
    Not,          // !
    AndAnd,       // &&
    // Literals and names
    IntLiteral,
    Identifier,
    // Reserved words
    Int,
    Float,
    Char,
    String,
    Bool,
    Void,
    Array,
    Func,
    Call,
    Return,
    If,
    Or,
    Else,
    For,
    Moves,
    From,
    To,
    While,
    // Layout
    Newline,
    Eof,
}

impl TokenKind {
    /// Resolves an identifier-shaped word against the fixed keyword table.
    pub fn keyword(text: &str) -> Option<TokenKind> {
        let kind = match text {
            "int" => TokenKind::Int,
            "float" => TokenKind::Float,
            "char" => TokenKind::Char,
            "string" => TokenKind::String,
            "bool" => TokenKind::Bool,
            "void" => TokenKind::Void,
            "array" => TokenKind::Array,
            "func" => TokenKind::Func,
            "call" => TokenKind::Call,
            "return" => TokenKind::Return,
            "if" => TokenKind::If,
            "or" => TokenKind::Or,
            "else" => TokenKind::Else,
            "for" => TokenKind::For,
            "moves" => TokenKind::Moves,
            "from" => TokenKind::From,
            "to" => TokenKind::To,
            "while" => TokenKind::While,
            _ => return None,
        };
        Some(kind)
    }

    /// Short upper-case name, as shown in the token table.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::LBracket => "LBRACKET",
            TokenKind::RBracket => "RBRACKET",
            TokenKind::Comma => "COMMA",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Colon => "COLON",
            TokenKind::Plus => "ADD",
            TokenKind::Minus => "SUBTRACT",
            TokenKind::Star => "MULTIPLY",
            TokenKind::Slash => "DIVIDE",
            TokenKind::Percent => "PERCENT",
            TokenKind::Increment => "INC",
            TokenKind::Less => "LT",
            TokenKind::LessEqual => "LE",
            TokenKind::Greater => "GT",
            TokenKind::GreaterEqual => "GE",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Equal => "EQ",
            TokenKind::NotEqual => "NEQ",
            TokenKind::Not => "NOT",
            TokenKind::AndAnd => "AND",
            TokenKind::IntLiteral => "INT_LIT",
            TokenKind::Identifier => "IDENT",
            TokenKind::Int => "INT",
            TokenKind::Float => "FLOAT",
            TokenKind::Char => "CHAR",
            TokenKind::String => "STRING",
            TokenKind::Bool => "BOOL",
            TokenKind::Void => "VOID",
            TokenKind::Array => "ARRAY",
            TokenKind::Func => "FUNC",
            TokenKind::Call => "CALL",
            TokenKind::Return => "RETURN",
            TokenKind::If => "IF",
            TokenKind::Or => "OR",
            TokenKind::Else => "ELSE",
            TokenKind::For => "FOR",
            TokenKind::Moves => "MOVES",
            TokenKind::From => "FROM",
            TokenKind::To => "TO",
            TokenKind::While => "WHILE",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Eof => "EOF",
        }
    }

    /// Value type keywords: `int`, `float`, `char`, `string`, `bool`.
    /// `void` is left out; it only names a function's return type.
    pub fn is_type_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Int
                | TokenKind::Float
                | TokenKind::Char
                | TokenKind::String
                | TokenKind::Bool
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoded value of a literal token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Literal {
    Int(i64),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(value) => write!(f, "{}", value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub literal: Option<Literal>,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal: None,
            span,
        }
    }

    pub fn with_literal(mut self, literal: Literal) -> Self {
        self.literal = Some(literal);
        self
    }

    pub fn line(&self) -> usize {
        self.span.line
    }

    pub fn column(&self) -> usize {
        self.span.col_start
    }

    /// The lexeme with newlines and NUL made visible.
    pub fn escaped_lexeme(&self) -> String {
        self.lexeme.replace('\n', "\\n").replace('\0', "\\0")
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' at line: {}, column: {}",
            self.kind,
            self.escaped_lexeme(),
            self.span.line,
            self.span.col_start
        )
    }
}
