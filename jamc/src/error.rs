use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("Lexer error at {line}:{column}: {message} near '{snippet}'")]
    LexerError {
        message: String,
        snippet: String,
        line: usize,
        column: usize,
    },

    #[error("Syntax error at {found} (line: {line}, col: {column}): {message}")]
    SyntaxError {
        message: String,
        found: String,
        line: usize,
        column: usize,
    },
}

impl CompileError {
    pub fn line(&self) -> usize {
        match self {
            CompileError::LexerError { line, .. } | CompileError::SyntaxError { line, .. } => *line,
        }
    }

    pub fn column(&self) -> usize {
        match self {
            CompileError::LexerError { column, .. } | CompileError::SyntaxError { column, .. } => {
                *column
            }
        }
    }

    pub fn is_lexical(&self) -> bool {
        matches!(self, CompileError::LexerError { .. })
    }
}

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("JSON serialization failed: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}
