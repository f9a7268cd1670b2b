//! Front end for the Jam language: source text in, syntax tree out.
//!
//! ```text
//! Source → Cursor/Lexer → tokens → Parser → AST → Backend (json | tree)
//! ```
//!
//! 1. [`parser`] scans the source ([`parser::lexer::tokenize`]) and builds the
//!    tree ([`parser::parser::parse_tokens`]); [`parser::parse`] does both.
//! 2. [`ir::ast`] holds the node types.
//! 3. [`backends`] renders a finished tree; [`format`] renders the token list.
//!
//! The first lexical or syntax error stops the pass and is returned as a
//! [`error::CompileError`] carrying its line and column.

pub mod backends;
pub mod error;
pub mod format;
pub mod ir;
pub mod parser;
pub mod span;
