pub mod json;
pub mod tree;

use crate::error::EmitError;
use crate::ir::ast;

/// A consumer that walks a finished AST and renders it.
pub trait Backend {
    fn emit(&mut self, program: &ast::Program) -> Result<String, EmitError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    Json,
    Tree,
}

impl BackendType {
    pub fn all() -> Vec<Self> {
        vec![Self::Json, Self::Tree]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|b| b.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Tree => "tree",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Json => "pretty-printed JSON syntax tree",
            Self::Tree => "indented plain-text syntax tree",
        }
    }

    /// File written in the working directory when no `--output` is given.
    pub fn default_output(&self) -> &'static str {
        match self {
            Self::Json => "ast.json",
            Self::Tree => "ast.txt",
        }
    }

    pub fn create(&self) -> Box<dyn Backend> {
        match self {
            Self::Json => Box::new(json::JsonBackend),
            Self::Tree => Box::new(tree::TreeBackend::default()),
        }
    }
}
