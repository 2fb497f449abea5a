//! Parser trait definition

use crate::parser::types::DeclaredDependencies;

/// Trait for extracting the dependency sections of a manifest
pub trait Parser {
    fn parse(&self, content: &str) -> Result<DeclaredDependencies, ParseError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The JSON grammar could not be loaded into tree-sitter
    #[error("Failed to load JSON grammar: {0}")]
    Grammar(String),

    /// tree-sitter gave up without producing a tree
    #[error("No syntax tree produced for manifest")]
    NoTree,

    #[error("Manifest is not valid JSON")]
    InvalidJson,

    #[error("Manifest must contain a JSON object at the top level")]
    NotAnObject,
}
