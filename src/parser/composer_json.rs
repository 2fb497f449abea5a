//! composer.json parser

use crate::parser::traits::{ParseError, Parser};
use crate::parser::types::{
    DeclaredDependencies, DependencyKind, DependencySet, Link, Position,
};
use tracing::warn;

/// Parser for composer.json files
pub struct ComposerJsonParser;

impl ComposerJsonParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ComposerJsonParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for ComposerJsonParser {
    fn parse(&self, content: &str) -> Result<DeclaredDependencies, ParseError> {
        let mut parser = tree_sitter::Parser::new();
        let language = tree_sitter_json::LANGUAGE;
        parser.set_language(&language.into()).map_err(|e| {
            warn!("Failed to set JSON language for tree-sitter: {}", e);
            ParseError::Grammar(e.to_string())
        })?;

        let tree = parser.parse(content, None).ok_or_else(|| {
            warn!("Failed to parse JSON content");
            ParseError::NoTree
        })?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(ParseError::InvalidJson);
        }

        let mut results = DeclaredDependencies::default();

        match root.child(0) {
            Some(document) if document.kind() == "object" => {
                self.extract_dependencies(document, content, &mut results);
            }
            _ => {
                return Err(ParseError::NotAnObject);
            }
        }

        Ok(results)
    }
}

impl ComposerJsonParser {
    /// Extract `require` and `require-dev` from the root object
    fn extract_dependencies(
        &self,
        object_node: tree_sitter::Node,
        content: &str,
        results: &mut DeclaredDependencies,
    ) {
        let mut cursor = object_node.walk();

        for child in object_node.children(&mut cursor) {
            if child.kind() != "pair" {
                continue;
            }

            let Some(key_node) = child.child_by_field_name("key") else {
                continue;
            };

            let Ok(kind) = self.get_string_value(key_node, content).parse::<DependencyKind>()
            else {
                continue;
            };

            let Some(value_node) = child.child_by_field_name("value") else {
                continue;
            };

            // A repeated section replaces the earlier one, as in any JSON decoder
            *results.set_mut(kind) = DependencySet::new();

            if value_node.kind() == "object" {
                self.extract_links_from_object(value_node, content, kind, results);
            } else {
                warn!("Ignoring '{}': expected an object", kind);
            }
        }
    }

    /// Extract links from a dependency object (e.g., "require": { ... })
    fn extract_links_from_object(
        &self,
        object_node: tree_sitter::Node,
        content: &str,
        kind: DependencyKind,
        results: &mut DeclaredDependencies,
    ) {
        let mut cursor = object_node.walk();

        for child in object_node.children(&mut cursor) {
            if child.kind() != "pair" {
                continue;
            }

            let Some(key_node) = child.child_by_field_name("key") else {
                continue;
            };

            let Some(value_node) = child.child_by_field_name("value") else {
                continue;
            };

            let target = self.get_string_value(key_node, content);

            if value_node.kind() != "string" {
                warn!(
                    "Ignoring {} entry '{}': constraint is not a string",
                    kind, target
                );
                continue;
            }

            let constraint = self.get_string_value(value_node, content);

            // The constraint starts after the opening quote
            let start_point = value_node.start_position();
            let position = Position {
                line: start_point.row,
                column: start_point.column + 1,
            };

            results
                .set_mut(kind)
                .insert(Link::new(target, constraint, kind).with_position(position));
        }
    }

    /// Get the decoded value of a string node
    fn get_string_value(&self, node: tree_sitter::Node, content: &str) -> String {
        let text = content[node.byte_range()].trim();
        // Decode escapes; fall back to stripping the quotes
        serde_json::from_str::<String>(text).unwrap_or_else(|_| {
            text.trim_start_matches('"')
                .trim_end_matches('"')
                .to_string()
        })
    }
}
