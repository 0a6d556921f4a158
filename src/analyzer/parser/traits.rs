use tree_sitter::Node;

use super::module::ParsedModule;
use crate::types::{DocError, Result};

/// Turns one source file into its top-level namespace.
pub trait ModuleParser: Send + Sync {
    fn parse(&self, path: &str, content: &str) -> Result<ParsedModule>;
}

/// Extract text content from a tree-sitter node.
/// Returns empty string if extraction fails (with debug logging).
#[inline]
pub fn get_node_text<'a>(node: Node<'_>, content: &'a [u8]) -> &'a str {
    node.utf8_text(content).unwrap_or_else(|e| {
        tracing::debug!(
            "UTF-8 extraction failed at {}:{}-{}:{}: {}",
            node.start_position().row + 1,
            node.start_position().column,
            node.end_position().row + 1,
            node.end_position().column,
            e
        );
        ""
    })
}

/// 1-based start line of a node.
#[inline]
pub fn start_line(node: Node<'_>) -> u32 {
    node.start_position().row as u32 + 1
}

/// Extract position information from a tree-sitter node.
pub fn get_node_position(node: Node<'_>) -> (u32, u32, u32, u32) {
    let start = node.start_position();
    let end = node.end_position();
    (
        start.row as u32 + 1,
        end.row as u32 + 1,
        start.column as u32,
        end.column as u32,
    )
}

/// Collect the named children of a node.
pub fn named_children<'tree>(node: Node<'tree>) -> Vec<Node<'tree>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

/// First node in the subtree that is a syntax error or a missing token.
pub fn first_error_node<'tree>(node: Node<'tree>) -> Option<Node<'tree>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'tree>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error_node)
}

/// Create a tree-sitter parser for the given language.
pub fn create_ts_parser<L: Into<tree_sitter::Language>>(
    language: L,
    lang_name: &str,
) -> Result<tree_sitter::Parser> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&language.into())
        .map_err(|e| DocError::Parse {
            message: format!("Failed to set {} language: {}", lang_name, e),
            path: String::new(),
        })?;
    Ok(parser)
}
