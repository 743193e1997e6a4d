//! Tree-sitter parsing for the grammar-based extractors
//!
//! Scans are single-threaded, so each parse builds its own `Parser` and hands
//! back the tree together with the source it was built from.

use anyhow::Result;
use tree_sitter::{Language, Parser, Tree};

/// Grammars available to the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    Python,
}

impl Grammar {
    /// Get the tree-sitter language for this grammar
    pub fn get_language(&self) -> Language {
        match self {
            Grammar::Python => tree_sitter_python::LANGUAGE.into(),
        }
    }
}

/// Result of a parsing operation
#[derive(Debug)]
pub struct ParseResult {
    pub tree: Tree,
    pub content: String,
}

impl ParseResult {
    pub fn source(&self) -> &[u8] {
        self.content.as_bytes()
    }

    /// Whether the tree contains `ERROR` or `MISSING` nodes.
    pub fn has_syntax_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }
}

/// Parse `content` with the given grammar.
pub fn parse(grammar: Grammar, content: String) -> Result<ParseResult> {
    let mut parser = Parser::new();
    parser
        .set_language(&grammar.get_language())
        .map_err(|e| anyhow::anyhow!("Failed to set language: {}", e))?;

    let tree = parser
        .parse(&content, None)
        .ok_or_else(|| anyhow::anyhow!("Failed to parse content"))?;

    Ok(ParseResult { tree, content })
}
