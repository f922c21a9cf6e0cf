//! Tree-sitter integration for PHP parsing.

use anyhow::{Context, Result};
use std::path::Path;

/// The PHP grammar (PHP with leading HTML/text allowed).
pub fn php_language() -> tree_sitter::Language {
    tree_sitter_php::LANGUAGE_PHP.into()
}

/// Parse a PHP source file and return the tree-sitter tree.
///
/// The tree may still contain ERROR nodes; callers decide whether that counts
/// as a failed parse.
pub fn parse_file(path: &Path, source: &[u8]) -> Result<tree_sitter::Tree> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&php_language())
        .context("failed to set tree-sitter language")?;
    parser
        .parse(source, None)
        .ok_or_else(|| anyhow::anyhow!("failed to parse {}", path.display()))
}
