//! Per-file symbol extraction.

use crate::ast::lower_program;
use crate::hydrate::hydrate;
use crate::treesitter::parse_file;
use phpsym_core::symbol::SymbolRecord;
use std::path::Path;

/// Extract class and interface records from one PHP source.
///
/// Never fails: a source that does not parse cleanly yields no records at all,
/// not a partial set.
pub fn extract_symbols(path: &Path, source: &str) -> Vec<SymbolRecord> {
    let Ok(tree) = parse_file(path, source.as_bytes()) else {
        return Vec::new();
    };
    let root = tree.root_node();
    if root.has_error() {
        return Vec::new();
    }
    hydrate(path, lower_program(&root, source))
}

/// Same as [`extract_symbols`] for raw file bytes (decoded lossily).
pub fn extract_symbols_from_bytes(path: &Path, bytes: &[u8]) -> Vec<SymbolRecord> {
    extract_symbols(path, &String::from_utf8_lossy(bytes))
}
