//! Tree-sitter based PHP parsing for phpsym symbol extraction.
//!
//! Lowers a PHP syntax tree into a flat declaration list ([`ast`]), hydrates
//! symbol records from it ([`hydrate`]), and enumerates source files
//! ([`files`]).

pub mod ast;
pub mod extract;
pub mod files;
pub mod hydrate;
pub mod treesitter;
