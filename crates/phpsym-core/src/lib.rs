//! Core types for the phpsym symbol index.
//!
//! Provides the symbol data model ([`symbol::SymbolRecord`]), the per-file
//! [`table::SymbolTable`], project configuration, and the JSON export format.

pub mod config;
pub mod schema;
pub mod symbol;
pub mod table;
