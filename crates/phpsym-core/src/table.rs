//! In-memory symbol table, grouped per source file.
//!
//! Consumers treat the table as a refresh-replace feed: a file's records are
//! always swapped wholesale, never patched.

use crate::symbol::SymbolRecord;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    by_file: BTreeMap<PathBuf, Vec<SymbolRecord>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a flat record list.
    pub fn from_records(records: Vec<SymbolRecord>) -> Self {
        let mut table = Self::new();
        table.replace_all(records);
        table
    }

    /// Drop every record and regroup `records` by file.
    pub fn replace_all(&mut self, records: Vec<SymbolRecord>) {
        self.by_file.clear();
        for record in records {
            self.by_file
                .entry(record.location.file.clone())
                .or_default()
                .push(record);
        }
    }

    /// Replace one file's records. An empty list removes the file.
    pub fn replace_file(&mut self, file: &Path, records: Vec<SymbolRecord>) {
        if records.is_empty() {
            self.by_file.remove(file);
        } else {
            self.by_file.insert(file.to_path_buf(), records);
        }
    }

    pub fn remove_file(&mut self, file: &Path) -> Option<Vec<SymbolRecord>> {
        self.by_file.remove(file)
    }

    /// First record with the given qualified name (files in path order).
    pub fn get(&self, qualified_name: &str) -> Option<&SymbolRecord> {
        let name = qualified_name.trim_start_matches('\\');
        self.iter().find(|r| r.qualified_name == name)
    }

    pub fn find_by_short_name<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a SymbolRecord> {
        self.iter().filter(move |r| r.short_name() == name)
    }

    pub fn records_in(&self, file: &Path) -> &[SymbolRecord] {
        self.by_file
            .get(file)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymbolRecord> {
        self.by_file.values().flatten()
    }

    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.by_file.keys().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.by_file.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_file.is_empty()
    }

    /// All records as one flat list, files in path order.
    pub fn to_records(&self) -> Vec<SymbolRecord> {
        self.iter().cloned().collect()
    }
}
