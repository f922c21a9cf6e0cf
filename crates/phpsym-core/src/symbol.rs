//! Symbol data model: one record per PHP class or interface declaration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// PHP namespace separator.
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Kind of declaration a record was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Class,
    Interface,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class => f.write_str("class"),
            Self::Interface => f.write_str("interface"),
        }
    }
}

/// Where a declaration starts. `line` is 1-based, `column` is 0-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
}

/// A `use` import with an optional local rename.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImportAlias {
    pub imported_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl ImportAlias {
    pub fn new(imported_name: impl Into<String>, alias: Option<String>) -> Self {
        Self {
            imported_name: imported_name.into(),
            alias,
        }
    }

    /// The name this import is visible as inside the file.
    pub fn local_name(&self) -> &str {
        self.alias
            .as_deref()
            .unwrap_or_else(|| last_segment(&self.imported_name))
    }
}

/// Normalized facts about one class or interface declaration.
///
/// Records carry no identity across parses: scanning the same file twice
/// yields two independent, structurally equal records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolRecord {
    pub qualified_name: String,
    pub kind: SymbolKind,
    pub location: SourceLocation,
    /// Method names in declaration order. Duplicates are kept.
    pub methods: Vec<String>,
    /// File-wide imports, shared by every record from the same file.
    pub imports: Vec<ImportAlias>,
}

impl SymbolRecord {
    pub fn new(
        qualified_name: impl Into<String>,
        kind: SymbolKind,
        location: SourceLocation,
    ) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            kind,
            location,
            methods: Vec::new(),
            imports: Vec::new(),
        }
    }

    /// Class name without its namespace.
    pub fn short_name(&self) -> &str {
        last_segment(&self.qualified_name)
    }

    /// Namespace part of the qualified name, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.qualified_name
            .rfind(NAMESPACE_SEPARATOR)
            .map(|idx| &self.qualified_name[..idx])
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.iter().any(|m| m == name)
    }

    /// Resolve a type name as written inside this record's file.
    ///
    /// Fully qualified names (`\Foo\Bar`) lose their leading separator. Other
    /// names are matched on their first segment against the imports, then
    /// fall back to this record's namespace.
    pub fn resolve_type(&self, name: &str) -> String {
        if let Some(stripped) = name.strip_prefix(NAMESPACE_SEPARATOR) {
            return stripped.to_string();
        }

        let (head, rest) = match name.split_once(NAMESPACE_SEPARATOR) {
            Some((head, rest)) => (head, Some(rest)),
            None => (name, None),
        };

        if let Some(import) = self.imports.iter().find(|i| i.local_name() == head) {
            return match rest {
                Some(rest) => format!("{}{}{}", import.imported_name, NAMESPACE_SEPARATOR, rest),
                None => import.imported_name.clone(),
            };
        }

        match self.namespace() {
            Some(ns) => format!("{}{}{}", ns, NAMESPACE_SEPARATOR, name),
            None => name.to_string(),
        }
    }
}

/// Join a namespace and a local name with the PHP separator.
pub fn qualify(namespace: Option<&str>, local: &str) -> String {
    match namespace {
        Some(ns) if !ns.is_empty() => format!("{}{}{}", ns, NAMESPACE_SEPARATOR, local),
        _ => local.to_string(),
    }
}

fn last_segment(name: &str) -> &str {
    name.rsplit(NAMESPACE_SEPARATOR).next().unwrap_or(name)
}

/// The Symfony major version detected for a project and the manifest it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionFact {
    pub major_version: u64,
    pub source: PathBuf,
}
