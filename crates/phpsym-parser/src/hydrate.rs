//! Hydration: turn a lowered declaration list into symbol records.

use crate::ast::{Name, Node, Position};
use phpsym_core::symbol::{ImportAlias, SourceLocation, SymbolKind, SymbolRecord, qualify};
use std::collections::VecDeque;
use std::path::Path;

/// Traversal state for one file. Never shared between calls.
#[derive(Default)]
struct HydrationState {
    namespace: Option<String>,
    imports: Vec<ImportAlias>,
    records: Vec<SymbolRecord>,
}

/// Walk the top-level nodes of one file and build its records.
///
/// Entering a namespace replaces the pending work-list with the namespace's
/// children, so any namespace that follows the first one in the same file is
/// never visited. Imports are collected file-wide and attached to every record.
pub fn hydrate(path: &Path, nodes: Vec<Node>) -> Vec<SymbolRecord> {
    let mut state = HydrationState::default();
    let mut pending: VecDeque<Node> = nodes.into();

    while let Some(node) = pending.pop_front() {
        match node {
            Node::Namespace { name, children } => {
                state.namespace = name.map(|n| n.as_plain().to_string());
                pending = children.into();
            }
            Node::UseGroup { items } => {
                state.imports.extend(items.into_iter().map(import_alias));
            }
            Node::Class {
                name,
                body,
                position,
            } => {
                let record = build_record(path, &state, SymbolKind::Class, &name, &body, position);
                state.records.push(record);
            }
            Node::Interface {
                name,
                body,
                position,
            } => {
                let record =
                    build_record(path, &state, SymbolKind::Interface, &name, &body, position);
                state.records.push(record);
            }
            Node::Method { .. } | Node::Other { .. } => {}
        }
    }

    let HydrationState {
        imports,
        mut records,
        ..
    } = state;
    for record in &mut records {
        record.imports.clone_from(&imports);
    }
    records
}

fn build_record(
    path: &Path,
    state: &HydrationState,
    kind: SymbolKind,
    name: &Name,
    body: &[Node],
    position: Position,
) -> SymbolRecord {
    let qualified_name = qualify(state.namespace.as_deref(), name.as_plain());
    let mut record = SymbolRecord::new(
        qualified_name,
        kind,
        SourceLocation {
            file: path.to_path_buf(),
            line: position.line,
            column: position.column,
        },
    );
    record.methods = body
        .iter()
        .filter_map(|member| match member {
            Node::Method { name } => Some(name.as_plain().to_string()),
            _ => None,
        })
        .collect();
    record
}

fn import_alias(name: Name) -> ImportAlias {
    match name {
        Name::Plain(name) => ImportAlias::new(name, None),
        Name::Aliased { name, alias } => ImportAlias::new(name, Some(alias)),
    }
}
