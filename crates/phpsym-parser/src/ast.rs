//! Owned, flattened view of a PHP syntax tree.
//!
//! Tree-sitter nodes borrow the tree and the source; hydration instead works
//! on this small owned model so the work-list can be replaced mid-traversal.

use tree_sitter::Node as TsNode;

/// A declared or imported name, possibly carrying a local rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Name {
    Plain(String),
    Aliased { name: String, alias: String },
}

impl Name {
    /// The name itself, ignoring any alias.
    pub fn as_plain(&self) -> &str {
        match self {
            Self::Plain(name) | Self::Aliased { name, .. } => name,
        }
    }

    pub fn alias(&self) -> Option<&str> {
        match self {
            Self::Plain(_) => None,
            Self::Aliased { alias, .. } => Some(alias),
        }
    }
}

/// Start of a declaration: 1-based line, 0-based column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// `namespace X;` (covering the following siblings) or `namespace X { ... }`.
    Namespace {
        name: Option<Name>,
        children: Vec<Node>,
    },
    /// One `use` statement; group items already carry their prefix.
    UseGroup { items: Vec<Name> },
    Class {
        name: Name,
        body: Vec<Node>,
        position: Position,
    },
    Interface {
        name: Name,
        body: Vec<Node>,
        position: Position,
    },
    Method { name: Name },
    Other { kind: &'static str },
}

/// Lower a parsed `program` node into its top-level declaration list.
pub fn lower_program(root: &TsNode, source: &str) -> Vec<Node> {
    lower_statements(root, source)
}

fn lower_statements(parent: &TsNode, source: &str) -> Vec<Node> {
    let mut lowered = Vec::new();
    // An unbraced namespace absorbs every sibling up to the next namespace.
    let mut open: Option<(Option<Name>, Vec<Node>)> = None;

    let mut cursor = parent.walk();
    for child in parent.named_children(&mut cursor) {
        if child.kind() == "namespace_definition" {
            if let Some((name, children)) = open.take() {
                lowered.push(Node::Namespace { name, children });
            }
            let name = child
                .child_by_field_name("name")
                .map(|n| Name::Plain(clean_name(text(&n, source))));
            match child.child_by_field_name("body") {
                Some(body) => lowered.push(Node::Namespace {
                    name,
                    children: lower_statements(&body, source),
                }),
                None => open = Some((name, Vec::new())),
            }
            continue;
        }

        let node = lower_statement(&child, source);
        match open.as_mut() {
            Some((_, children)) => children.push(node),
            None => lowered.push(node),
        }
    }

    if let Some((name, children)) = open {
        lowered.push(Node::Namespace { name, children });
    }
    lowered
}

fn lower_statement(node: &TsNode, source: &str) -> Node {
    match node.kind() {
        "namespace_use_declaration" => Node::UseGroup {
            items: lower_use_declaration(node, source),
        },
        "class_declaration" | "interface_declaration" => {
            let Some(name_node) = node.child_by_field_name("name") else {
                return Node::Other { kind: node.kind() };
            };
            let name = Name::Plain(text(&name_node, source).to_string());
            let body = node
                .child_by_field_name("body")
                .map(|b| lower_members(&b, source))
                .unwrap_or_default();
            let start = declaration_start(node);
            let position = Position {
                line: start.row + 1,
                column: start.column,
            };
            if node.kind() == "class_declaration" {
                Node::Class {
                    name,
                    body,
                    position,
                }
            } else {
                Node::Interface {
                    name,
                    body,
                    position,
                }
            }
        }
        kind => Node::Other { kind },
    }
}

/// Start of a declaration, past any leading `#[...]` attribute groups.
fn declaration_start(node: &TsNode) -> tree_sitter::Point {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .find(|c| !matches!(c.kind(), "attribute_list" | "comment"))
        .map_or_else(|| node.start_position(), |c| c.start_position())
}

fn lower_members(body: &TsNode, source: &str) -> Vec<Node> {
    let mut cursor = body.walk();
    body.named_children(&mut cursor)
        .map(|member| match member.kind() {
            "method_declaration" => match member.child_by_field_name("name") {
                Some(name) => Node::Method {
                    name: Name::Plain(text(&name, source).to_string()),
                },
                None => Node::Other {
                    kind: member.kind(),
                },
            },
            kind => Node::Other { kind },
        })
        .collect()
}

// use A\B;  use A\B as C, D;  use A\{B, C as D};  use function A\f;
fn lower_use_declaration(node: &TsNode, source: &str) -> Vec<Name> {
    let mut items = Vec::new();
    let mut prefix: Option<String> = None;

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "namespace_name" => prefix = Some(clean_name(text(&child, source))),
            "namespace_use_clause" => items.extend(lower_use_clause(&child, source, None)),
            "namespace_use_group" => {
                let mut group_cursor = child.walk();
                for clause in child.named_children(&mut group_cursor) {
                    if matches!(
                        clause.kind(),
                        "namespace_use_clause" | "namespace_use_group_clause"
                    ) {
                        items.extend(lower_use_clause(&clause, source, prefix.as_deref()));
                    }
                }
            }
            _ => {}
        }
    }
    items
}

fn lower_use_clause(clause: &TsNode, source: &str, prefix: Option<&str>) -> Option<Name> {
    let alias_node = clause.child_by_field_name("alias").or_else(|| {
        let mut cursor = clause.walk();
        clause
            .named_children(&mut cursor)
            .find(|c| c.kind() == "namespace_aliasing_clause")
            .and_then(|c| c.named_child(0))
    });

    let mut cursor = clause.walk();
    let imported = clause.named_children(&mut cursor).find(|c| {
        matches!(c.kind(), "name" | "qualified_name" | "namespace_name")
            && alias_node.is_none_or(|a| a.id() != c.id())
    })?;

    let imported = clean_name(text(&imported, source));
    let name = match prefix {
        Some(prefix) => format!("{}\\{}", prefix, imported),
        None => imported,
    };

    Some(match alias_node {
        Some(alias) => Name::Aliased {
            name,
            alias: text(&alias, source).to_string(),
        },
        None => Name::Plain(name),
    })
}

fn text<'a>(node: &TsNode, source: &'a str) -> &'a str {
    &source[node.byte_range()]
}

fn clean_name(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<String>()
        .trim_start_matches('\\')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::treesitter::parse_file;
    use std::path::Path;

    fn lower(source: &str) -> Vec<Node> {
        let tree = parse_file(Path::new("test.php"), source.as_bytes()).unwrap();
        lower_program(&tree.root_node(), source)
    }

    fn namespaces(nodes: &[Node]) -> Vec<Option<&str>> {
        nodes
            .iter()
            .filter_map(|n| match n {
                Node::Namespace { name, .. } => Some(name.as_ref().map(Name::as_plain)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_name_variants() {
        let plain = Name::Plain("Foo".to_string());
        let aliased = Name::Aliased {
            name: "Foo\\Bar".to_string(),
            alias: "Baz".to_string(),
        };
        assert_eq!(plain.as_plain(), "Foo");
        assert_eq!(plain.alias(), None);
        assert_eq!(aliased.as_plain(), "Foo\\Bar");
        assert_eq!(aliased.alias(), Some("Baz"));
    }

    #[test]
    fn test_unbraced_namespace_absorbs_following_siblings() {
        let nodes = lower("<?php\nnamespace App;\nuse Foo\\Bar;\nclass A {}\n");
        let ns = nodes
            .iter()
            .find_map(|n| match n {
                Node::Namespace { children, .. } => Some(children),
                _ => None,
            })
            .unwrap();
        assert!(ns.iter().any(|n| matches!(n, Node::UseGroup { .. })));
        assert!(ns.iter().any(|n| matches!(n, Node::Class { .. })));
        assert!(!nodes.iter().any(|n| matches!(n, Node::Class { .. })));
    }

    #[test]
    fn test_second_unbraced_namespace_is_a_sibling() {
        let nodes = lower("<?php\nnamespace A;\nclass X {}\nnamespace B;\nclass Y {}\n");
        assert_eq!(namespaces(&nodes), vec![Some("A"), Some("B")]);
    }

    #[test]
    fn test_braced_global_namespace_has_no_name() {
        let nodes = lower("<?php\nnamespace {\nclass X {}\n}\n");
        assert_eq!(namespaces(&nodes), vec![None]);
    }

    #[test]
    fn test_use_group_prefix_and_alias() {
        let nodes = lower("<?php\nuse Symfony\\Component\\{Console\\Command, Yaml\\Yaml as Y};\n");
        let items = nodes
            .iter()
            .find_map(|n| match n {
                Node::UseGroup { items } => Some(items.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(
            items,
            vec![
                Name::Plain("Symfony\\Component\\Console\\Command".to_string()),
                Name::Aliased {
                    name: "Symfony\\Component\\Yaml\\Yaml".to_string(),
                    alias: "Y".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_method_members_are_lowered() {
        let nodes = lower("<?php\nclass A { const X = 1; public function run() {} private $y; }\n");
        let Some(Node::Class { body, .. }) = nodes.iter().find(|n| matches!(n, Node::Class { .. }))
        else {
            panic!("class not lowered");
        };
        let methods: Vec<&str> = body
            .iter()
            .filter_map(|n| match n {
                Node::Method { name } => Some(name.as_plain()),
                _ => None,
            })
            .collect();
        assert_eq!(methods, vec!["run"]);
        assert_eq!(body.len(), 3);
    }
}
