//! Definition table and reference resolution.
//!
//! Definitions (`[id]: /url "title"`) can appear anywhere in the tree and are looked up by a
//! normalized identifier. References are rewritten into plain `a`/`img` elements before the
//! filter runs, so every later stage only ever sees ordinary elements.

use super::nodes::{Element, Node, Reference, ReferenceKind, Root, Text};
use std::collections::HashMap;

/// Target of a definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionEntry {
    pub href: String,
    pub title: Option<String>,
}

/// Identifier-keyed lookup of link and image targets.
#[derive(Debug, Clone, Default)]
pub struct DefinitionTable {
    entries: HashMap<String, DefinitionEntry>,
}

/// Collapse inner whitespace, trim and case-fold an identifier.
pub fn normalize_identifier(identifier: &str) -> String {
    identifier
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
        .to_uppercase()
}

impl DefinitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table from every definition node in the tree, in document order.
    pub fn collect(root: &Root) -> Self {
        let mut table = Self::new();
        table.collect_from(&root.children);
        table
    }

    fn collect_from(&mut self, nodes: &[Node]) {
        for node in nodes {
            match node {
                Node::Definition(definition) => {
                    self.insert(
                        &definition.identifier,
                        definition.href.clone(),
                        definition.title.clone(),
                    );
                }
                Node::Element(element) => self.collect_from(&element.children),
                Node::Reference(reference) => self.collect_from(&reference.children),
                Node::Text(_) | Node::Raw(_) => {}
            }
        }
    }

    /// Insert a definition. Returns `false` when the identifier was already defined, in which
    /// case the earlier definition is kept.
    pub fn insert(&mut self, identifier: &str, href: String, title: Option<String>) -> bool {
        let key = normalize_identifier(identifier);
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, DefinitionEntry { href, title });
        true
    }

    pub fn get(&self, identifier: &str) -> Option<&DefinitionEntry> {
        self.entries.get(&normalize_identifier(identifier))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Replace every reference node with the element it points at.
///
/// Undefined references fall back to their literal source text.
pub fn resolve_references(root: &mut Root, table: &DefinitionTable) {
    resolve_children(&mut root.children, table);
}

fn resolve_children(children: &mut Vec<Node>, table: &DefinitionTable) {
    let nodes = std::mem::take(children);
    for node in nodes {
        match node {
            Node::Reference(reference) => resolve_reference(reference, table, children),
            Node::Element(mut element) => {
                resolve_children(&mut element.children, table);
                children.push(Node::Element(element));
            }
            other => children.push(other),
        }
    }
}

fn resolve_reference(mut reference: Reference, table: &DefinitionTable, out: &mut Vec<Node>) {
    resolve_children(&mut reference.children, table);

    let Some(entry) = table.get(&reference.identifier) else {
        log::warn!("undefined reference `{}`", reference.identifier);
        match reference.kind {
            ReferenceKind::Link => {
                out.push(Node::text("["));
                out.append(&mut reference.children);
                out.push(Node::text("]"));
            }
            ReferenceKind::Image => {
                let alt = reference.alt.unwrap_or_default();
                out.push(Node::Text(Text {
                    value: format!("![{alt}]"),
                    position: reference.position,
                }));
            }
        }
        return;
    };

    let mut element = match reference.kind {
        ReferenceKind::Link => Element::new("a")
            .with_attr("href", entry.href.clone())
            .with_children(reference.children),
        ReferenceKind::Image => Element::new("img")
            .with_attr("src", entry.href.clone())
            .with_attr("alt", reference.alt.unwrap_or_default()),
    };
    if let Some(title) = &entry.title {
        element = element.with_attr("title", title.clone());
    }
    out.push(Node::Element(element.with_position(reference.position)));
}
