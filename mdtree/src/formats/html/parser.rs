//! HTML parsing (HTML → element tree)
//!
//! Used for trusted raw markup and for rendering HTML input directly.
//! Pipeline: HTML string → html5ever → RcDom → element tree
//!
//! Comments, doctypes and processing instructions are dropped. Nothing else is special-cased:
//! `script`, `style` and friends become ordinary elements for the filter and schema to deal with.

use crate::tree::{AttrValue, Element, Node, Root};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Parse an HTML fragment into element tree nodes.
///
/// The fragment is parsed as the content of `<body>`, so head-only elements such as `title` or
/// `meta` stay where they were written instead of being hoisted.
pub fn parse_fragment(source: &str) -> Vec<Node> {
    let wrapped = format!("<!DOCTYPE html><html><head></head><body>{source}</body></html>");
    let dom = parse_document(RcDom::default(), Default::default()).one(wrapped.as_str());

    match find_body(&dom.document) {
        Some(body) => convert_children(&body),
        None => Vec::new(),
    }
}

/// Parse an HTML string into an element tree rooted at its body content.
pub fn parse_html(source: &str) -> Root {
    Root::new(parse_fragment(source))
}

/// Replace every raw node in the tree with its parsed content.
///
/// Each raw node is parsed on its own, so a tag opened in one raw node is never closed by
/// another: `<b>` and `</b>` around markdown text yield an empty `b` element and text.
pub fn expand_raw(root: &mut Root) {
    expand_children(&mut root.children);
}

fn expand_children(children: &mut Vec<Node>) {
    let nodes = std::mem::take(children);
    for node in nodes {
        match node {
            Node::Raw(raw) => {
                let parsed = parse_fragment(&raw.value);
                log::debug!(
                    "expanded raw fragment ({} bytes) into {} nodes",
                    raw.value.len(),
                    parsed.len()
                );
                children.extend(parsed);
            }
            Node::Element(mut element) => {
                expand_children(&mut element.children);
                children.push(Node::Element(element));
            }
            other => children.push(other),
        }
    }
}

fn find_body(handle: &Handle) -> Option<Handle> {
    if let NodeData::Element { name, .. } = &handle.data {
        if &*name.local == "body" {
            return Some(handle.clone());
        }
    }
    handle.children.borrow().iter().find_map(find_body)
}

fn convert_children(handle: &Handle) -> Vec<Node> {
    handle
        .children
        .borrow()
        .iter()
        .filter_map(convert_node)
        .collect()
}

fn convert_node(handle: &Handle) -> Option<Node> {
    match &handle.data {
        NodeData::Text { contents } => Some(Node::text(contents.borrow().to_string())),
        NodeData::Element { name, attrs, .. } => {
            let mut element = Element::new(name.local.to_ascii_lowercase().to_string());
            for attribute in attrs.borrow().iter() {
                let attribute_name = match &attribute.name.prefix {
                    Some(prefix) => format!("{prefix}:{}", attribute.name.local),
                    None => attribute.name.local.to_string(),
                };
                element
                    .attributes
                    .insert(attribute_name, AttrValue::String(attribute.value.to_string()));
            }
            element.children = convert_children(handle);
            Some(Node::Element(element))
        }
        NodeData::Document
        | NodeData::Doctype { .. }
        | NodeData::Comment { .. }
        | NodeData::ProcessingInstruction { .. } => None,
    }
}
