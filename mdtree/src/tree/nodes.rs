//! Core data structures for the element tree.
//!
//! The element tree is the HTML-equivalent intermediate representation that sits between the
//! markdown syntax tree and the rendered output tree. It is produced by
//! [`crate::formats::markdown`] (or built by hand), pruned by [`crate::filter`] and walked once by
//! the translator.

use serde::Serialize;
use std::collections::BTreeMap;

/// A point in the source document.
///
/// Lines and columns are 1-indexed, offsets are 0-indexed. Any coordinate may be unknown, which
/// happens for nodes synthesized by upstream tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Point {
    pub line: Option<usize>,
    pub column: Option<usize>,
    pub offset: Option<usize>,
}

impl Point {
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            line: Some(line),
            column: Some(column),
            offset: None,
        }
    }
}

/// A source range, used for diagnostics and props only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SourceSpan {
    pub start: Point,
    pub end: Point,
}

impl SourceSpan {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Serialize as `line:column-line:column`. Unknown coordinates render as `1`.
    pub fn to_range_string(&self) -> String {
        fn coord(value: Option<usize>) -> usize {
            value.unwrap_or(1)
        }
        format!(
            "{}:{}-{}:{}",
            coord(self.start.line),
            coord(self.start.column),
            coord(self.end.line),
            coord(self.end.column)
        )
    }
}

/// An attribute value on an element node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// Joined with spaces or commas on output, depending on the attribute.
    List(Vec<String>),
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::String(value) => Some(value),
            _ => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::String(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::String(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Number(value)
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(value: Vec<String>) -> Self {
        AttrValue::List(value)
    }
}

/// A tagged element with attributes and ordered children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub tag: String,
    pub attributes: BTreeMap<String, AttrValue>,
    pub children: Vec<Node>,
    pub position: Option<SourceSpan>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
            position: None,
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn with_position(mut self, position: Option<SourceSpan>) -> Self {
        self.position = position;
        self
    }

    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }

    /// Concatenated text of every descendant text node.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        collect_text(&self.children, &mut text);
        text
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(&text.value),
            Node::Element(element) => collect_text(&element.children, out),
            Node::Reference(reference) => collect_text(&reference.children, out),
            Node::Raw(_) | Node::Definition(_) => {}
        }
    }
}

/// A text leaf.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    pub value: String,
    pub position: Option<SourceSpan>,
}

impl Text {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            position: None,
        }
    }
}

/// A verbatim markup fragment embedded in the source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Raw {
    pub value: String,
    pub position: Option<SourceSpan>,
}

impl Raw {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            position: None,
        }
    }
}

/// A deferred link target declared somewhere in the document (`[id]: href "title"`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Definition {
    pub identifier: String,
    pub href: String,
    pub title: Option<String>,
    pub position: Option<SourceSpan>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    Link,
    Image,
}

/// A link or image that points at a [`Definition`] by identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reference {
    pub kind: ReferenceKind,
    pub identifier: String,
    /// Image alternative text; unused for links.
    pub alt: Option<String>,
    pub children: Vec<Node>,
    pub position: Option<SourceSpan>,
}

/// Any node of the element tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Element(Element),
    Text(Text),
    Raw(Raw),
    Definition(Definition),
    Reference(Reference),
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(Text::new(value))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn position(&self) -> Option<SourceSpan> {
        match self {
            Node::Element(element) => element.position,
            Node::Text(text) => text.position,
            Node::Raw(raw) => raw.position,
            Node::Definition(definition) => definition.position,
            Node::Reference(reference) => reference.position,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

impl From<Raw> for Node {
    fn from(raw: Raw) -> Self {
        Node::Raw(raw)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::text(value)
    }
}

/// The document root. Its own tag and attributes are never rendered.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Root {
    pub children: Vec<Node>,
    pub position: Option<SourceSpan>,
}

impl Root {
    pub fn new(children: Vec<Node>) -> Self {
        Self {
            children,
            position: None,
        }
    }
}
