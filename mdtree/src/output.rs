//! The rendered output tree.
//!
//! This is what callers bind into their UI layer: elements with a property bag and optional
//! children, and plain strings. It serializes to JSON as-is (see [`crate::formats::json`]).

use crate::props::style::StyleMap;
use crate::tree::SourceSpan;
use serde::Serialize;
use std::collections::BTreeMap;

/// A single output property value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Style(StyleMap),
    Position(SourceSpan),
}

impl PropValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropValue::Number(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::String(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::String(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<usize> for PropValue {
    fn from(value: usize) -> Self {
        PropValue::Number(value as f64)
    }
}

impl From<Option<bool>> for PropValue {
    fn from(value: Option<bool>) -> Self {
        value.map_or(PropValue::Null, PropValue::Bool)
    }
}

/// Output property bag, ordered by name.
pub type Props = BTreeMap<String, PropValue>;

/// An output element.
///
/// `children` is `None` for void elements rendered without content, which is distinct from an
/// element that has an empty child list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputElement {
    pub tag: String,
    pub props: Props,
    pub children: Option<Vec<OutputNode>>,
}

impl OutputElement {
    pub fn prop(&self, name: &str) -> Option<&PropValue> {
        self.props.get(name)
    }

    /// Children, treating `None` as empty.
    pub fn children(&self) -> &[OutputNode] {
        self.children.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OutputNode {
    Element(OutputElement),
    Text(String),
}

impl OutputNode {
    pub fn element(tag: impl Into<String>, props: Props, children: Option<Vec<OutputNode>>) -> Self {
        OutputNode::Element(OutputElement {
            tag: tag.into(),
            props,
            children,
        })
    }

    pub fn as_element(&self) -> Option<&OutputElement> {
        match self {
            OutputNode::Element(element) => Some(element),
            OutputNode::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            OutputNode::Text(text) => Some(text),
            OutputNode::Element(_) => None,
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        match self {
            OutputNode::Text(text) => text.clone(),
            OutputNode::Element(element) => element
                .children()
                .iter()
                .map(OutputNode::text_content)
                .collect(),
        }
    }
}
