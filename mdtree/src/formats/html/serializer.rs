//! HTML serialization (output tree → HTML)
//!
//! Pipeline: output tree → RcDom → HTML string
//!
//! Props are mapped back to attribute names with the same schema the property mapper uses.
//! Style maps are written back as declaration lists, `true` becomes an empty attribute and
//! `false`, null, position objects and the `key` prop are left out.

use crate::error::FormatError;
use crate::output::{OutputNode, PropValue, Props};
use crate::props::schema::{attribute_name, Space};
use crate::props::style::serialize_style;
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::default::Default;
use std::rc::Rc;

/// Options for HTML serialization
#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    /// Wrap the fragment in a complete document.
    pub standalone: bool,
    /// Document title, used when `standalone` is set.
    pub title: Option<String>,
}

/// Serialize an output tree to an HTML fragment.
pub fn serialize_to_html(nodes: &[OutputNode]) -> Result<String, FormatError> {
    serialize_to_html_with_options(nodes, &HtmlOptions::default())
}

/// Serialize an output tree to HTML with full options
pub fn serialize_to_html_with_options(
    nodes: &[OutputNode],
    options: &HtmlOptions,
) -> Result<String, FormatError> {
    let mut fragment = String::new();
    for node in nodes {
        let handle = build_node(node, Space::Html);
        fragment.push_str(&serialize_handle(&handle)?);
    }

    if options.standalone {
        let title = options.title.as_deref().unwrap_or("Document");
        Ok(wrap_in_document(&fragment, title))
    } else {
        Ok(fragment)
    }
}

fn build_node(node: &OutputNode, space: Space) -> Handle {
    match node {
        OutputNode::Text(text) => create_text(text),
        OutputNode::Element(element) => {
            let space = if element.tag == "svg" { Space::Svg } else { space };
            let handle = create_element(&element.tag, attributes(&element.props, space));
            for child in element.children() {
                let child = build_node(child, space);
                child.parent.set(Some(Rc::downgrade(&handle)));
                handle.children.borrow_mut().push(child);
            }
            handle
        }
    }
}

fn attributes(props: &Props, space: Space) -> Vec<(String, String)> {
    props
        .iter()
        .filter(|(name, _)| name.as_str() != "key")
        .filter_map(|(name, value)| {
            let value = match value {
                PropValue::String(text) => text.clone(),
                PropValue::Number(number) => format_number(*number),
                PropValue::Bool(true) => String::new(),
                PropValue::Style(style) if !style.is_empty() => serialize_style(style),
                PropValue::Bool(false)
                | PropValue::Null
                | PropValue::Style(_)
                | PropValue::Position(_) => return None,
            };
            Some((attribute_name(space, name), value))
        })
        .collect()
}

fn format_number(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{}", number as i64)
    } else {
        number.to_string()
    }
}

/// Create an HTML element with attributes
fn create_element(tag: &str, attrs: Vec<(String, String)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name.as_str())),
            value: value.into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

fn serialize_handle(handle: &Handle) -> Result<String, FormatError> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    let serializable = SerializableHandle::from(handle.clone());
    serialize(&mut output, &serializable, opts).map_err(|e| {
        FormatError::SerializationError(format!("HTML serialization failed: {e}"))
    })?;

    String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}

fn wrap_in_document(body_html: &str, title: &str) -> String {
    let escaped_title = html_escape(title);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta name="generator" content="mdtree">
  <title>{escaped_title}</title>
</head>
<body>
{body_html}
</body>
</html>"#
    )
}

/// Escape HTML special characters in text
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
