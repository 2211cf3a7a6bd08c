//! Treeviz formatter for output trees
//!
//! A visual representation of the rendered tree, meant for inspecting what a document turns
//! into. Each node is one line: connector, icon, label. Text labels are truncated to 30
//! characters.
//!
//! Example:
//!
//!     ⧉ Output (2 nodes)
//!     ├─ § h1
//!     │ └─ ◦ Title
//!     └─ ¶ p
//!       ├─ ◦ Some
//!       └─ 𝐼 em
//!         └─ ◦ text
//!
//! Icons
//!     Headings: §
//!     Paragraph: ¶
//!     Lists: ☰, items: •
//!     Code: ƒ, preformatted: 𝒱
//!     Emphasis: 𝐼, strong: 𝐁
//!     Links: ⊕, images: ▣
//!     Tables: ▦
//!     Text: ◦
//!     Anything else: ○

use crate::error::FormatError;
use crate::format::Format;
use crate::output::{OutputNode, PropValue};
use std::collections::HashMap;

const LABEL_WIDTH: usize = 30;

fn icon(tag: &str) -> &'static str {
    match tag {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => "§",
        "p" => "¶",
        "ul" | "ol" => "☰",
        "li" => "•",
        "code" => "ƒ",
        "pre" => "𝒱",
        "em" => "𝐼",
        "strong" => "𝐁",
        "a" => "⊕",
        "img" => "▣",
        "table" | "thead" | "tbody" | "tr" | "td" | "th" => "▦",
        "blockquote" => "\"",
        "hr" => "⎯",
        _ => "○",
    }
}

fn truncate(text: &str) -> String {
    let escaped = text.replace('\n', "↵");
    if escaped.chars().count() <= LABEL_WIDTH {
        return escaped;
    }
    let mut truncated: String = escaped.chars().take(LABEL_WIDTH - 1).collect();
    truncated.push('…');
    truncated
}

fn format_prop(value: &PropValue) -> String {
    match value {
        PropValue::Null => "null".to_string(),
        PropValue::Bool(flag) => flag.to_string(),
        PropValue::Number(number) => number.to_string(),
        PropValue::String(text) => format!("{text:?}"),
        PropValue::Style(style) => format!("{style:?}"),
        PropValue::Position(span) => span.to_range_string(),
    }
}

fn format_node(
    node: &OutputNode,
    prefix: &str,
    child_index: usize,
    child_count: usize,
    show_props: bool,
) -> String {
    let is_last = child_index == child_count - 1;
    let connector = if is_last { "└─" } else { "├─" };

    match node {
        OutputNode::Text(text) => format!("{prefix}{connector} ◦ {}\n", truncate(text)),
        OutputNode::Element(element) => {
            let mut label = element.tag.clone();
            if show_props {
                for (name, value) in element.props.iter().filter(|(name, _)| *name != "key") {
                    label.push_str(&format!(" {name}={}", format_prop(value)));
                }
            }
            let mut output = format!("{prefix}{connector} {} {label}\n", icon(&element.tag));
            let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
            output.push_str(&format_children(element.children(), &child_prefix, show_props));
            output
        }
    }
}

fn format_children(children: &[OutputNode], prefix: &str, show_props: bool) -> String {
    let child_count = children.len();
    children
        .iter()
        .enumerate()
        .map(|(i, child)| format_node(child, prefix, i, child_count, show_props))
        .collect()
}

pub fn to_treeviz_str(nodes: &[OutputNode]) -> String {
    to_treeviz_str_with_params(nodes, &HashMap::new())
}

/// Convert an output tree to a treeviz string with optional parameters
///
/// # Parameters
///
/// - `"props"`: When set to `"true"`, element lines list their props (except `key`).
pub fn to_treeviz_str_with_params(nodes: &[OutputNode], params: &HashMap<String, String>) -> String {
    let show_props = params
        .get("props")
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false);

    let output = format!("⧉ Output ({} nodes)\n", nodes.len());
    output + &format_children(nodes, "", show_props)
}

/// Format implementation for treeviz format
#[derive(Debug, Default)]
pub struct TreevizFormat;

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree representation with indentation and Unicode icons"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, nodes: &[OutputNode]) -> Result<String, FormatError> {
        Ok(to_treeviz_str(nodes))
    }

    fn serialize_with_options(
        &self,
        nodes: &[OutputNode],
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        Ok(to_treeviz_str_with_params(nodes, options))
    }
}
