//! Structural annotations.
//!
//! Custom handlers get metadata the element itself does not carry but that depends on where it
//! sits in the tree: heading level, whether `code` is inline, list nesting depth, task item
//! state, position among siblings and table header-ness.
//!
//!     | tag      | props                          |
//!     |----------|--------------------------------|
//!     | h1..h6   | level                          |
//!     | code     | inline, or value under `pre`   |
//!     | li       | checked, index, ordered        |
//!     | ol, ul   | ordered, depth                 |
//!     | td, th   | isHeader                       |
//!     | tr       | isHeader (parent is `thead`)   |
//!
//! Cell alignment and the `key` prop are applied to every element, passthrough included.

use crate::output::{PropValue, Props};
use crate::tree::{AttrValue, Element, Node, SourceSpan};

/// Where an element sits while it is being translated.
#[derive(Debug, Clone, Copy)]
pub struct Placement<'a> {
    pub parent: Option<&'a Element>,
    pub siblings: &'a [Node],
    pub index: usize,
    /// Number of `ol`/`ul` elements enclosing this element, itself included.
    pub list_depth: usize,
}

impl Placement<'_> {
    fn parent_is(&self, tag: &str) -> bool {
        self.parent.is_some_and(|parent| parent.is(tag))
    }

    /// Element siblings before this one; text between them does not count.
    fn element_index(&self) -> usize {
        self.siblings[..self.index]
            .iter()
            .filter(|node| matches!(node, Node::Element(_)))
            .count()
    }
}

/// Text of an element whose children are all text, the raw `value` of a block leaf.
fn leaf_text(element: &Element) -> Option<String> {
    element
        .children
        .iter()
        .all(|child| matches!(child, Node::Text(_)))
        .then(|| element.text_content())
}

/// Add the structural props custom handlers receive.
pub fn annotate(element: &Element, placement: &Placement<'_>, props: &mut Props) {
    match element.tag.as_str() {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            if let Ok(level) = element.tag[1..].parse::<usize>() {
                props.insert("level".into(), level.into());
            }
        }
        "code" => {
            if !placement.parent_is("pre") {
                props.insert("inline".into(), true.into());
            } else if let Some(value) = leaf_text(element) {
                props.entry("value".into()).or_insert_with(|| value.into());
            }
        }
        "li" => {
            props.insert("checked".into(), task_state(element).into());
            props.insert("index".into(), placement.element_index().into());
            props.insert("ordered".into(), placement.parent_is("ol").into());
        }
        "ol" | "ul" => {
            props.insert("ordered".into(), element.is("ol").into());
            props.insert("depth".into(), placement.list_depth.into());
        }
        "td" | "th" => {
            props.insert("isHeader".into(), element.is("th").into());
        }
        "tr" => {
            props.insert("isHeader".into(), placement.parent_is("thead").into());
        }
        _ => {}
    }
}

/// Move a table cell's `align` into `style.textAlign`.
pub fn align_cell(element: &Element, props: &mut Props) {
    if !(element.is("td") || element.is("th")) {
        return;
    }
    let Some(PropValue::String(align)) = props.remove("align") else {
        return;
    };
    match props
        .entry("style".to_string())
        .or_insert_with(|| PropValue::Style(Default::default()))
    {
        PropValue::Style(style) => {
            style.insert("textAlign".into(), align);
        }
        other => {
            let mut style = crate::props::style::StyleMap::new();
            style.insert("textAlign".into(), align);
            *other = PropValue::Style(style);
        }
    }
}

/// `tag-line-column-index`; unknown coordinates render empty.
pub fn element_key(tag: &str, position: Option<SourceSpan>, index: usize) -> String {
    let start = position.map(|span| span.start);
    let line = start.and_then(|point| point.line);
    let column = start.and_then(|point| point.column);
    format!(
        "{tag}-{}-{}-{index}",
        line.map(|line| line.to_string()).unwrap_or_default(),
        column.map(|column| column.to_string()).unwrap_or_default()
    )
}

/// Checked state of the first checkbox inside a list item, not looking into nested lists.
fn task_state(item: &Element) -> Option<bool> {
    find_checkbox(&item.children).map(|input| match input.attr("checked") {
        None | Some(AttrValue::Null) => false,
        Some(AttrValue::Bool(checked)) => *checked,
        Some(_) => true,
    })
}

fn find_checkbox(nodes: &[Node]) -> Option<&Element> {
    nodes.iter().find_map(|node| {
        let element = node.as_element()?;
        if element.is("input") {
            let is_checkbox = element
                .attr("type")
                .and_then(AttrValue::as_str)
                .is_some_and(|kind| kind.eq_ignore_ascii_case("checkbox"));
            return is_checkbox.then_some(element);
        }
        if element.is("ul") || element.is("ol") {
            return None;
        }
        find_checkbox(&element.children)
    })
}
