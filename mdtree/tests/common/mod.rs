//! Shared helpers for walking rendered output.

use mdtree::{ComponentProps, OutputElement, OutputNode, Props};

/// Depth-first pre-order list of every output element.
pub fn elements(nodes: &[OutputNode]) -> Vec<&OutputElement> {
    let mut found = Vec::new();
    collect(nodes, &mut found);
    found
}

fn collect<'a>(nodes: &'a [OutputNode], found: &mut Vec<&'a OutputElement>) {
    for node in nodes {
        if let OutputNode::Element(element) = node {
            found.push(element);
            collect(element.children(), found);
        }
    }
}

/// Every output element with the given tag.
pub fn find_all<'a>(nodes: &'a [OutputNode], tag: &str) -> Vec<&'a OutputElement> {
    elements(nodes)
        .into_iter()
        .filter(|element| element.tag == tag)
        .collect()
}

/// Tags of the top-level output nodes, with `#text` for strings.
pub fn top_level_tags(nodes: &[OutputNode]) -> Vec<String> {
    nodes
        .iter()
        .map(|node| match node {
            OutputNode::Element(element) => element.tag.clone(),
            OutputNode::Text(_) => "#text".to_string(),
        })
        .collect()
}

/// A handler that renders the element as itself, keeping every prop it was given.
pub fn echo(props: ComponentProps<'_>) -> OutputNode {
    OutputNode::element(props.tag, props.props, props.children)
}

pub fn without_key(props: &Props) -> Props {
    let mut props = props.clone();
    props.remove("key");
    props
}

/// `text_content` for a bare element, delegating to [`OutputNode::text_content`].
pub trait ElementText {
    fn text_content(&self) -> String;
}

impl ElementText for OutputElement {
    fn text_content(&self) -> String {
        self.children().iter().map(OutputNode::text_content).collect()
    }
}
