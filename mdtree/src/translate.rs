//! Element tree to output tree.
//!
//! A single depth-first walk over the filtered tree. For each element the translator resolves
//! the output primitive, maps attributes to props, rewrites URLs, adds structural annotations
//! and diagnostics, translates the children and finally builds (or asks a handler for) the
//! output node.

use crate::annotate::{align_cell, annotate, element_key, Placement};
use crate::components::{ComponentProps, Resolved};
use crate::error::RenderError;
use crate::options::{Options, RawHtml, UrlContext, UrlTransform};
use crate::output::{OutputNode, PropValue, Props};
use crate::props::schema::svg_element_name;
use crate::props::{map_properties, Space};
use crate::tree::{Element, Node, Root};

/// Elements that never have content. Rendered with `children: None` when they have none.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose whitespace-only text children are insignificant.
const TABLE_ELEMENTS: &[&str] = &["table", "thead", "tbody", "tfoot", "tr"];

/// State inherited from ancestors, passed by value so siblings never see each other's changes.
#[derive(Debug, Clone, Copy, Default)]
struct Context {
    space: Space,
    list_depth: usize,
}

pub struct Translator<'a> {
    options: &'a Options,
}

impl<'a> Translator<'a> {
    pub fn new(options: &'a Options) -> Self {
        Self { options }
    }

    /// Translate the root's children, wrapping them in a `div` when a class name is configured.
    pub fn translate(&self, root: &Root) -> Result<Vec<OutputNode>, RenderError> {
        let children = self.translate_children(&root.children, None, Context::default())?;
        match &self.options.class_name {
            Some(class_name) => {
                let mut props = Props::new();
                props.insert("className".into(), class_name.clone().into());
                Ok(vec![OutputNode::element("div", props, Some(children))])
            }
            None => Ok(children),
        }
    }

    fn translate_children(
        &self,
        nodes: &[Node],
        parent: Option<&Element>,
        context: Context,
    ) -> Result<Vec<OutputNode>, RenderError> {
        let in_table = parent.is_some_and(|parent| TABLE_ELEMENTS.contains(&parent.tag.as_str()));
        let mut out = Vec::with_capacity(nodes.len());

        for (index, node) in nodes.iter().enumerate() {
            match node {
                Node::Text(text) => {
                    if in_table && text.value.trim().is_empty() {
                        continue;
                    }
                    out.push(OutputNode::Text(text.value.clone()));
                }
                Node::Raw(raw) => match self.options.raw_html {
                    RawHtml::Escape => out.push(OutputNode::Text(raw.value.clone())),
                    // Trusted markup was expanded into elements before filtering.
                    RawHtml::Skip | RawHtml::Trust => {}
                },
                Node::Element(element) => {
                    let placement = Placement {
                        parent,
                        siblings: nodes,
                        index,
                        list_depth: context.list_depth,
                    };
                    out.push(self.translate_element(element, placement, context)?);
                }
                Node::Definition(_) => {}
                Node::Reference(reference) => {
                    log::debug!(
                        "unresolved reference `{}` reached the translator",
                        reference.identifier
                    );
                }
            }
        }
        Ok(out)
    }

    fn translate_element(
        &self,
        element: &Element,
        mut placement: Placement<'_>,
        context: Context,
    ) -> Result<OutputNode, RenderError> {
        let resolved = self.options.components.resolve(&element.tag)?;

        let space = if element.is("svg") {
            Space::Svg
        } else {
            context.space
        };
        let list_depth = if element.is("ol") || element.is("ul") {
            context.list_depth + 1
        } else {
            context.list_depth
        };
        placement.list_depth = list_depth;

        let mut props = map_properties(element, space);
        self.rewrite_urls(element, space, &mut props);
        self.apply_link_target(element, &mut props);
        align_cell(element, &mut props);
        props.insert(
            "key".into(),
            element_key(&element.tag, element.position, placement.index).into(),
        );
        if self.options.include_source_position {
            props.insert(
                "data-sourcepos".into(),
                element.position.unwrap_or_default().to_range_string().into(),
            );
        }

        let children =
            self.translate_children(&element.children, Some(element), Context { space, list_depth })?;
        let children = if children.is_empty() && VOID_ELEMENTS.contains(&element.tag.as_str()) {
            None
        } else {
            Some(children)
        };

        match resolved {
            Resolved::Tag(tag) => {
                let tag = match space {
                    Space::Svg => svg_element_name(tag).unwrap_or(tag),
                    Space::Html => tag,
                };
                Ok(OutputNode::element(tag, props, children))
            }
            Resolved::Handler(handler) => {
                annotate(element, &placement, &mut props);
                self.add_handler_diagnostics(element, &placement, &mut props);
                Ok(handler(ComponentProps {
                    tag: &element.tag,
                    props,
                    children,
                    node: element,
                }))
            }
        }
    }

    fn add_handler_diagnostics(&self, element: &Element, placement: &Placement<'_>, props: &mut Props) {
        if self.options.include_raw_source_position {
            let position = element.position.map_or(PropValue::Null, PropValue::Position);
            props.insert("sourcePosition".into(), position);
        }
        if self.options.include_element_index {
            let elements_before = placement.siblings[..placement.index]
                .iter()
                .filter(|node| matches!(node, Node::Element(_)))
                .count();
            let sibling_count = placement
                .siblings
                .iter()
                .filter(|node| matches!(node, Node::Element(_)))
                .count();
            props.insert("index".into(), elements_before.into());
            props.insert("siblingCount".into(), sibling_count.into());
        }
    }

    /// Run the URL transforms over every URL-bearing prop. Inside SVG any element can link
    /// through `href` or `xlink:href`.
    fn rewrite_urls(&self, element: &Element, space: Space, props: &mut Props) {
        let link = &self.options.link_transform;
        let mut targets: Vec<(&'static str, &UrlTransform)> = match element.tag.as_str() {
            "a" => vec![("href", link)],
            "img" => vec![("src", &self.options.image_transform)],
            _ => Vec::new(),
        };
        if space == Space::Svg {
            if !element.is("a") {
                targets.push(("href", link));
            }
            targets.push(("xlinkHref", link));
        }

        for (key, transform) in targets {
            self.rewrite_url(element, key, transform, props);
        }
    }

    fn rewrite_url(&self, element: &Element, key: &str, transform: &UrlTransform, props: &mut Props) {
        if matches!(transform, UrlTransform::Disabled) {
            return;
        }
        let Some(url) = props.get(key).and_then(PropValue::as_str) else {
            return;
        };
        let context = UrlContext {
            url,
            key,
            node: element,
            title: props.get("title").and_then(PropValue::as_str),
            alt: if element.is("img") {
                props.get("alt").and_then(PropValue::as_str)
            } else {
                None
            },
        };
        let rewritten = transform.apply(&context);
        props.insert(key.into(), rewritten.into());
    }

    fn apply_link_target(&self, element: &Element, props: &mut Props) {
        let Some(target) = &self.options.link_target else {
            return;
        };
        if !element.is("a") || props.contains_key("target") {
            return;
        }
        if target == "_blank" && !props.contains_key("rel") {
            props.insert("rel".into(), "noopener noreferrer".into());
        }
        props.insert("target".into(), target.clone().into());
    }
}
