//! Markdown parsing (Markdown → element tree)
//!
//! Pipeline: Markdown string → Comrak AST → element tree
//!
//! The lowering produces the same element shapes GitHub renders: tight list items hold their
//! inline content directly, task items start with a disabled checkbox, tables are split into
//! `thead`/`tbody`, and footnote definitions are gathered into a trailing `section.footnotes`.

use crate::options::MarkdownOptions;
use crate::tree::{AttrValue, Element, Node, Point, Raw, Root, SourceSpan, Text};
use comrak::nodes::{AstNode, ListType, NodeValue, TableAlignment};
use comrak::{parse_document, Arena, ComrakOptions};
use std::collections::HashMap;

/// Parse Markdown into an element tree.
pub fn parse_markdown(source: &str, options: &MarkdownOptions) -> Root {
    let arena = Arena::new();
    let comrak_options = comrak_options(options);
    let document = parse_document(&arena, source, &comrak_options);

    let mut lowering = Lowering::default();
    let mut children = lowering.lower_children(document, false);
    if let Some(section) = lowering.footnote_section() {
        children.push(section.into());
    }

    Root {
        children,
        position: span(document),
    }
}

fn comrak_options(options: &MarkdownOptions) -> ComrakOptions<'static> {
    let mut comrak = ComrakOptions::default();
    comrak.extension.table = options.gfm;
    comrak.extension.strikethrough = options.gfm;
    comrak.extension.autolink = options.gfm;
    comrak.extension.tasklist = options.gfm;
    comrak.extension.superscript = options.gfm;
    comrak.extension.footnotes = options.footnotes;
    comrak.extension.front_matter_delimiter = Some("---".to_string());
    comrak
}

fn span<'a>(node: &'a AstNode<'a>) -> Option<SourceSpan> {
    let sourcepos = node.data.borrow().sourcepos;
    if sourcepos.start.line == 0 {
        return None;
    }
    Some(SourceSpan::new(
        Point::new(sourcepos.start.line, sourcepos.start.column),
        Point::new(sourcepos.end.line, sourcepos.end.column),
    ))
}

/// Footnote bookkeeping collected during the walk.
#[derive(Default)]
struct Lowering {
    /// Footnote identifiers in order of first reference; the position is the footnote number.
    footnote_order: Vec<String>,
    /// How often each footnote was referenced so far.
    footnote_references: HashMap<String, usize>,
    footnote_definitions: HashMap<String, Vec<Node>>,
}

impl Lowering {
    fn lower_children<'a>(&mut self, node: &'a AstNode<'a>, tight: bool) -> Vec<Node> {
        let mut out = Vec::new();
        for child in node.children() {
            self.lower(child, tight, &mut out);
        }
        out
    }

    /// Lower one Comrak node. `tight` is set for the direct children of a tight list item,
    /// whose paragraphs are unwrapped.
    fn lower<'a>(&mut self, node: &'a AstNode<'a>, tight: bool, out: &mut Vec<Node>) {
        let position = span(node);
        let value = node.data.borrow().value.clone();
        let element = |tag: &str| Element::new(tag).with_position(position);

        match value {
            NodeValue::Document => out.extend(self.lower_children(node, false)),

            NodeValue::FrontMatter(_) => {}

            NodeValue::Paragraph => {
                let children = self.lower_children(node, false);
                if tight {
                    out.extend(children);
                } else {
                    out.push(element("p").with_children(children).into());
                }
            }

            NodeValue::Heading(heading) => {
                let tag = format!("h{}", heading.level.clamp(1, 6));
                out.push(element(&tag).with_children(self.lower_children(node, false)).into());
            }

            NodeValue::BlockQuote => {
                out.push(
                    element("blockquote")
                        .with_children(self.lower_children(node, false))
                        .into(),
                );
            }

            NodeValue::List(list) => {
                let ordered = matches!(list.list_type, ListType::Ordered);
                let mut list_element = element(if ordered { "ol" } else { "ul" });
                if ordered && list.start != 1 {
                    list_element = list_element.with_attr("start", list.start as f64);
                }
                let has_tasks = node
                    .children()
                    .any(|child| matches!(child.data.borrow().value, NodeValue::TaskItem(_)));
                if has_tasks {
                    list_element = list_element.with_attr("class", "contains-task-list");
                }
                let items = self.lower_children(node, list.tight);
                out.push(list_element.with_children(items).into());
            }

            NodeValue::Item(_) => {
                out.push(element("li").with_children(self.lower_children(node, tight)).into());
            }

            NodeValue::TaskItem(symbol) => {
                let mut children = self.lower_children(node, tight);
                let checkbox = Element::new("input")
                    .with_attr("type", "checkbox")
                    .with_attr("checked", symbol.is_some())
                    .with_attr("disabled", true);
                let marker = [Node::from(checkbox), Node::text(" ")];
                match children.first_mut() {
                    Some(Node::Element(paragraph)) if paragraph.is("p") => {
                        paragraph.children.splice(0..0, marker);
                    }
                    _ => {
                        children.splice(0..0, marker);
                    }
                }
                out.push(
                    element("li")
                        .with_attr("class", "task-list-item")
                        .with_children(children)
                        .into(),
                );
            }

            NodeValue::CodeBlock(block) => {
                let mut code = element("code").with_child(block.literal.as_str());
                if let Some(language) = block.info.split_whitespace().next() {
                    code = code.with_attr("class", format!("language-{language}"));
                }
                out.push(element("pre").with_child(code).into());
            }

            NodeValue::HtmlBlock(html) => out.push(
                Raw {
                    value: html.literal,
                    position,
                }
                .into(),
            ),

            NodeValue::ThematicBreak => out.push(element("hr").into()),

            NodeValue::Table(table) => {
                out.push(self.lower_table(node, &table.alignments, position).into());
            }

            NodeValue::Text(text) => out.push(
                Text {
                    value: text,
                    position,
                }
                .into(),
            ),

            NodeValue::SoftBreak => out.push(Node::text("\n")),

            NodeValue::LineBreak => {
                out.push(element("br").into());
                out.push(Node::text("\n"));
            }

            NodeValue::Code(code) => {
                out.push(element("code").with_child(code.literal.as_str()).into());
            }

            NodeValue::HtmlInline(html) => out.push(
                Raw {
                    value: html,
                    position,
                }
                .into(),
            ),

            NodeValue::Emph => self.wrap(node, element("em"), out),
            NodeValue::Strong => self.wrap(node, element("strong"), out),
            NodeValue::Strikethrough => self.wrap(node, element("del"), out),
            NodeValue::Superscript => self.wrap(node, element("sup"), out),

            NodeValue::Link(link) => {
                let mut anchor = element("a").with_attr("href", link.url);
                if !link.title.is_empty() {
                    anchor = anchor.with_attr("title", link.title);
                }
                self.wrap(node, anchor, out);
            }

            NodeValue::Image(link) => {
                let mut alt = String::new();
                for child in node.children() {
                    collect_text_content(child, &mut alt);
                }
                let mut image = element("img")
                    .with_attr("src", link.url)
                    .with_attr("alt", alt);
                if !link.title.is_empty() {
                    image = image.with_attr("title", link.title);
                }
                out.push(image.into());
            }

            NodeValue::FootnoteReference(reference) => {
                out.push(self.footnote_reference(&reference.name, position).into());
            }

            NodeValue::FootnoteDefinition(definition) => {
                let children = self.lower_children(node, false);
                self.footnote_definitions
                    .entry(footnote_id(&definition.name))
                    .or_insert(children);
            }

            other => {
                log::debug!("no element mapping for markdown node {other:?}, keeping its content");
                out.extend(self.lower_children(node, tight));
            }
        }
    }

    fn wrap<'a>(&mut self, node: &'a AstNode<'a>, element: Element, out: &mut Vec<Node>) {
        let children = self.lower_children(node, false);
        out.push(element.with_children(children).into());
    }

    fn lower_table<'a>(
        &mut self,
        node: &'a AstNode<'a>,
        alignments: &[TableAlignment],
        position: Option<SourceSpan>,
    ) -> Element {
        let mut head = Vec::new();
        let mut body = Vec::new();

        for row in node.children() {
            let header = matches!(row.data.borrow().value, NodeValue::TableRow(true));
            let cell_tag = if header { "th" } else { "td" };

            let mut cells = Vec::new();
            for (column, cell) in row.children().enumerate() {
                let mut cell_element = Element::new(cell_tag)
                    .with_position(span(cell))
                    .with_children(self.lower_children(cell, false));
                if let Some(align) = alignments.get(column).and_then(|a| alignment_name(*a)) {
                    cell_element = cell_element.with_attr("align", align);
                }
                cells.push(cell_element.into());
            }

            let row_element = Element::new("tr")
                .with_position(span(row))
                .with_children(cells);
            if header {
                head.push(row_element.into());
            } else {
                body.push(row_element.into());
            }
        }

        let mut table = Element::new("table").with_position(position);
        if !head.is_empty() {
            table = table.with_child(Element::new("thead").with_children(head));
        }
        if !body.is_empty() {
            table = table.with_child(Element::new("tbody").with_children(body));
        }
        table
    }

    fn footnote_reference(&mut self, name: &str, position: Option<SourceSpan>) -> Element {
        let id = footnote_id(name);
        let number = match self.footnote_order.iter().position(|known| *known == id) {
            Some(index) => index + 1,
            None => {
                self.footnote_order.push(id.clone());
                self.footnote_order.len()
            }
        };
        let count = self.footnote_references.entry(id.clone()).or_insert(0);
        *count += 1;

        let anchor = Element::new("a")
            .with_attr("href", format!("#user-content-fn-{id}"))
            .with_attr("id", reference_anchor(&id, *count))
            .with_attr("data-footnote-ref", true)
            .with_attr("aria-describedby", "footnote-label")
            .with_child(number.to_string().as_str());
        Element::new("sup").with_position(position).with_child(anchor)
    }

    /// The trailing footnote section, or `None` when nothing was referenced.
    fn footnote_section(&mut self) -> Option<Element> {
        let mut items = Vec::new();
        for (index, id) in self.footnote_order.iter().enumerate() {
            let Some(mut content) = self.footnote_definitions.remove(id) else {
                log::warn!("footnote `{id}` is referenced but never defined");
                continue;
            };
            let references = self.footnote_references.get(id).copied().unwrap_or(1);

            let mut backrefs = Vec::new();
            for occurrence in 1..=references {
                let label = if occurrence == 1 {
                    format!("Back to reference {}", index + 1)
                } else {
                    format!("Back to reference {}-{occurrence}", index + 1)
                };
                backrefs.push(Node::text(" "));
                backrefs.push(
                    Element::new("a")
                        .with_attr("href", format!("#{}", reference_anchor(id, occurrence)))
                        .with_attr("data-footnote-backref", true)
                        .with_attr("aria-label", label)
                        .with_attr("class", "data-footnote-backref")
                        .with_child("↩")
                        .into(),
                );
            }
            match content.last_mut() {
                Some(Node::Element(paragraph)) if paragraph.is("p") => {
                    paragraph.children.extend(backrefs);
                }
                _ => content.extend(backrefs),
            }

            items.push(
                Element::new("li")
                    .with_attr("id", format!("user-content-fn-{id}"))
                    .with_children(content)
                    .into(),
            );
        }

        if items.is_empty() {
            return None;
        }
        let label = Element::new("h2")
            .with_attr("id", "footnote-label")
            .with_attr("class", "sr-only")
            .with_child("Footnotes");
        Some(
            Element::new("section")
                .with_attr("class", "footnotes")
                .with_attr("data-footnotes", AttrValue::Bool(true))
                .with_child(label)
                .with_child(Element::new("ol").with_children(items)),
        )
    }
}

fn footnote_id(name: &str) -> String {
    name.trim().to_lowercase()
}

fn reference_anchor(id: &str, occurrence: usize) -> String {
    if occurrence == 1 {
        format!("user-content-fnref-{id}")
    } else {
        format!("user-content-fnref-{id}-{occurrence}")
    }
}

fn alignment_name(alignment: TableAlignment) -> Option<&'static str> {
    match alignment {
        TableAlignment::Left => Some("left"),
        TableAlignment::Center => Some("center"),
        TableAlignment::Right => Some("right"),
        TableAlignment::None => None,
    }
}

/// Collect text content from a node (image alt text)
fn collect_text_content<'a>(node: &'a AstNode<'a>, output: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => output.push_str(text),
        NodeValue::Code(code) => output.push_str(&code.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => output.push(' '),
        _ => {
            for child in node.children() {
                collect_text_content(child, output);
            }
        }
    }
}
