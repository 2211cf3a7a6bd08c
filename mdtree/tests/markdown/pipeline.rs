//! End-to-end rendering of markdown through the full pipeline.

use crate::common::{elements, find_all, top_level_tags, without_key};
use mdtree::tree::{Definition, Reference, ReferenceKind};
use mdtree::{
    render, render_tree, ComponentRegistry, Element, Node, Options, OutputNode, PropValue,
    RenderError, Root,
};

#[test]
fn test_paragraph_with_emphasis() {
    let output = render("*a*", &Options::default()).unwrap();
    assert_eq!(output.len(), 1);
    let paragraph = output[0].as_element().unwrap();
    assert_eq!(paragraph.tag, "p");
    let emphasis = paragraph.children()[0].as_element().unwrap();
    assert_eq!(emphasis.tag, "em");
    assert_eq!(emphasis.children(), &[OutputNode::Text("a".into())]);
}

#[test]
fn test_empty_registry_mirrors_element_tree() {
    let root = Root::new(vec![
        Element::new("h2").with_child("Title").into(),
        Element::new("p")
            .with_child("a ")
            .with_child(Element::new("strong").with_child("b"))
            .into(),
        Element::new("hr").into(),
    ]);
    let output = render_tree(root, &Options::default()).unwrap();
    assert_eq!(top_level_tags(&output), vec!["h2", "p", "hr"]);
    let tags: Vec<_> = elements(&output).iter().map(|e| e.tag.as_str()).collect();
    assert_eq!(tags, vec!["h2", "p", "strong", "hr"]);
    assert_eq!(output[1].text_content(), "a b");
    assert_eq!(output[2].as_element().unwrap().children, None);
}

#[test]
fn test_javascript_href_is_replaced() {
    let output = render("[x](javascript:alert(1))", &Options::default()).unwrap();
    let link = find_all(&output, "a")[0];
    assert_eq!(
        link.prop("href"),
        Some(&PropValue::String("javascript:void(0)".into()))
    );
}

#[test]
fn test_safe_links_pass_through() {
    let output = render(
        "[a](https://example.com) [b](/docs) [c](#top) [d](mailto:me@example.com)",
        &Options::default(),
    )
    .unwrap();
    let hrefs: Vec<_> = find_all(&output, "a")
        .iter()
        .map(|link| link.prop("href").and_then(PropValue::as_str).unwrap().to_string())
        .collect();
    assert_eq!(
        hrefs,
        vec!["https://example.com", "/docs", "#top", "mailto:me@example.com"]
    );
}

#[test]
fn test_allowed_elements_keeps_only_paragraph() {
    let markdown = "# Title\n\nSome text\n\n- item\n";
    let options = Options::default().allowed_elements(["p"]);
    let output = render(markdown, &options).unwrap();
    assert_eq!(top_level_tags(&output), vec!["p"]);
    assert_eq!(output[0].text_content(), "Some text");
}

#[test]
fn test_conflicting_filters_fail_before_rendering() {
    let options = Options::default()
        .allowed_elements(["p"])
        .disallowed_elements(["em"]);
    assert_eq!(
        render("*a*", &options).unwrap_err(),
        RenderError::ConflictingFilters
    );
}

#[test]
fn test_invalid_component_names_the_tag() {
    let mut components = ComponentRegistry::new();
    components.register_tag("em", "not a tag");
    let options = Options::default().components(components);

    let error = render("*a*", &options).unwrap_err();
    assert!(matches!(error, RenderError::InvalidComponent { ref tag, .. } if tag == "em"));

    // Not used by this document, so never resolved.
    assert!(render("plain", &options).is_ok());
}

#[test]
fn test_tag_components_rename_elements() {
    let mut components = ComponentRegistry::new();
    components.register_tag("h1", "h2");
    let output = render("# Title", &Options::default().components(components)).unwrap();
    assert_eq!(top_level_tags(&output), vec!["h2"]);
}

#[test]
fn test_handler_replaces_element() {
    let mut components = ComponentRegistry::new();
    components.register_handler("hr", |_| OutputNode::Text("* * *".into()));
    let output = render("a\n\n---\n\nb", &Options::default().components(components)).unwrap();
    assert_eq!(output[1], OutputNode::Text("* * *".into()));
}

#[test]
fn test_handler_receives_original_node() {
    let mut components = ComponentRegistry::new();
    components.register_handler("a", |props| {
        let text = props.node.text_content();
        OutputNode::element("span", Default::default(), Some(vec![OutputNode::Text(text)]))
    });
    let output = render("[label](/x)", &Options::default().components(components)).unwrap();
    let span = find_all(&output, "span")[0];
    assert_eq!(span.children(), &[OutputNode::Text("label".into())]);
}

#[test]
fn test_class_name_wraps_everything() {
    let output = render("a\n\nb", &Options::default().class_name("prose")).unwrap();
    assert_eq!(top_level_tags(&output), vec!["div"]);
    let wrapper = output[0].as_element().unwrap();
    assert_eq!(without_key(&wrapper.props).len(), 1);
    assert_eq!(top_level_tags(wrapper.children()), vec!["p", "p"]);
}

#[test]
fn test_source_position_on_every_element() {
    let output = render(
        "# A\n\ntext *b*",
        &Options::default().include_source_position(true),
    )
    .unwrap();
    for element in elements(&output) {
        assert!(
            element.prop("data-sourcepos").is_some(),
            "{} has no data-sourcepos",
            element.tag
        );
    }
    let heading = output[0].as_element().unwrap();
    assert_eq!(
        heading.prop("data-sourcepos"),
        Some(&PropValue::String("1:1-1:3".into()))
    );
}

#[test]
fn test_footnotes_render_as_section() {
    let output = render("Text[^note].\n\n[^note]: The note.\n", &Options::default()).unwrap();
    let section = output.last().unwrap().as_element().unwrap();
    assert_eq!(section.tag, "section");
    assert_eq!(
        section.prop("className"),
        Some(&PropValue::String("footnotes".into()))
    );
    assert_eq!(section.prop("data-footnotes"), Some(&PropValue::Bool(true)));

    let reference = find_all(&output[..1], "a")[0];
    assert_eq!(
        reference.prop("href"),
        Some(&PropValue::String("#user-content-fn-note".into()))
    );
    let backref = find_all(&output, "a")
        .into_iter()
        .find(|a| a.prop("data-footnote-backref").is_some())
        .unwrap();
    assert_eq!(
        backref.prop("href"),
        Some(&PropValue::String("#user-content-fnref-note".into()))
    );
}

#[test]
fn test_definitions_resolve_hand_built_references() {
    let root = Root::new(vec![
        Element::new("p")
            .with_child(Node::Reference(Reference {
                kind: ReferenceKind::Link,
                identifier: "Docs".into(),
                alt: None,
                children: vec![Node::text("the docs")],
                position: None,
            }))
            .with_child(" ")
            .with_child(Node::Reference(Reference {
                kind: ReferenceKind::Image,
                identifier: "missing".into(),
                alt: Some("logo".into()),
                children: vec![],
                position: None,
            }))
            .into(),
        Node::Definition(Definition {
            identifier: "docs".into(),
            href: "javascript:x".into(),
            title: Some("Docs".into()),
            position: None,
        }),
        Node::Definition(Definition {
            identifier: "DOCS".into(),
            href: "/ignored".into(),
            title: None,
            position: None,
        }),
    ]);
    let output = render_tree(root, &Options::default()).unwrap();
    assert_eq!(top_level_tags(&output), vec!["p"]);

    let link = find_all(&output, "a")[0];
    // First definition wins, and resolved links are still sanitized.
    assert_eq!(
        link.prop("href"),
        Some(&PropValue::String("javascript:void(0)".into()))
    );
    assert_eq!(link.prop("title"), Some(&PropValue::String("Docs".into())));
    assert!(output[0].text_content().ends_with("![logo]"));
}

#[test]
fn test_link_target() {
    let output = render("[a](https://x.com)", &Options::default().link_target("_blank")).unwrap();
    let link = find_all(&output, "a")[0];
    assert_eq!(link.prop("target"), Some(&PropValue::String("_blank".into())));
    assert_eq!(
        link.prop("rel"),
        Some(&PropValue::String("noopener noreferrer".into()))
    );
}

#[test]
fn test_renders_in_parallel() {
    let options = Options::default().disallowed_elements(["em"]).unwrap_disallowed(true);
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let options = &options;
                scope.spawn(move || render(&format!("*{i}*"), options).unwrap())
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let output = handle.join().unwrap();
            assert_eq!(output[0].text_content(), i.to_string());
            assert!(find_all(&output, "em").is_empty());
        }
    });
}
