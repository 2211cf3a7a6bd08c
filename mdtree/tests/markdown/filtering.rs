//! Element filtering through the public pipeline.

use crate::common::{elements, find_all, top_level_tags};
use mdtree::{render, render_tree, Element, ElementFilter, Node, Options, Root};
use proptest::prelude::*;

const TAGS: &[&str] = &["p", "em", "strong", "div", "span", "a"];

fn arb_node() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        "[a-z ]{0,6}".prop_map(Node::text),
        prop::sample::select(TAGS).prop_map(|tag| Node::Element(Element::new(tag))),
    ];
    leaf.prop_recursive(4, 48, 4, |inner| {
        (
            prop::sample::select(TAGS),
            prop::collection::vec(inner, 0..4),
        )
            .prop_map(|(tag, children)| Node::Element(Element::new(tag).with_children(children)))
    })
}

fn arb_root() -> impl Strategy<Value = Root> {
    prop::collection::vec(arb_node(), 0..5).prop_map(Root::new)
}

fn deny(tags: &[&str], unwrap: bool) -> ElementFilter {
    let tags: Vec<String> = tags.iter().map(|tag| tag.to_string()).collect();
    ElementFilter::new(None, Some(tags.as_slice()))
        .unwrap()
        .with_unwrap(unwrap)
}

fn contains_tag(nodes: &[Node], tag: &str) -> bool {
    nodes.iter().any(|node| match node {
        Node::Element(element) => element.is(tag) || contains_tag(&element.children, tag),
        _ => false,
    })
}

proptest! {
    #[test]
    fn filtering_twice_changes_nothing(root in arb_root(), unwrap in any::<bool>()) {
        let filter = deny(&["em", "div"], unwrap);
        let mut once = root;
        filter.apply(&mut once);
        let mut twice = once.clone();
        filter.apply(&mut twice);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn denied_tags_never_survive(root in arb_root(), unwrap in any::<bool>()) {
        let filter = deny(&["span"], unwrap);
        let mut filtered = root;
        filter.apply(&mut filtered);
        prop_assert!(!contains_tag(&filtered.children, "span"));
    }

    #[test]
    fn unwrapping_keeps_all_text(root in arb_root()) {
        let text = |root: &Root| -> String {
            root.children
                .iter()
                .map(|node| match node {
                    Node::Element(element) => element.text_content(),
                    Node::Text(text) => text.value.clone(),
                    _ => String::new(),
                })
                .collect()
        };
        let before = text(&root);
        let mut filtered = root;
        deny(&["strong", "a"], true).apply(&mut filtered);
        prop_assert_eq!(before, text(&filtered));
    }
}

#[test]
fn test_unwrap_promotes_children_in_place() {
    let root = Root::new(vec![Element::new("div")
        .with_child(Element::new("p").with_child("before"))
        .with_child(
            Element::new("section")
                .with_child(Element::new("h2").with_child("a"))
                .with_child("b")
                .with_child(Element::new("p").with_child("c")),
        )
        .with_child(Element::new("p").with_child("after"))
        .into()]);
    let options = Options::default()
        .disallowed_elements(["section"])
        .unwrap_disallowed(true);
    let output = render_tree(root, &options).unwrap();
    let div = output[0].as_element().unwrap();
    // Three promoted children replace the one removed element.
    assert_eq!(
        top_level_tags(div.children()),
        vec!["p", "h2", "#text", "p", "p"]
    );
    assert_eq!(div.children().len(), 3 + 3 - 1);
}

#[test]
fn test_deny_without_unwrap_drops_subtree() {
    let output = render(
        "Some *emphasis with **strong** inside*.",
        &Options::default().disallowed_elements(["em"]),
    )
    .unwrap();
    assert!(find_all(&output, "em").is_empty());
    assert!(find_all(&output, "strong").is_empty());
    assert_eq!(output[0].text_content(), "Some .");
}

#[test]
fn test_predicate_vetoes_elements_the_list_allows() {
    let options = Options::default()
        .allowed_elements(["p", "a"])
        .allow_element(|element, _, _| {
            element
                .attr("href")
                .and_then(|href| href.as_str())
                .map_or(true, |href| !href.contains("tracker"))
        });
    let output = render(
        "[keep](https://ok.example) and [drop](https://tracker.example)",
        &options,
    )
    .unwrap();
    let links = find_all(&output, "a");
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].children()[0].as_text(), Some("keep"));
}

#[test]
fn test_predicate_sees_index_and_parent() {
    let options = Options::default().allow_element(|element, index, parent| {
        !(element.is("li") && index == 1 && parent.is_some_and(|parent| parent.is("ul")))
    });
    let output = render("- one\n- two\n- three\n", &options).unwrap();
    let items: Vec<_> = find_all(&output, "li")
        .iter()
        .map(|item| {
            let mut text = String::new();
            for node in item.children() {
                text.push_str(&node.text_content());
            }
            text
        })
        .collect();
    // After the removal the next item takes index 1 and is judged again.
    assert_eq!(items, vec!["one"]);
}

#[test]
fn test_allow_list_applies_to_unwrapped_children() {
    let options = Options::default()
        .allowed_elements(["p", "em"])
        .unwrap_disallowed(true);
    let output = render("> quoted *text* with `code`\n", &options).unwrap();
    let tags: Vec<_> = elements(&output).iter().map(|e| e.tag.as_str()).collect();
    assert_eq!(tags, vec!["p", "em"]);
    assert_eq!(output[0].text_content(), "quoted text with code");
}
