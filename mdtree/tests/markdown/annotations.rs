//! Structural props handed to custom handlers.

use crate::common::{echo, find_all};
use mdtree::{render, ComponentRegistry, Options, OutputElement, OutputNode, PropValue};

fn with_echo(tags: &[&str]) -> Options {
    let mut components = ComponentRegistry::new();
    for tag in tags {
        components.register_handler(*tag, echo);
    }
    Options::default().components(components)
}

fn number(element: &OutputElement, name: &str) -> Option<f64> {
    element.prop(name).and_then(PropValue::as_number)
}

#[test]
fn test_list_depth_counts_enclosing_lists() {
    let markdown = "- a\n  - b\n    - c\n\nparagraph\n\n- d\n";
    let output = render(markdown, &with_echo(&["ul"])).unwrap();
    let depths: Vec<_> = find_all(&output, "ul")
        .iter()
        .map(|list| list.prop("depth").and_then(PropValue::as_number))
        .collect();
    assert_eq!(depths, vec![Some(1.0), Some(2.0), Some(3.0), Some(1.0)]);
    for list in find_all(&output, "ul") {
        assert_eq!(list.prop("ordered"), Some(&PropValue::Bool(false)));
    }
}

#[test]
fn test_ordered_list_items() {
    let output = render("1. one\n2. two\n", &with_echo(&["ol", "li"])).unwrap();
    let list = find_all(&output, "ol")[0];
    assert_eq!(list.prop("ordered"), Some(&PropValue::Bool(true)));

    let items = find_all(&output, "li");
    assert_eq!(items.len(), 2);
    assert_eq!(number(items[0], "index"), Some(0.0));
    assert_eq!(number(items[1], "index"), Some(1.0));
    assert_eq!(items[1].prop("ordered"), Some(&PropValue::Bool(true)));
    assert_eq!(items[1].prop("checked"), Some(&PropValue::Null));
}

#[test]
fn test_task_items_report_checked_state() {
    let output = render("- [x] done\n- [ ] todo\n- plain\n", &with_echo(&["li"])).unwrap();
    let checked: Vec<_> = find_all(&output, "li")
        .iter()
        .map(|item| item.prop("checked").cloned())
        .collect();
    assert_eq!(
        checked,
        vec![
            Some(PropValue::Bool(true)),
            Some(PropValue::Bool(false)),
            Some(PropValue::Null),
        ]
    );
}

#[test]
fn test_table_cell_alignment() {
    let markdown = "| a | b | c | d |\n|:--|:-:|--:|---|\n| 1 | 2 | 3 | 4 |\n";
    let output = render(markdown, &Options::default()).unwrap();
    let cells = find_all(&output, "td");
    assert_eq!(cells.len(), 4);

    let align = |index: usize| match cells[index].prop("style") {
        Some(PropValue::Style(style)) => style.get("textAlign").cloned(),
        _ => None,
    };
    assert_eq!(align(0).as_deref(), Some("left"));
    assert_eq!(align(1).as_deref(), Some("center"));
    assert_eq!(align(2).as_deref(), Some("right"));
    assert_eq!(cells[3].prop("style"), None);
    assert!(cells.iter().all(|cell| cell.prop("align").is_none()));
}

#[test]
fn test_table_header_flags() {
    let markdown = "| h |\n|---|\n| b |\n";
    let output = render(markdown, &with_echo(&["tr", "th", "td"])).unwrap();
    let rows = find_all(&output, "tr");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].prop("isHeader"), Some(&PropValue::Bool(true)));
    assert_eq!(rows[1].prop("isHeader"), Some(&PropValue::Bool(false)));
    assert_eq!(
        find_all(&output, "th")[0].prop("isHeader"),
        Some(&PropValue::Bool(true))
    );
    assert_eq!(
        find_all(&output, "td")[0].prop("isHeader"),
        Some(&PropValue::Bool(false))
    );
}

#[test]
fn test_heading_level() {
    let output = render("### Three\n\n###### Six\n", &with_echo(&["h3", "h6"])).unwrap();
    assert_eq!(number(find_all(&output, "h3")[0], "level"), Some(3.0));
    assert_eq!(number(find_all(&output, "h6")[0], "level"), Some(6.0));
}

#[test]
fn test_code_inline_flag() {
    let output = render("`x`\n\n```\nblock\n```\n", &with_echo(&["code"])).unwrap();
    let code = find_all(&output, "code");
    assert_eq!(code.len(), 2);
    assert_eq!(code[0].prop("inline"), Some(&PropValue::Bool(true)));
    assert_eq!(code[1].prop("inline"), None);
    assert_eq!(code[0].prop("value"), None);
    assert_eq!(code[1].prop("value"), Some(&PropValue::String("block\n".into())));
}

#[test]
fn test_passthrough_elements_get_no_annotations() {
    let output = render("# Title\n\n- item\n", &Options::default()).unwrap();
    let heading = find_all(&output, "h1")[0];
    assert_eq!(heading.prop("level"), None);
    assert_eq!(find_all(&output, "ul")[0].prop("depth"), None);
}

#[test]
fn test_element_index_for_handlers() {
    let mut components = ComponentRegistry::new();
    components.register_handler("p", echo);
    let options = Options::default()
        .components(components)
        .include_element_index(true);
    let output = render("one\n\ntwo\n\nthree\n", &options).unwrap();
    let paragraphs = find_all(&output, "p");
    assert_eq!(number(paragraphs[2], "index"), Some(2.0));
    assert_eq!(number(paragraphs[2], "siblingCount"), Some(3.0));
}

#[test]
fn test_raw_source_position_for_handlers() {
    let mut components = ComponentRegistry::new();
    components.register_handler("h1", |props| {
        let line = match props.props.get("sourcePosition") {
            Some(PropValue::Position(span)) => span.start.line,
            _ => None,
        };
        OutputNode::Text(format!("{line:?}"))
    });
    let options = Options::default()
        .components(components)
        .include_raw_source_position(true);
    let output = render("\n# Title\n", &options).unwrap();
    assert_eq!(output[0], OutputNode::Text("Some(2)".into()));
}
