//! Rendering to HTML, JSON and treeviz through the format registry.

use mdtree::{render, render_tree, Element, FormatRegistry, Options, Root};
use std::collections::HashMap;

fn to_html(markdown: &str, options: &Options) -> String {
    let output = render(markdown, options).unwrap();
    FormatRegistry::default().serialize(&output, "html").unwrap()
}

#[test]
fn test_paragraph_with_link() {
    let html = to_html(
        "# Hi\n\nSome *text* and [a link](https://x.com).\n",
        &Options::default(),
    );
    insta::assert_snapshot!(html, @r#"<h1>Hi</h1><p>Some <em>text</em> and <a href="https://x.com">a link</a>.</p>"#);
}

#[test]
fn test_table_alignment_becomes_style() {
    let html = to_html("| a | b |\n|---|--:|\n| 1 | 2 |\n", &Options::default());
    insta::assert_snapshot!(html, @r#"<table><thead><tr><th>a</th><th style="text-align: right;">b</th></tr></thead><tbody><tr><td>1</td><td style="text-align: right;">2</td></tr></tbody></table>"#);
}

#[test]
fn test_unsafe_link_is_inert_in_html() {
    let html = to_html("[x](javascript:alert(1))", &Options::default());
    insta::assert_snapshot!(html, @r#"<p><a href="javascript:void(0)">x</a></p>"#);
}

#[test]
fn test_class_name_and_link_target() {
    let options = Options::default()
        .class_name("markdown-body")
        .link_target("_blank");
    let html = to_html("[x](/a)", &options);
    insta::assert_snapshot!(html, @r#"<div class="markdown-body"><p><a href="/a" rel="noopener noreferrer" target="_blank">x</a></p></div>"#);
}

#[test]
fn test_task_list_checkbox() {
    let html = to_html("- [x] done\n", &Options::default());
    assert!(html.contains(r#"<input checked="" disabled="" type="checkbox">"#));
    assert!(html.contains("done"));
}

#[test]
fn test_source_positions_are_written() {
    let html = to_html("# A\n", &Options::default().include_source_position(true));
    assert_eq!(html, r#"<h1 data-sourcepos="1:1-1:3">A</h1>"#);
}

#[test]
fn test_standalone_document() {
    let output = render("text", &Options::default()).unwrap();
    let mut params = HashMap::new();
    params.insert("standalone".to_string(), "true".to_string());
    params.insert("title".to_string(), "Notes".to_string());
    let html = FormatRegistry::default()
        .serialize_with_options(&output, "html", &params)
        .unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Notes</title>"));
    assert!(html.contains("<p>text</p>"));
}

#[test]
fn test_compact_json() {
    let root = Root::new(vec![Element::new("p")
        .with_child("a")
        .with_child(Element::new("br"))
        .into()]);
    let output = render_tree(root, &Options::default()).unwrap();
    let mut params = HashMap::new();
    params.insert("pretty".to_string(), "false".to_string());
    let json = FormatRegistry::default()
        .serialize_with_options(&output, "json", &params)
        .unwrap();
    insta::assert_snapshot!(json, @r#"[{"tag":"p","props":{"key":"p---0"},"children":["a",{"tag":"br","props":{"key":"br---1"},"children":null}]}]"#);
}

#[test]
fn test_treeviz() {
    let root = Root::new(vec![
        Element::new("h1").with_child("Title").into(),
        Element::new("p").with_child("Body").into(),
    ]);
    let output = render_tree(root, &Options::default()).unwrap();
    let tree = FormatRegistry::default()
        .serialize(&output, "treeviz")
        .unwrap();
    assert!(tree.starts_with("⧉ Output (2 nodes)"));
    assert!(tree.contains("Title"));
    assert!(tree.contains("Body"));
}

#[test]
fn test_html_input_round_trip() {
    let registry = FormatRegistry::default();
    let root = registry
        .parse(r#"<p class="lead">Hello <b>there</b></p>"#, "html")
        .unwrap();
    let output = render_tree(root, &Options::default()).unwrap();
    let html = registry.serialize(&output, "html").unwrap();
    insta::assert_snapshot!(html, @r#"<p class="lead">Hello <b>there</b></p>"#);
}

#[test]
fn test_html_input_with_non_ascii_attribute() {
    let registry = FormatRegistry::default();
    let root = registry
        .parse(r#"<p aé="1" class="lead">Hello</p>"#, "html")
        .unwrap();
    let output = render_tree(root, &Options::default()).unwrap();
    let html = registry.serialize(&output, "html").unwrap();
    insta::assert_snapshot!(html, @r#"<p class="lead">Hello</p>"#);
}
