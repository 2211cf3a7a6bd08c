//! Raw markup handling under each policy.

use crate::common::{find_all, top_level_tags, ElementText};
use mdtree::{render, FormatRegistry, Options, OutputNode, PropValue, RawHtml};

const BLOCK: &str = "<div class=\"note\"><a href=\"javascript:alert(1)\" onclick=\"steal()\">x</a><script>bad()</script></div>\n";

#[test]
fn test_escape_keeps_markup_as_text() {
    let output = render(BLOCK, &Options::default()).unwrap();
    assert_eq!(output.len(), 1);
    let OutputNode::Text(text) = &output[0] else {
        panic!("expected text, got {:?}", output[0]);
    };
    assert!(text.starts_with("<div class=\"note\">"));

    let html = FormatRegistry::default().serialize(&output, "html").unwrap();
    assert!(html.starts_with("&lt;div class=\"note\"&gt;"));
}

#[test]
fn test_skip_drops_markup() {
    let output = render(
        &format!("before\n\n{BLOCK}\nafter\n"),
        &Options::default().raw_html(RawHtml::Skip),
    )
    .unwrap();
    assert_eq!(top_level_tags(&output), vec!["p", "p"]);
    assert!(find_all(&output, "div").is_empty());
}

#[test]
fn test_trusted_markup_is_sanitized_and_filtered() {
    let options = Options::default()
        .raw_html(RawHtml::Trust)
        .disallowed_elements(["script"]);
    let output = render(BLOCK, &options).unwrap();

    let div = find_all(&output, "div")[0];
    assert_eq!(div.prop("className"), Some(&PropValue::String("note".into())));

    let link = find_all(&output, "a")[0];
    assert_eq!(
        link.prop("href"),
        Some(&PropValue::String("javascript:void(0)".into()))
    );
    assert_eq!(link.prop("onClick"), None);
    assert_eq!(link.prop("onclick"), None);
    assert!(find_all(&output, "script").is_empty());

    let html = FormatRegistry::default().serialize(&output, "html").unwrap();
    assert!(html.starts_with(r#"<div class="note"><a href="javascript:void(0)">x</a></div>"#));
}

#[test]
fn test_trusted_inline_tags_are_parsed_one_by_one() {
    let output = render(
        "a <kbd>b</kbd> c",
        &Options::default().raw_html(RawHtml::Trust),
    )
    .unwrap();
    let paragraph = output[0].as_element().unwrap();
    let kbd = find_all(&output, "kbd");
    assert_eq!(kbd.len(), 1);
    // The closing tag is its own fragment, so `b` stays outside the element.
    assert!(kbd[0].children().is_empty());
    assert_eq!(paragraph.text_content(), "a b c");
}

#[test]
fn test_trusted_style_attribute_becomes_map() {
    let output = render(
        "<p style=\"color: red; -webkit-line-clamp: 2\">x</p>\n",
        &Options::default().raw_html(RawHtml::Trust),
    )
    .unwrap();
    let paragraph = find_all(&output, "p")[0];
    let Some(PropValue::Style(style)) = paragraph.prop("style") else {
        panic!("expected a style map");
    };
    assert_eq!(style.get("color").map(String::as_str), Some("red"));
    assert_eq!(style.get("WebkitLineClamp").map(String::as_str), Some("2"));
}

#[test]
fn test_trusted_svg_uses_svg_names() {
    let output = render(
        "<svg viewBox=\"0 0 10 10\"><path stroke-width=\"2\"></path></svg>\n",
        &Options::default().raw_html(RawHtml::Trust),
    )
    .unwrap();
    let svg = find_all(&output, "svg")[0];
    assert_eq!(
        svg.prop("viewBox"),
        Some(&PropValue::String("0 0 10 10".into()))
    );
    let path = find_all(&output, "path")[0];
    assert!(path.prop("strokeWidth").is_some());
}

#[test]
fn test_trusted_non_ascii_attribute_is_dropped() {
    let output = render(
        "<div aé=\"1\" oné=\"2\" class=\"box\">x</div>\n",
        &Options::default().raw_html(RawHtml::Trust),
    )
    .unwrap();
    let div = find_all(&output, "div")[0];
    assert_eq!(div.prop("aé"), None);
    assert_eq!(div.prop("className"), Some(&PropValue::String("box".into())));
    assert_eq!(div.text_content(), "x");
}

#[test]
fn test_trusted_svg_links_are_sanitized() {
    let output = render(
        "<svg>\n<a xlink:href=\"javascript:alert(1)\"><text>x</text></a>\n<image href=\"javascript:alert(2)\"></image>\n</svg>\n",
        &Options::default().raw_html(RawHtml::Trust),
    )
    .unwrap();
    let placeholder = Some(&PropValue::String("javascript:void(0)".into()));
    assert_eq!(find_all(&output, "a")[0].prop("xlinkHref"), placeholder);
    assert_eq!(find_all(&output, "image")[0].prop("href"), placeholder);
}

#[test]
fn test_trusted_svg_tags_match_lowercase_and_render_canonical() {
    let markup = "<svg>\n<foreignObject><p>inner</p></foreignObject>\n<clipPath></clipPath>\n</svg>\n";
    let trust = Options::default().raw_html(RawHtml::Trust);

    let output = render(markup, &trust).unwrap();
    assert_eq!(find_all(&output, "foreignObject").len(), 1);
    assert_eq!(find_all(&output, "clipPath").len(), 1);

    let denied = render(
        markup,
        &Options::default()
            .raw_html(RawHtml::Trust)
            .disallowed_elements(["foreignobject"]),
    )
    .unwrap();
    assert!(find_all(&denied, "foreignObject").is_empty());
    assert!(find_all(&denied, "p").is_empty());
    assert_eq!(find_all(&denied, "clipPath").len(), 1);
}
