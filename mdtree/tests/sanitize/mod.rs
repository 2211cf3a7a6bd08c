//! Properties of the URL sanitizer.

use mdtree::sanitize::{sanitize_url, SAFE_PROTOCOLS, UNSAFE_URL_PLACEHOLDER};
use proptest::prelude::*;

fn random_case(text: &str, mask: &[bool]) -> String {
    text.chars()
        .zip(mask.iter().cycle())
        .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
        .collect()
}

proptest! {
    #[test]
    fn urls_without_colon_are_only_trimmed(url in "[ \t]{0,2}[a-zA-Z0-9./?#=&_-]{0,20}[ \t]{0,2}") {
        prop_assert_eq!(sanitize_url(&url), url.trim());
    }

    #[test]
    fn safe_schemes_pass_in_any_case(
        scheme in prop::sample::select(SAFE_PROTOCOLS),
        mask in prop::collection::vec(any::<bool>(), 1..8),
        rest in "[a-zA-Z0-9./:@+-]{0,20}",
    ) {
        let url = format!("{}:{rest}", random_case(scheme, &mask));
        prop_assert_eq!(sanitize_url(&url), url);
    }

    #[test]
    fn other_schemes_become_placeholder(
        scheme in "[a-z]{1,10}",
        rest in "[a-zA-Z0-9./:()]{0,20}",
    ) {
        prop_assume!(!SAFE_PROTOCOLS.contains(&scheme.as_str()));
        let url = format!("{scheme}:{rest}");
        prop_assert_eq!(sanitize_url(&url), UNSAFE_URL_PLACEHOLDER);
    }

    #[test]
    fn colon_after_query_or_fragment_is_kept(
        path in "[a-z]{1,8}",
        marker in prop::sample::select(vec!['?', '#']),
        tail in "[a-z=]{0,8}:[a-z()]{0,8}",
    ) {
        let url = format!("{path}{marker}{tail}");
        prop_assert_eq!(sanitize_url(&url), url);
    }
}

#[test]
fn test_known_dangerous_schemes() {
    for url in [
        "javascript:alert(1)",
        "JavaScript:alert(1)",
        "  vbscript:msgbox(1)",
        "file:///etc/passwd",
        "data:text/html;base64,PHNjcmlwdD4=",
    ] {
        assert_eq!(sanitize_url(url), UNSAFE_URL_PLACEHOLDER, "{url}");
    }
}

#[test]
fn test_protocol_relative_and_fragments() {
    assert_eq!(sanitize_url("//cdn.example.com/x.png"), "//cdn.example.com/x.png");
    assert_eq!(sanitize_url("a?b:c"), "a?b:c");
    assert_eq!(sanitize_url("a#javascript:x"), "a#javascript:x");
    assert_eq!(sanitize_url(" #top "), "#top");
}
