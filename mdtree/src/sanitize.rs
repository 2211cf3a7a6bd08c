//! URL safety checks for link and image targets.

/// Schemes that are always allowed through.
pub const SAFE_PROTOCOLS: &[&str] = &["http", "https", "mailto", "tel"];

/// Inert value substituted for URLs with an untrusted scheme.
pub const UNSAFE_URL_PLACEHOLDER: &str = "javascript:void(0)";

/// Return `url` (trimmed) if it is relative, a fragment, or uses an allowed scheme, and the
/// inert placeholder otherwise.
///
/// A colon that follows a `?` or `#` is part of the query or fragment, not a scheme
/// separator, so `a?b:c` and `a#javascript:x` are left alone.
pub fn sanitize_url(url: &str) -> String {
    let url = url.trim();

    if url.is_empty() || url.starts_with('#') || url.starts_with('/') {
        return url.to_string();
    }

    let Some(colon) = url.find(':') else {
        return url.to_string();
    };

    let scheme = &url[..colon];
    if SAFE_PROTOCOLS
        .iter()
        .any(|protocol| scheme.eq_ignore_ascii_case(protocol))
    {
        return url.to_string();
    }

    if matches!(url.find('?'), Some(index) if index < colon) {
        return url.to_string();
    }
    if matches!(url.find('#'), Some(index) if index < colon) {
        return url.to_string();
    }

    UNSAFE_URL_PLACEHOLDER.to_string()
}
