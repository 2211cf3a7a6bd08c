//! Deprecated option names.
//!
//! Configuration written for older releases may still use option names that no longer exist.
//! They are ignored, but each one found is reported with a pointer to its replacement.

/// A deprecated option that was found, with migration guidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deprecation {
    pub key: &'static str,
    pub guidance: &'static str,
}

const DEPRECATED: &[(&str, &str)] = &[
    ("allowed_types", "use `allowed_elements`"),
    ("disallowed_types", "use `disallowed_elements`"),
    ("allow_node", "use `allow_element`"),
    ("include_node_index", "use `include_element_index`"),
    ("renderers", "use `components`"),
    ("escape_html", "use `raw_html = \"escape\"`"),
    ("skip_html", "use `raw_html = \"skip\"`"),
    ("allow_dangerous_html", "use `raw_html = \"trust\"`"),
    ("transform_link_uri", "use `link_transform`"),
    ("transform_image_uri", "use `image_transform`"),
    ("source_pos", "use `include_source_position`"),
    ("raw_source_pos", "use `include_raw_source_position`"),
];

/// Report every deprecated key present in `keys`, in table order, once each.
pub fn check_deprecated<I, S>(keys: I) -> Vec<Deprecation>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let keys: Vec<S> = keys.into_iter().collect();
    DEPRECATED
        .iter()
        .filter(|(old, _)| keys.iter().any(|key| key.as_ref() == *old))
        .map(|&(key, guidance)| {
            log::warn!("option `{key}` is deprecated and ignored: {guidance}");
            Deprecation { key, guidance }
        })
        .collect()
}
