//! Render options.
//!
//! Every field is optional; `Options::default()` renders GFM with the default URL sanitizer and
//! raw markup escaped to text.

use crate::components::ComponentRegistry;
use crate::filter::AllowElement;
use crate::sanitize::sanitize_url;
use crate::tree::Element;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Markdown dialect switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkdownOptions {
    /// Tables, strikethrough, autolinks and task lists.
    pub gfm: bool,
    pub footnotes: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            gfm: true,
            footnotes: true,
        }
    }
}

/// What happens to raw markup embedded in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawHtml {
    /// Render the markup as literal text.
    #[default]
    Escape,
    /// Drop it.
    Skip,
    /// Parse it into elements, which are then filtered and sanitized like everything else.
    Trust,
}

impl FromStr for RawHtml {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "escape" => Ok(RawHtml::Escape),
            "skip" => Ok(RawHtml::Skip),
            "trust" => Ok(RawHtml::Trust),
            other => Err(format!(
                "unknown raw html policy `{other}` (expected escape, skip or trust)"
            )),
        }
    }
}

/// Arguments to a URL transform.
#[derive(Debug, Clone, Copy)]
pub struct UrlContext<'a> {
    pub url: &'a str,
    /// Attribute being rewritten: `href` or `src`.
    pub key: &'a str,
    pub node: &'a Element,
    /// `None` when the element has no title.
    pub title: Option<&'a str>,
    /// Image alternative text; `None` for links.
    pub alt: Option<&'a str>,
}

pub type UrlTransformFn = Arc<dyn Fn(&UrlContext<'_>) -> String + Send + Sync>;

/// Rewrite applied to link `href` and image `src`. Inside SVG the link rewrite also covers
/// `href` and `xlink:href` on every element.
#[derive(Clone, Default)]
pub enum UrlTransform {
    /// [`sanitize_url`].
    #[default]
    Default,
    /// Leave URLs untouched.
    Disabled,
    Custom(UrlTransformFn),
}

impl UrlTransform {
    pub fn custom<F>(transform: F) -> Self
    where
        F: Fn(&UrlContext<'_>) -> String + Send + Sync + 'static,
    {
        UrlTransform::Custom(Arc::new(transform))
    }

    pub fn apply(&self, context: &UrlContext<'_>) -> String {
        match self {
            UrlTransform::Default => sanitize_url(context.url),
            UrlTransform::Disabled => context.url.to_string(),
            UrlTransform::Custom(transform) => transform(context),
        }
    }
}

impl fmt::Debug for UrlTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlTransform::Default => f.write_str("Default"),
            UrlTransform::Disabled => f.write_str("Disabled"),
            UrlTransform::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[derive(Clone, Default)]
pub struct Options {
    pub markdown: MarkdownOptions,
    pub allowed_elements: Option<Vec<String>>,
    pub disallowed_elements: Option<Vec<String>>,
    pub allow_element: Option<AllowElement>,
    pub unwrap_disallowed: bool,
    pub components: ComponentRegistry,
    pub link_transform: UrlTransform,
    pub image_transform: UrlTransform,
    /// `target` for links that do not set one.
    pub link_target: Option<String>,
    /// Wrap the output in a `div` with this class.
    pub class_name: Option<String>,
    pub include_source_position: bool,
    pub include_raw_source_position: bool,
    pub include_element_index: bool,
    pub raw_html: RawHtml,
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("markdown", &self.markdown)
            .field("allowed_elements", &self.allowed_elements)
            .field("disallowed_elements", &self.disallowed_elements)
            .field("allow_element", &self.allow_element.is_some())
            .field("unwrap_disallowed", &self.unwrap_disallowed)
            .field("components", &self.components)
            .field("link_transform", &self.link_transform)
            .field("image_transform", &self.image_transform)
            .field("link_target", &self.link_target)
            .field("class_name", &self.class_name)
            .field("include_source_position", &self.include_source_position)
            .field("include_raw_source_position", &self.include_raw_source_position)
            .field("include_element_index", &self.include_element_index)
            .field("raw_html", &self.raw_html)
            .finish()
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allowed_elements<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_elements = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn disallowed_elements<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.disallowed_elements = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn allow_element<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Element, usize, Option<&Element>) -> bool + Send + Sync + 'static,
    {
        self.allow_element = Some(Arc::new(predicate));
        self
    }

    pub fn unwrap_disallowed(mut self, unwrap: bool) -> Self {
        self.unwrap_disallowed = unwrap;
        self
    }

    pub fn components(mut self, components: ComponentRegistry) -> Self {
        self.components = components;
        self
    }

    pub fn link_transform(mut self, transform: UrlTransform) -> Self {
        self.link_transform = transform;
        self
    }

    pub fn image_transform(mut self, transform: UrlTransform) -> Self {
        self.image_transform = transform;
        self
    }

    pub fn link_target(mut self, target: impl Into<String>) -> Self {
        self.link_target = Some(target.into());
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn include_source_position(mut self, include: bool) -> Self {
        self.include_source_position = include;
        self
    }

    pub fn include_raw_source_position(mut self, include: bool) -> Self {
        self.include_raw_source_position = include;
        self
    }

    pub fn include_element_index(mut self, include: bool) -> Self {
        self.include_element_index = include;
        self
    }

    pub fn raw_html(mut self, policy: RawHtml) -> Self {
        self.raw_html = policy;
        self
    }

    pub fn markdown(mut self, markdown: MarkdownOptions) -> Self {
        self.markdown = markdown;
        self
    }
}
