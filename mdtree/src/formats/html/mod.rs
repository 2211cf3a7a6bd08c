//! HTML format implementation
//!
//! # Library Choice
//!
//! We use the `html5ever` + `markup5ever_rcdom` pair for both directions:
//! - `html5ever`: Browser-grade HTML5 parser from the Servo project
//! - `markup5ever_rcdom`: Reference-counted DOM tree implementation
//!
//! Parsing is used for trusted raw markup inside markdown and for HTML input files. Serialization
//! turns a rendered output tree back into markup.
//!
//! # Parameters
//!
//! `serialize_with_options` understands:
//! - `standalone`: `true` wraps the fragment in a complete document
//! - `title`: document title for standalone output

pub mod parser;
pub mod serializer;

use crate::error::FormatError;
use crate::format::Format;
use crate::output::OutputNode;
use crate::tree::Root;
use std::collections::HashMap;

pub use parser::{expand_raw, parse_fragment, parse_html};
pub use serializer::{serialize_to_html, serialize_to_html_with_options, HtmlOptions};

/// Format implementation for HTML
#[derive(Debug, Default)]
pub struct HtmlFormat;

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML5 fragment or document"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Root, FormatError> {
        Ok(parse_html(source))
    }

    fn serialize(&self, nodes: &[OutputNode]) -> Result<String, FormatError> {
        serialize_to_html(nodes)
    }

    fn serialize_with_options(
        &self,
        nodes: &[OutputNode],
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let mut html_options = HtmlOptions::default();
        for (key, value) in options {
            match key.as_str() {
                "standalone" => {
                    html_options.standalone = value.parse().map_err(|_| {
                        FormatError::SerializationError(format!(
                            "`standalone` expects true or false, got `{value}`"
                        ))
                    })?;
                }
                "title" => html_options.title = Some(value.clone()),
                other => {
                    return Err(FormatError::NotSupported(format!(
                        "Format 'html' has no parameter '{other}'"
                    )))
                }
            }
        }
        serialize_to_html_with_options(nodes, &html_options)
    }
}
