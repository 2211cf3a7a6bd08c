//! Format trait definition
//!
//! This module defines the core Format trait that all format implementations must implement.
//! Input formats parse source text into an element tree; output formats serialize a rendered
//! output tree. A format may do either or both.

use crate::error::FormatError;
use crate::output::OutputNode;
use crate::tree::Root;
use std::collections::HashMap;

/// Trait for document formats
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// impl Format for MyFormat {
///     fn name(&self) -> &str {
///         "my-format"
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn serialize(&self, nodes: &[OutputNode]) -> Result<String, FormatError> {
///         Ok(nodes.iter().map(OutputNode::text_content).collect())
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "markdown", "html", "json")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format (e.g., ["md", "markdown"])
    ///
    /// Returns a slice of file extensions without the leading dot.
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → element tree)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (output tree → text)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text into an element tree
    ///
    /// Default implementation returns NotSupported error.
    fn parse(&self, _source: &str) -> Result<Root, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a rendered output tree
    ///
    /// Default implementation returns NotSupported error.
    fn serialize(&self, _nodes: &[OutputNode]) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }

    /// Serialize with extra `key=value` parameters.
    ///
    /// Formats without parameters can rely on the default implementation, which delegates to
    /// [`Format::serialize`] and rejects any parameter.
    fn serialize_with_options(
        &self,
        nodes: &[OutputNode],
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        if options.is_empty() {
            self.serialize(nodes)
        } else {
            Err(FormatError::NotSupported(format!(
                "Format '{}' does not support extra parameters",
                self.name()
            )))
        }
    }
}
