//! Format registry for format discovery and selection
//!
//! This module provides a centralized registry for all available formats.
//! Formats can be registered and retrieved by name.

use crate::error::FormatError;
use crate::format::Format;
use crate::output::OutputNode;
use crate::tree::Root;
use std::collections::HashMap;

/// Registry of document formats
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::default();
/// let root = registry.parse("*hi*", "markdown")?;
/// let output = mdtree::render_tree(root, &Options::default())?;
/// let html = registry.serialize(&output, "html")?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format
    ///
    /// If a format with the same name already exists, it will be replaced.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Get a format by name
    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    /// Check if a format exists
    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// List `(name, description)` pairs of formats that can serialize output (sorted)
    pub fn list_output_formats(&self) -> Vec<(String, String)> {
        let mut formats: Vec<_> = self
            .formats
            .values()
            .filter(|format| format.supports_serialization())
            .map(|format| (format.name().to_string(), format.description().to_string()))
            .collect();
        formats.sort();
        formats
    }

    /// Detect format from filename based on file extension
    ///
    /// Returns the format name if a matching extension is found, or None otherwise.
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?;

        let mut names: Vec<_> = self
            .formats
            .values()
            .filter(|format| format.file_extensions().contains(&extension))
            .map(|format| format.name().to_string())
            .collect();
        names.sort();
        names.into_iter().next()
    }

    /// Parse source text into an element tree using the specified format
    pub fn parse(&self, source: &str, format: &str) -> Result<Root, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_parsing() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support parsing"
            )));
        }
        fmt.parse(source)
    }

    /// Serialize an output tree using the specified format
    pub fn serialize(&self, nodes: &[OutputNode], format: &str) -> Result<String, FormatError> {
        self.serialize_with_options(nodes, format, &HashMap::new())
    }

    /// Serialize an output tree using the specified format and options
    pub fn serialize_with_options(
        &self,
        nodes: &[OutputNode],
        format: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_serialization() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support serialization"
            )));
        }
        fmt.serialize_with_options(nodes, options)
    }

    /// Create a registry with default formats
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::formats::markdown::MarkdownFormat::default());
        registry.register(crate::formats::html::HtmlFormat);
        registry.register(crate::formats::json::JsonFormat);
        registry.register(crate::formats::treeviz::TreevizFormat);

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
