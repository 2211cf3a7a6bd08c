//! Error types for rendering and output formats

use thiserror::Error;

/// Fatal errors raised by the render pipeline. Either the full output tree is produced or one
/// of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// Both an allow-list and a deny-list were configured
    #[error("`allowed_elements` and `disallowed_elements` cannot be combined")]
    ConflictingFilters,
    /// A component registry entry cannot be rendered
    #[error("component for `{tag}` is not renderable: {reason}")]
    InvalidComponent { tag: String, reason: String },
}

/// Errors that can occur while serializing an output tree
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Format does not support the requested operation
    #[error("Operation not supported: {0}")]
    NotSupported(String),
}
