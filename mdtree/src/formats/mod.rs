//! Format implementations
//!
//! Input formats (markdown, html) produce element trees; output formats (json, html, treeviz)
//! serialize rendered output trees.

pub mod html;
pub mod json;
pub mod markdown;
pub mod treeviz;

pub use html::HtmlFormat;
pub use json::JsonFormat;
pub use markdown::MarkdownFormat;
pub use treeviz::TreevizFormat;
