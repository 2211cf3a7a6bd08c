//! Markdown format implementation
//!
//! # Library Choice
//!
//! We use the `comrak` crate for Markdown parsing: CommonMark compliant, with the GFM
//! extensions (tables, strikethrough, autolinks, task lists, footnotes) built in.
//!
//! # Element Mapping Table
//!
//! | Markdown                | Element tree                                                    |
//! |-------------------------|-----------------------------------------------------------------|
//! | Paragraph               | `p` (unwrapped inside tight list items)                         |
//! | Heading                 | `h1`..`h6`                                                      |
//! | Block quote             | `blockquote`                                                    |
//! | List                    | `ul` / `ol` (`start` when not 1, `contains-task-list` class)    |
//! | List item               | `li`                                                            |
//! | Task item               | `li.task-list-item` starting with a disabled checkbox `input`   |
//! | Code block              | `pre > code.language-<info>`                                    |
//! | Thematic break          | `hr`                                                            |
//! | Table                   | `table > thead/tbody > tr > th/td`, `align` per column          |
//! | Inline code             | `code`                                                          |
//! | Emphasis / strong       | `em` / `strong`                                                 |
//! | Strikethrough           | `del`                                                           |
//! | Superscript             | `sup`                                                           |
//! | Link / image            | `a[href,title]` / `img[src,alt,title]`                          |
//! | Soft / hard break       | `"\n"` / `br` + `"\n"`                                          |
//! | HTML block / inline     | raw nodes                                                       |
//! | Footnote reference      | `sup > a[data-footnote-ref]`                                    |
//! | Footnote definitions    | trailing `section.footnotes[data-footnotes]`                    |
//! | Front matter            | dropped                                                         |
//!
//! Link reference definitions are resolved by comrak while parsing, so the lowered tree holds
//! plain `a`/`img` elements.

pub mod parser;

use crate::error::FormatError;
use crate::format::Format;
use crate::options::MarkdownOptions;
use crate::tree::Root;

pub use parser::parse_markdown;

/// Format implementation for Markdown
#[derive(Debug, Default)]
pub struct MarkdownFormat {
    pub options: MarkdownOptions,
}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "CommonMark Markdown with GFM extensions"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Root, FormatError> {
        Ok(parse_markdown(source, &self.options))
    }
}
