//! Markdown to sanitized element trees
//!
//!     This crate turns CommonMark/GFM markdown into a tree of output elements that a UI layer
//!     can bind to its own components, without ever producing an HTML string on the way. Every
//!     element passes through the same filter, URL sanitizer and property mapping, whether it came
//!     from markdown syntax or from (trusted) raw markup.
//!
//!     This is a pure lib: no printing, no env vars, no file access. The mdtree-cli crate is the
//!     shell around it.
//!
//! Pipeline
//!
//!     markdown ─comrak→ element tree ─raw expansion→ ─reference resolution→ ─filter→ ─translate→ output
//!
//!     1. formats::markdown lowers the comrak AST into an element tree (tree::nodes), the
//!        HTML-shaped intermediate representation.
//!     2. With `RawHtml::Trust`, raw markup nodes are parsed by formats::html into elements.
//!     3. tree::definitions resolves reference nodes against the definition table.
//!     4. filter prunes the tree in place (allow-list, deny-list, predicate, unwrap).
//!     5. translate walks the tree once, calling props (attribute mapping), sanitize (URLs) and
//!        annotate (structural props), and resolves each tag through the component registry.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── options.rs              # Render options
//!     ├── tree                    # Element tree and definition table
//!     ├── filter.rs               # Element filter
//!     ├── sanitize.rs             # URL sanitizer
//!     ├── props                   # Attribute schema, style parsing
//!     ├── annotate.rs             # Structural annotations
//!     ├── components.rs           # Component registry
//!     ├── translate.rs            # Element tree → output tree
//!     ├── output.rs               # Output tree
//!     ├── deprecation.rs          # Deprecated option names
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     └── formats
//!         ├── markdown            # comrak lowering
//!         ├── html                # html5ever parsing and serialization
//!         ├── json
//!         └── treeviz
//!
//! Testing
//!     tests
//!     ├── lib.rs                  # gathers the modules below
//!     ├── common                  # output tree walkers, echo handler
//!     ├── markdown                # pipeline, filtering, annotations
//!     ├── html                    # serialized output, raw markup policies
//!     └── sanitize                # URL sanitizer properties
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include
//!     these in the lib.
//!
//! Errors
//!
//!     Configuration problems are the only fatal errors: both an allow- and a deny-list, or a
//!     component entry that cannot be rendered. Everything else degrades: unsafe URLs become an
//!     inert placeholder, malformed styles an empty map, unknown positions empty coordinates.

pub mod annotate;
pub mod components;
pub mod deprecation;
pub mod error;
pub mod filter;
pub mod format;
pub mod formats;
pub mod options;
pub mod output;
pub mod props;
pub mod registry;
pub mod sanitize;
pub mod translate;
pub mod tree;

pub use components::{Component, ComponentProps, ComponentRegistry, Handler};
pub use deprecation::{check_deprecated, Deprecation};
pub use error::{FormatError, RenderError};
pub use filter::{AllowElement, ElementFilter};
pub use format::Format;
pub use options::{MarkdownOptions, Options, RawHtml, UrlContext, UrlTransform};
pub use output::{OutputElement, OutputNode, PropValue, Props};
pub use registry::FormatRegistry;
pub use sanitize::sanitize_url;
pub use tree::{Element, Node, Root};

use translate::Translator;
use tree::{resolve_references, DefinitionTable};

/// Render markdown into an output tree.
pub fn render(markdown: &str, options: &Options) -> Result<Vec<OutputNode>, RenderError> {
    let filter = build_filter(options)?;
    let root = parse(markdown, &options.markdown);
    run(root, &filter, options)
}

/// Lower markdown into an element tree without rendering it.
pub fn parse(markdown: &str, options: &MarkdownOptions) -> Root {
    formats::markdown::parse_markdown(markdown, options)
}

/// Render an element tree built elsewhere. The tree is consumed.
pub fn render_tree(root: Root, options: &Options) -> Result<Vec<OutputNode>, RenderError> {
    let filter = build_filter(options)?;
    run(root, &filter, options)
}

fn build_filter(options: &Options) -> Result<ElementFilter, RenderError> {
    Ok(ElementFilter::new(
        options.allowed_elements.as_deref(),
        options.disallowed_elements.as_deref(),
    )?
    .with_predicate(options.allow_element.clone())
    .with_unwrap(options.unwrap_disallowed))
}

fn run(
    mut root: Root,
    filter: &ElementFilter,
    options: &Options,
) -> Result<Vec<OutputNode>, RenderError> {
    if options.raw_html == RawHtml::Trust {
        formats::html::expand_raw(&mut root);
    }

    let definitions = DefinitionTable::collect(&root);
    log::debug!("collected {} definitions", definitions.len());
    resolve_references(&mut root, &definitions);

    filter.apply(&mut root);
    log::debug!("filtered tree has {} top-level nodes", root.children.len());

    Translator::new(options).translate(&root)
}
