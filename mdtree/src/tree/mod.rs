//! The element tree: nodes, positions and the definition table.

pub mod definitions;
pub mod nodes;

pub use definitions::{normalize_identifier, resolve_references, DefinitionEntry, DefinitionTable};
pub use nodes::{
    AttrValue, Definition, Element, Node, Point, Raw, Reference, ReferenceKind, Root, SourceSpan,
    Text,
};
