//! Component registry: which output primitive renders each tag.
//!
//! An entry is either another tag name (`h1` rendered as `h2`, `a` as `my-link`) or a handler
//! function that receives the assembled props and returns the node that takes the element's
//! place. Tags without an entry render as themselves.

use crate::error::RenderError;
use crate::output::{OutputNode, Props};
use crate::tree::Element;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Everything a custom handler gets to see.
#[derive(Debug)]
pub struct ComponentProps<'a> {
    /// Tag of the element being rendered.
    pub tag: &'a str,
    pub props: Props,
    pub children: Option<Vec<OutputNode>>,
    /// The element as it appeared in the filtered tree.
    pub node: &'a Element,
}

pub type Handler = Arc<dyn Fn(ComponentProps<'_>) -> OutputNode + Send + Sync>;

#[derive(Clone)]
pub enum Component {
    Tag(String),
    Handler(Handler),
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Tag(tag) => f.debug_tuple("Tag").field(tag).finish(),
            Component::Handler(_) => f.write_str("Handler(..)"),
        }
    }
}

/// A registry entry after validation.
pub enum Resolved<'a> {
    Tag(&'a str),
    Handler(&'a Handler),
}

#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    components: HashMap<String, Component>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `tag` as the element `target`.
    pub fn register_tag(&mut self, tag: impl Into<String>, target: impl Into<String>) {
        self.components
            .insert(tag.into(), Component::Tag(target.into()));
    }

    pub fn register_handler<F>(&mut self, tag: impl Into<String>, handler: F)
    where
        F: Fn(ComponentProps<'_>) -> OutputNode + Send + Sync + 'static,
    {
        self.components
            .insert(tag.into(), Component::Handler(Arc::new(handler)));
    }

    pub fn insert(&mut self, tag: impl Into<String>, component: Component) {
        self.components.insert(tag.into(), component);
    }

    pub fn get(&self, tag: &str) -> Option<&Component> {
        self.components.get(tag)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Resolve the primitive for `tag`.
    ///
    /// Unmapped tags pass through as themselves. A mapped tag name that cannot be an element
    /// name is an error.
    pub fn resolve<'a>(&'a self, tag: &'a str) -> Result<Resolved<'a>, RenderError> {
        match self.components.get(tag) {
            None => Ok(Resolved::Tag(tag)),
            Some(Component::Handler(handler)) => Ok(Resolved::Handler(handler)),
            Some(Component::Tag(target)) if target.is_empty() => {
                Err(RenderError::InvalidComponent {
                    tag: tag.to_string(),
                    reason: "target tag name is empty".to_string(),
                })
            }
            Some(Component::Tag(target)) if !is_valid_tag_name(target) => {
                Err(RenderError::InvalidComponent {
                    tag: tag.to_string(),
                    reason: format!("`{target}` is not a valid element name"),
                })
            }
            Some(Component::Tag(target)) => Ok(Resolved::Tag(target)),
        }
    }
}

/// Element names start with an ASCII letter and contain no whitespace, `/`, `>` or quotes.
pub fn is_valid_tag_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| !c.is_whitespace() && !matches!(c, '/' | '>' | '<' | '"' | '\'' | '=' | '\0'))
}
