//! Element filtering
//!
//! Prunes the element tree before translation. Each element is judged once, in depth-first
//! pre-order:
//!
//!     1. An allow-list keeps only the listed tags; a deny-list removes the listed tags. At most
//!        one of the two may be configured.
//!     2. If the element survived step 1, the optional predicate may veto it.
//!     3. A removed element is either dropped with its subtree, or unwrapped: its children take
//!        its place in the parent, in order.
//!
//! After a removal the same index is visited again, so unwrapped children are judged by the
//! same rules as everything else. Filtering an already filtered tree is therefore a no-op.
//! Text, raw and definition nodes are never filtered.

use crate::error::RenderError;
use crate::tree::{Element, Node, Root};
use std::collections::HashSet;
use std::sync::Arc;

/// Predicate deciding whether an element may stay: `(element, index in parent, parent)`.
///
/// The parent is `None` for top-level elements. Returning `false` removes the element.
pub type AllowElement = Arc<dyn Fn(&Element, usize, Option<&Element>) -> bool + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum TagList {
    Allow(HashSet<String>),
    Deny(HashSet<String>),
}

/// A validated filter configuration.
#[derive(Clone, Default)]
pub struct ElementFilter {
    tags: Option<TagList>,
    allow_element: Option<AllowElement>,
    unwrap_disallowed: bool,
}

impl std::fmt::Debug for ElementFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementFilter")
            .field("tags", &self.tags)
            .field("allow_element", &self.allow_element.is_some())
            .field("unwrap_disallowed", &self.unwrap_disallowed)
            .finish()
    }
}

impl ElementFilter {
    /// Build a filter from an optional allow-list and an optional deny-list.
    ///
    /// Supplying both is a configuration error.
    pub fn new(
        allowed: Option<&[String]>,
        disallowed: Option<&[String]>,
    ) -> Result<Self, RenderError> {
        let tags = match (allowed, disallowed) {
            (Some(_), Some(_)) => return Err(RenderError::ConflictingFilters),
            (Some(allowed), None) => Some(TagList::Allow(allowed.iter().cloned().collect())),
            (None, Some(disallowed)) => {
                Some(TagList::Deny(disallowed.iter().cloned().collect()))
            }
            (None, None) => None,
        };
        Ok(Self {
            tags,
            allow_element: None,
            unwrap_disallowed: false,
        })
    }

    pub fn with_predicate(mut self, allow_element: Option<AllowElement>) -> Self {
        self.allow_element = allow_element;
        self
    }

    pub fn with_unwrap(mut self, unwrap_disallowed: bool) -> Self {
        self.unwrap_disallowed = unwrap_disallowed;
        self
    }

    /// True when the filter can never remove anything.
    pub fn is_noop(&self) -> bool {
        self.tags.is_none() && self.allow_element.is_none()
    }

    /// Filter the tree in place.
    pub fn apply(&self, root: &mut Root) {
        if self.is_noop() {
            return;
        }
        self.filter_children(root);
    }

    fn is_disallowed(&self, element: &Element, index: usize, parent: Option<&Element>) -> bool {
        let removed = match &self.tags {
            Some(TagList::Allow(allowed)) => !allowed.contains(&element.tag),
            Some(TagList::Deny(disallowed)) => disallowed.contains(&element.tag),
            None => false,
        };
        if removed {
            return true;
        }
        match &self.allow_element {
            Some(allow_element) => !allow_element(element, index, parent),
            None => false,
        }
    }

    fn filter_children<P: Parent>(&self, parent: &mut P) {
        let mut index = 0;
        while index < parent.children().len() {
            let remove = match &parent.children()[index] {
                Node::Element(element) => self.is_disallowed(element, index, parent.as_element()),
                _ => false,
            };

            if remove {
                if let Node::Element(element) = parent.children_mut().remove(index) {
                    log::trace!(
                        "removing <{}> at index {index} (unwrap: {})",
                        element.tag,
                        self.unwrap_disallowed
                    );
                    if self.unwrap_disallowed {
                        parent
                            .children_mut()
                            .splice(index..index, element.children);
                    }
                }
                // Replay the same index: it now holds the next sibling or a promoted child.
                continue;
            }

            if let Node::Element(element) = &mut parent.children_mut()[index] {
                self.filter_children(element);
            }
            index += 1;
        }
    }
}

/// Anything that owns an ordered child list.
trait Parent {
    fn children(&self) -> &[Node];
    fn children_mut(&mut self) -> &mut Vec<Node>;
    fn as_element(&self) -> Option<&Element>;
}

impl Parent for Root {
    fn children(&self) -> &[Node] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    fn as_element(&self) -> Option<&Element> {
        None
    }
}

impl Parent for Element {
    fn children(&self) -> &[Node] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    fn as_element(&self) -> Option<&Element> {
        Some(self)
    }
}
