//! Ordered child insertion
//!
//! Parser actions build the tree bottom-up: each production creates its node
//! and then inserts the nodes of its right-hand side, left to right. The
//! insertion order is the only record of source layout the dump has, so it is
//! never reordered.

use super::errors::TreeError;
use super::node::SyntaxNode;
use tracing::{trace, warn};

impl SyntaxNode {
    /// Append `child` as the new last child of this node.
    pub fn append_child(&mut self, child: SyntaxNode) -> Result<(), TreeError> {
        if self.children.try_reserve(1).is_err() {
            return Err(TreeError::OutOfMemory {
                parent: self.name().to_string(),
                requested: self.children.len() + 1,
            });
        }
        trace!(
            parent = self.name(),
            child = child.name(),
            position = self.children.len(),
            "append child"
        );
        self.children.push(child);
        Ok(())
    }

    /// Builder form of [`SyntaxNode::append_child`] for grammar actions that
    /// assemble a whole production at once.
    pub fn with_children<I>(mut self, children: I) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = SyntaxNode>,
    {
        for child in children {
            self.append_child(child)?;
        }
        Ok(self)
    }
}

/// Insert `child` as the last child of `parent`.
///
/// Both sides are optional because parser actions hand over whatever their
/// sub-productions produced. A missing side is a contract violation and is
/// reported, the other side is left untouched.
pub fn insert(child: Option<SyntaxNode>, parent: Option<&mut SyntaxNode>) -> Result<(), TreeError> {
    match (child, parent) {
        (Some(child), Some(parent)) => parent.append_child(child),
        (Some(child), None) => {
            warn!(child = child.name(), "insert without a parent");
            Err(TreeError::MissingParent {
                child: child.name().to_string(),
            })
        }
        (None, Some(parent)) => {
            warn!(parent = parent.name(), "insert without a child");
            Err(TreeError::MissingChild {
                parent: parent.name().to_string(),
            })
        }
        (None, None) => {
            warn!("insert without a parent or a child");
            Err(TreeError::MissingParent {
                child: String::from("<none>"),
            })
        }
    }
}
