//! Depth-first preorder traversal

use super::errors::TreeError;
use super::node::SyntaxNode;
use super::printer::{print_node, DumpConfig};
use std::io::Write;
use tracing::debug;

/// Iterator over a subtree in preorder, yielding `(depth, node)`.
///
/// The start node has depth 0; children are visited in insertion order.
pub struct Preorder<'a> {
    stack: Vec<(usize, &'a SyntaxNode)>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = (usize, &'a SyntaxNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children().iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

pub fn preorder(root: &SyntaxNode) -> Preorder<'_> {
    Preorder {
        stack: vec![(0, root)],
    }
}

/// Dump the tree rooted at `root` to `out`.
///
/// Does nothing when `root` is `None` or the dump is disabled. Returns the
/// number of nodes visited.
pub fn traverse<W: Write>(
    root: Option<&SyntaxNode>,
    config: DumpConfig,
    out: &mut W,
) -> Result<usize, TreeError> {
    let Some(root) = root else {
        return Ok(0);
    };
    if !config.enabled {
        return Ok(0);
    }

    let mut visited = 0;
    for (depth, node) in preorder(root) {
        print_node(out, node, depth, config.verbose)?;
        visited += 1;
    }
    out.flush()?;

    debug!(root = root.name(), visited, "tree dumped");
    Ok(visited)
}
