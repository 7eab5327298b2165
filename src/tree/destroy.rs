//! Tree teardown
//!
//! Destruction consumes the root, so a destroyed tree cannot be reached or
//! destroyed a second time. Nodes are released post-order: every child is
//! released before its parent, siblings left to right.

use super::node::SyntaxNode;
use std::mem;
use tracing::debug;

/// Release every node of the tree rooted at `root`.
///
/// Returns the number of released nodes; `None` releases nothing.
pub fn destroy(root: Option<SyntaxNode>) -> usize {
    destroy_with(root, |_| {})
}

/// Like [`destroy`], calling `on_release` on each node right before it is
/// released. The node's children have already been released at that point.
pub fn destroy_with<F>(root: Option<SyntaxNode>, mut on_release: F) -> usize
where
    F: FnMut(&SyntaxNode),
{
    let Some(root) = root else {
        return 0;
    };
    let root_name = root.name().to_string();

    // (node, children already scheduled)
    let mut stack: Vec<(SyntaxNode, bool)> = vec![(root, false)];
    let mut released = 0;

    while let Some((mut node, expanded)) = stack.pop() {
        if !expanded && !node.children.is_empty() {
            let children = mem::take(&mut node.children);
            stack.push((node, true));
            stack.extend(children.into_iter().rev().map(|child| (child, false)));
            continue;
        }
        on_release(&node);
        released += 1;
    }

    debug!(root = %root_name, released, "tree destroyed");
    released
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destroy_none_is_noop() {
        assert_eq!(destroy(None), 0);
        let mut calls = 0;
        assert_eq!(destroy_with(None, |_| calls += 1), 0);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_destroy_single_node() {
        assert_eq!(destroy(Some(SyntaxNode::token("SEMI", 1))), 1);
    }

    #[test]
    fn test_destroy_releases_children_first() {
        let mut a = SyntaxNode::non_terminal("A", 1);
        a.append_child(SyntaxNode::identifier("d", 1)).unwrap();
        let root = SyntaxNode::non_terminal("R", 1)
            .with_children([a, SyntaxNode::token("B", 2)])
            .unwrap();

        let mut order = Vec::new();
        let released = destroy_with(Some(root), |n| order.push(n.name().to_string()));
        assert_eq!(released, 4);
        assert_eq!(order, vec!["ID", "A", "B", "R"]);
    }

    #[test]
    fn test_destroy_wide_and_deep() {
        let mut root = SyntaxNode::non_terminal("StmtList", 1);
        for line in 0..1000 {
            let mut stmt = SyntaxNode::non_terminal("Stmt", line);
            stmt.append_child(SyntaxNode::token("SEMI", line)).unwrap();
            root.append_child(stmt).unwrap();
        }
        let expected = root.subtree_size();
        assert_eq!(expected, 2001);
        assert_eq!(destroy(Some(root)), expected);
    }
}
