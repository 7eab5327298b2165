//! Summary counts over a tree

use super::node::{NodeKind, SyntaxNode};
use super::traverse::preorder;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub nodes: usize,
    pub leaves: usize,
    pub epsilons: usize,
    /// Deepest depth reached, root = 0
    pub max_depth: usize,
    pub by_label: FxHashMap<String, usize>,
}

impl TreeStats {
    pub fn collect(root: &SyntaxNode) -> Self {
        let mut stats = TreeStats::default();
        for (depth, node) in preorder(root) {
            stats.nodes += 1;
            stats.max_depth = stats.max_depth.max(depth);
            if node.kind().is_leaf() {
                stats.leaves += 1;
            } else if node.kind() == NodeKind::EpsilonNonTerminal {
                stats.epsilons += 1;
            }
            *stats.by_label.entry(node.name().to_string()).or_insert(0) += 1;
        }
        stats
    }

    /// Labels ordered by descending count, ties broken by name
    pub fn most_common(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut labels: Vec<(&str, usize)> = self
            .by_label
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        labels.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        labels.truncate(limit);
        labels
    }
}
