//! Structural introspection for the index.
//!
//! Walks the tree and tallies node counts and occupancy per capacity class.
//! Tests use this to verify growth behavior and class mix without poking at
//! node internals.

use std::collections::HashMap;

use crate::node::Node;

#[derive(Debug, Default)]
pub struct NodeStats {
    /// Capacity of the class: 4, 16, 48 or 256.
    pub width: usize,
    pub total_nodes: usize,
    pub total_children: usize,
}

#[derive(Debug, Default)]
pub struct TreeStats {
    /// Per-class tallies, keyed by class name ("Node4" .. "Node256").
    pub node_stats: HashMap<&'static str, NodeStats>,
    pub num_leaves: usize,
    pub num_inner_nodes: usize,
    pub max_height: usize,
}

pub(crate) fn collect<V>(root: Option<&Node<V>>) -> TreeStats {
    let mut stats = TreeStats::default();
    if let Some(root) = root {
        collect_recurse(root, &mut stats, 1);
        stats.num_inner_nodes = stats.node_stats.values().map(|ns| ns.total_nodes).sum();
    }
    stats
}

fn collect_recurse<V>(node: &Node<V>, stats: &mut TreeStats, height: usize) {
    if height > stats.max_height {
        stats.max_height = height;
    }
    match node {
        Node::Leaf(_) => {
            stats.num_leaves += 1;
        }
        Node::Inner(inner) => {
            let entry = stats.node_stats.entry(inner.class_name()).or_default();
            entry.width = inner.capacity();
            entry.total_nodes += 1;
            entry.total_children += inner.num_children();

            for (_, child) in inner.iter() {
                collect_recurse(child, stats, height + 1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::key::Key;
    use crate::tree::ArtIndex;

    #[test]
    fn empty_tree_has_no_stats() {
        let index = ArtIndex::new();
        let stats = index.stats();
        assert_eq!(stats.num_leaves, 0);
        assert_eq!(stats.num_inner_nodes, 0);
        assert_eq!(stats.max_height, 0);
    }

    #[test]
    fn single_leaf_tree() {
        let mut index = ArtIndex::new();
        index.insert(&Key::from(1u64), 1);
        let stats = index.stats();
        assert_eq!(stats.num_leaves, 1);
        assert_eq!(stats.num_inner_nodes, 0);
        assert_eq!(stats.max_height, 1);
    }

    #[test]
    fn class_mix_over_a_dense_run() {
        let mut index = ArtIndex::new();
        for k in 1..=300u64 {
            index.insert(&k.into(), k);
        }
        let stats = index.stats();
        assert_eq!(stats.num_leaves, 300);

        // Keys 1..=255 share a 7-byte zero prefix and fan out on the last
        // byte; 256..=300 forced a split at byte 6. The result is one root
        // Node4, one full Node256 and one Node48 holding the 256..=300 tail.
        assert_eq!(stats.node_stats["Node4"].total_nodes, 1);
        assert_eq!(stats.node_stats["Node256"].total_nodes, 1);
        assert_eq!(stats.node_stats["Node256"].total_children, 255);
        assert_eq!(stats.node_stats["Node48"].total_nodes, 1);
        assert_eq!(stats.node_stats["Node48"].total_children, 45);
        assert_eq!(stats.max_height, 3);
    }
}
