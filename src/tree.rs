//! The Adaptive Radix Tree index engine.
//!
//! This module contains [`ArtIndex`], the insert/lookup traversal over the
//! node classes in [`crate::node`].

use crate::key::{Key, INVALID_VALUE};
use crate::node::{InnerNode, Leaf, Node};
use crate::prefix::Prefix;
use crate::stats::{self, TreeStats};

/// An in-memory ordered index mapping fixed-width byte keys to `u64` values,
/// backed by an Adaptive Radix Tree.
///
/// Inner nodes adapt their representation to their fan-out (4, 16, 48 or 256
/// children), paths with no branching are compressed into per-node prefixes,
/// and single-key paths are not materialized at all until a second key
/// diverges from them.
///
/// The value `0` is reserved as the "absent" sentinel ([`INVALID_VALUE`]):
/// [`lookup`](Self::lookup) returns it for keys that were never inserted, and
/// [`insert`](Self::insert) rejects it at the boundary.
///
/// ## Examples
///
/// ```rust
/// use art_index::{ArtIndex, Key, INVALID_VALUE};
///
/// let mut index = ArtIndex::new();
/// assert!(index.insert(&Key::from(42u64), 7));
/// assert_eq!(index.lookup(&Key::from(42u64)), 7);
/// assert_eq!(index.lookup(&Key::from(43u64)), INVALID_VALUE);
/// ```
pub struct ArtIndex {
    root: Option<Node<u64>>,
}

impl Default for ArtIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self { root: None }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Load `value` into the tree for `key`.
    ///
    /// Returns `true` on success. Passing the reserved [`INVALID_VALUE`] is a
    /// boundary violation: the call returns `false` and the tree is left
    /// untouched. Inserting a key that is already present overwrites its
    /// value in place (see DESIGN.md for the duplicate-key policy).
    pub fn insert(&mut self, key: &Key, value: u64) -> bool {
        if value == INVALID_VALUE {
            return false;
        }

        match &mut self.root {
            None => {
                self.root = Some(Node::Leaf(Leaf::new(*key, value)));
                true
            }
            Some(root) => Self::insert_recurse(root, key, value, 0),
        }
    }

    /// Search for `key`. Returns the stored value, or [`INVALID_VALUE`] if
    /// the key is absent.
    pub fn lookup(&self, key: &Key) -> u64 {
        let Some(mut cur_node) = self.root.as_ref() else {
            return INVALID_VALUE;
        };

        let mut depth = 0;
        loop {
            match cur_node {
                Node::Leaf(leaf) => {
                    // The leaf's stored key is the source of truth; comparing
                    // the whole key keeps the traversal free to skip per-node
                    // prefix bytes without losing correctness.
                    if leaf.key == *key {
                        return leaf.value;
                    }
                    return INVALID_VALUE;
                }
                Node::Inner(inner) => {
                    if inner.prefix.common_length_with_key(key, depth) != inner.prefix.len() {
                        return INVALID_VALUE;
                    }
                    depth += inner.prefix.len();
                    let Some(child) = inner.child(key.at(depth)) else {
                        return INVALID_VALUE;
                    };
                    depth += 1;
                    cur_node = child;
                }
            }
        }
    }

    /// The root node, for external structural inspection. Not part of the
    /// functional contract.
    pub fn root(&self) -> Option<&Node<u64>> {
        self.root.as_ref()
    }

    /// Per-class node counts and occupancy for the whole tree.
    pub fn stats(&self) -> TreeStats {
        stats::collect(self.root.as_ref())
    }

    fn insert_recurse(cur_node: &mut Node<u64>, key: &Key, value: u64, depth: usize) -> bool {
        match cur_node {
            Node::Leaf(leaf) => {
                if leaf.key == *key {
                    // Duplicate key: overwrite in place, shape untouched.
                    leaf.value = value;
                    return true;
                }

                // Lazy expansion: two keys now collide on a path that was
                // never split. Push both leaves under a new inner node whose
                // prefix is their common run from this depth.
                let run = key.common_prefix_length(&leaf.key, depth);
                let old_key_byte = leaf.key.at(depth + run);
                let new_key_byte = key.at(depth + run);

                let split = InnerNode::new(Prefix::from_key_range(key, depth, run));
                let old_leaf = std::mem::replace(cur_node, Node::Inner(split));
                let Node::Inner(inner) = cur_node else {
                    unreachable!()
                };
                inner.add_child(old_key_byte, old_leaf);
                inner.add_child(new_key_byte, Node::Leaf(Leaf::new(*key, value)));
                true
            }
            Node::Inner(inner) => {
                let lcp = inner.prefix.common_length_with_key(key, depth);

                if lcp < inner.prefix.len() {
                    // The key diverges inside this node's compressed run.
                    // Split the run: a new inner node keeps the matched head,
                    // the old node keeps the tail past the diverging byte.
                    let matched = inner.prefix.truncated_before(lcp);
                    let old_node_byte = inner.prefix.at(lcp);
                    let new_key_byte = key.at(depth + lcp);
                    inner.prefix = inner.prefix.truncated_after(lcp + 1);

                    let old_node = std::mem::replace(cur_node, Node::Inner(InnerNode::new(matched)));
                    let Node::Inner(split) = cur_node else {
                        unreachable!()
                    };
                    split.add_child(old_node_byte, old_node);
                    split.add_child(new_key_byte, Node::Leaf(Leaf::new(*key, value)));
                    return true;
                }

                // Prefix fully matched; descend on the next key byte.
                let next_depth = depth + inner.prefix.len();
                let next_byte = key.at(next_depth);

                if let Some(child) = inner.seek_child_mut(next_byte) {
                    return Self::insert_recurse(child, key, value, next_depth + 1);
                }

                // No child for this byte yet; add_child upgrades the node
                // class first if the current one is at capacity.
                inner.add_child(next_byte, Node::Leaf(Leaf::new(*key, value)));
                true
            }
        }
    }
}
