//! Read-only size and shape accounting.

use serde::Serialize;

use super::node::TrieNode;
use super::Trie;

/// A snapshot of a trie's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrieStats {
    /// Number of stored keys
    pub len: usize,
    /// Number of allocated nodes, root included
    pub node_count: usize,
    /// Length of the longest stored key
    pub height: usize,
    /// Approximate bytes owned by the node store
    pub mem_usage: usize,
    /// Structural generation
    pub generation: u64,
}

impl<V> Trie<V> {
    /// Approximate bytes owned by the node store.
    ///
    /// Counts the trie header (root included) plus, for every node, one label
    /// and one inline child slot per edge. Every non-root node sits in exactly
    /// one such slot, so the total grows by a fixed amount with each node
    /// created and shrinks by the same amount with each node pruned. Spare
    /// vector capacity and payload values are not counted.
    pub fn mem_usage(&self) -> usize {
        let mut total = std::mem::size_of::<Self>();
        let mut stack: Vec<&TrieNode<V>> = vec![&self.root];
        while let Some(node) = stack.pop() {
            total += node.edge_table_bytes();
            stack.extend(node.children().map(|(_, child)| child));
        }
        total
    }

    /// Length of the longest stored key, in scalar values.
    ///
    /// Pruning keeps every leaf valued, so this is the depth of the deepest node.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&TrieNode<V>, usize)> = vec![(&self.root, 0)];
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.children().map(|(_, child)| (child, depth + 1)));
        }
        height
    }

    /// Collects all counters at once.
    pub fn stats(&self) -> TrieStats {
        TrieStats {
            len: self.len(),
            node_count: self.node_count(),
            height: self.height(),
            mem_usage: self.mem_usage(),
            generation: self.generation(),
        }
    }
}
