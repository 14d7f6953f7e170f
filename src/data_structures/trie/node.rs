//! Node implementation for the succinct trie.
//!
//! Each node owns its children inline in a single vector, next to a parallel
//! vector of edge labels kept in ascending order. There is no per-child box
//! and no parent pointer, so a node costs its two vector headers plus a value
//! slot. Lookups within a node binary-search the label table.

use std::sync::Arc;

/// A node in the trie.
///
/// The node represents the key spelled by the labels on the path from the root.
#[derive(Debug)]
pub struct TrieNode<V> {
    /// Edge labels, sorted ascending, parallel to `children`.
    labels: Vec<char>,

    /// Child nodes, `children[i]` sits behind `labels[i]`.
    children: Vec<TrieNode<V>>,

    /// Value stored for the key ending at this node.
    pub value: Option<Arc<V>>,
}

impl<V> TrieNode<V> {
    /// Creates a new empty trie node.
    pub fn new() -> Self {
        Self {
            labels: Vec::new(),
            children: Vec::new(),
            value: None,
        }
    }

    /// Returns the child behind `label`, if any.
    pub fn child(&self, label: char) -> Option<&TrieNode<V>> {
        self.labels
            .binary_search(&label)
            .ok()
            .map(|index| &self.children[index])
    }

    /// Returns the child behind `label` mutably, if any.
    pub fn child_mut(&mut self, label: char) -> Option<&mut TrieNode<V>> {
        match self.labels.binary_search(&label) {
            Ok(index) => Some(&mut self.children[index]),
            Err(_) => None,
        }
    }

    /// Returns the child behind `label`, creating it if needed.
    ///
    /// The flag is `true` when a new node was allocated.
    pub fn child_or_insert(&mut self, label: char) -> (&mut TrieNode<V>, bool) {
        match self.labels.binary_search(&label) {
            Ok(index) => (&mut self.children[index], false),
            Err(index) => {
                self.labels.insert(index, label);
                self.children.insert(index, TrieNode::new());
                (&mut self.children[index], true)
            }
        }
    }

    /// Detaches the child behind `label`, releasing its whole subtree.
    pub fn remove_child(&mut self, label: char) -> Option<TrieNode<V>> {
        let index = self.labels.binary_search(&label).ok()?;
        self.labels.remove(index);
        Some(self.children.remove(index))
    }

    /// Returns the child at position `index` in label order with its label.
    pub fn child_at(&self, index: usize) -> Option<(char, &TrieNode<V>)> {
        Some((*self.labels.get(index)?, self.children.get(index)?))
    }

    /// Iterates over `(label, child)` pairs in ascending label order.
    pub fn children(&self) -> impl Iterator<Item = (char, &TrieNode<V>)> + '_ {
        self.labels.iter().copied().zip(self.children.iter())
    }

    /// Whether the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.labels.is_empty()
    }

    /// Whether the node can be pruned: no value and no children.
    pub fn is_vacant(&self) -> bool {
        self.value.is_none() && self.is_leaf()
    }

    /// Bytes taken by this node's live edge entries, one label plus one
    /// inline child per edge. The children's own tables are not included.
    pub fn edge_table_bytes(&self) -> usize {
        self.labels.len() * std::mem::size_of::<char>()
            + self.children.len() * std::mem::size_of::<TrieNode<V>>()
    }
}

impl<V> Default for TrieNode<V> {
    fn default() -> Self {
        Self::new()
    }
}
