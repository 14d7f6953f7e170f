//! Succinct Trie Implementation
//!
//! This module provides a character-level trie mapping text keys to shared
//! payload values. Beyond exact lookup it answers three query families:
//!
//! * prefixes of a key that are themselves stored keys
//! * every stored key below a given prefix
//! * stored keys within a Damerau-Levenshtein distance of a key
//!
//! # Memory model
//!
//! Nodes own their children inline in sorted edge tables, so the whole structure is
//! released when the trie is dropped. Values are stored as `Arc<V>`; reads hand
//! out clones of that handle, which stay valid after the entry is deleted or
//! overwritten.
//!
//! # Concurrency
//!
//! The trie does no internal locking. Mutation takes `&mut self`; callers that
//! share a trie across threads wrap the whole structure in one lock.
//!
//! Cursors ([`TraversalCursor`]) do not borrow the trie. They capture its
//! structural generation and refuse to step once any node has been created or
//! pruned since.
//!
//! # Example
//!
//! ```
//! use triez_lib::data_structures::trie::Trie;
//!
//! let mut trie: Trie<u32> = Trie::new();
//! trie.add("tea", 1).unwrap();
//! trie.add("ten", 2).unwrap();
//!
//! assert_eq!(*trie.search("tea").unwrap(), 1);
//! assert!(trie.contains("ten"));
//! assert!(!trie.contains("te"));
//! assert_eq!(trie.suffixes("te", None).unwrap(), vec!["tea", "ten"]);
//! ```

mod config;
mod correction;
mod diagnostics;
mod error;
mod key;
mod node;
mod traversal;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, trace};

pub use config::{TrieConfig, DEFAULT_MAX_KEY_LENGTH};
pub use correction::Corrections;
pub use diagnostics::TrieStats;
pub use error::{TrieError, TrieResult};
pub use key::TrieKey;
pub use traversal::{CursorIter, TraversalCursor};
use node::TrieNode;

/// Source of process-unique trie identities, used to bind cursors.
static NEXT_TRIE_ID: AtomicU64 = AtomicU64::new(1);

/// A character-level trie with shared payload values.
///
/// Key features:
/// * Keys are sequences of Unicode scalar values, whatever encoding they arrive in
/// * O(key length) add, search and delete
/// * Vacant branches are pruned eagerly on delete
/// * Node count, key count and structural generation are O(1) reads
#[derive(Debug)]
pub struct Trie<V> {
    /// The root node, representing the empty key
    root: TrieNode<V>,

    /// Number of nodes holding a value
    len: usize,

    /// Number of allocated nodes, root included
    node_count: usize,

    /// Structural version, bumped once per node created or pruned
    generation: u64,

    /// Identity checked by cursors
    id: u64,

    /// Configuration options
    config: TrieConfig,
}

impl<V> Trie<V> {
    /// Creates a new empty `Trie` with default configuration.
    ///
    /// The new trie holds only its root: `node_count() == 1`, `len() == 0`.
    pub fn new() -> Self {
        Self::with_config(TrieConfig::default())
    }

    /// Creates a new empty `Trie` with the specified configuration.
    pub fn with_config(config: TrieConfig) -> Self {
        Self {
            root: TrieNode::new(),
            len: 0,
            node_count: 1,
            generation: 0,
            id: NEXT_TRIE_ID.fetch_add(1, Ordering::Relaxed),
            config,
        }
    }

    /// Returns the configuration this trie was created with.
    pub fn config(&self) -> &TrieConfig {
        &self.config
    }

    /// Inserts a key-value pair into the trie.
    ///
    /// Missing nodes along the key's path are created, each one bumping the
    /// node count and the generation. Replacing the value of an existing key
    /// changes neither.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to insert.
    /// * `value` - The value to associate with the key.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(previous))` - The key was present; `previous` is the replaced value.
    /// * `Ok(None)` - A new key was inserted.
    /// * `Err(TrieError)` - The key is malformed or too long; the trie is unchanged.
    pub fn add<K>(&mut self, key: &K, value: V) -> TrieResult<Option<Arc<V>>>
    where
        K: TrieKey + ?Sized,
    {
        self.add_shared(key, Arc::new(value))
    }

    /// Inserts an already shared value, so several keys or outside owners can
    /// hold the same allocation.
    pub fn add_shared<K>(&mut self, key: &K, value: Arc<V>) -> TrieResult<Option<Arc<V>>>
    where
        K: TrieKey + ?Sized,
    {
        let chars = key.scalars()?;
        let max_length = self.config.get_max_key_length();
        if chars.len() > max_length {
            return Err(TrieError::KeyTooLong {
                length: chars.len(),
                max_length,
            });
        }

        let mut created = 0usize;
        let mut node = &mut self.root;
        for &c in chars.iter() {
            let (child, is_new) = node.child_or_insert(c);
            created += usize::from(is_new);
            node = child;
        }
        let previous = node.value.replace(value);

        if previous.is_none() {
            self.len += 1;
        }
        if created > 0 {
            self.node_count += created;
            self.generation += created as u64;
            debug!(
                key_len = chars.len(),
                created,
                generation = self.generation,
                "trie nodes created"
            );
        }

        Ok(previous)
    }

    /// Retrieves the value stored for `key`.
    ///
    /// # Returns
    ///
    /// * `Ok(value)` - A shared handle to the stored value.
    /// * `Err(TrieError::NotFound)` - No value is stored for the key.
    /// * `Err(TrieError::InvalidKey)` - The key is malformed.
    pub fn search<K>(&self, key: &K) -> TrieResult<Arc<V>>
    where
        K: TrieKey + ?Sized,
    {
        let chars = key.scalars()?;
        self.find(&chars)
            .and_then(|node| node.value.clone())
            .ok_or_else(|| TrieError::NotFound(chars.iter().collect()))
    }

    /// Retrieves the value stored for `key`, reporting absence as `Ok(None)`.
    ///
    /// Malformed keys still fail with `TrieError::InvalidKey`.
    pub fn get<K>(&self, key: &K) -> TrieResult<Option<Arc<V>>>
    where
        K: TrieKey + ?Sized,
    {
        match self.search(key) {
            Ok(value) => Ok(Some(value)),
            Err(TrieError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Checks whether a value is stored for `key`.
    ///
    /// Unlike `search`, a malformed key is not an error here; it is simply
    /// not a member.
    pub fn contains<K>(&self, key: &K) -> bool
    where
        K: TrieKey + ?Sized,
    {
        let chars = match key.scalars() {
            Ok(chars) => chars,
            Err(e) => {
                trace!(error = %e, "membership test on malformed key");
                return false;
            }
        };
        self.find(&chars).is_some_and(|node| node.value.is_some())
    }

    /// Removes `key` from the trie and prunes the branch it leaves vacant.
    ///
    /// Pruning walks back up the key's path and stops at the root or at the
    /// first node that still holds a value or another child.
    ///
    /// # Returns
    ///
    /// * `Ok(value)` - The removed value.
    /// * `Err(TrieError::NotFound)` - No value is stored for the key; the trie is unchanged.
    /// * `Err(TrieError::InvalidKey)` - The key is malformed.
    pub fn delete<K>(&mut self, key: &K) -> TrieResult<Arc<V>>
    where
        K: TrieKey + ?Sized,
    {
        let chars = key.scalars()?;
        let mut pruned = 0usize;
        let removed = Self::delete_recursive(&mut self.root, &chars, &mut pruned)
            .ok_or_else(|| TrieError::NotFound(chars.iter().collect()))?;

        self.len -= 1;
        if pruned > 0 {
            self.node_count -= pruned;
            self.generation += pruned as u64;
            debug!(
                key_len = chars.len(),
                pruned,
                generation = self.generation,
                "trie nodes pruned"
            );
        }

        Ok(removed)
    }

    /// Clears the value at the end of `rest`, then drops every vacant child
    /// on the way back up. Nothing is touched when the key is absent.
    fn delete_recursive(node: &mut TrieNode<V>, rest: &[char], pruned: &mut usize) -> Option<Arc<V>> {
        let Some((&c, tail)) = rest.split_first() else {
            return node.value.take();
        };

        let child = node.child_mut(c)?;
        let removed = Self::delete_recursive(child, tail, pruned)?;
        if child.is_vacant() {
            node.remove_child(c);
            *pruned += 1;
        }
        Some(removed)
    }

    /// Inserts every entry of `entries`, stopping at the first failure.
    ///
    /// Entries inserted before the failure stay in the trie.
    ///
    /// # Returns
    ///
    /// The number of keys that were not present before.
    pub fn add_all<I, K>(&mut self, entries: I) -> TrieResult<usize>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
    {
        let mut inserted = 0;
        for (key, value) in entries {
            if self.add(key.as_ref(), value)?.is_none() {
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Checks if the trie holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of allocated nodes, root included.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Returns the structural generation.
    ///
    /// Only its changes are meaningful: it moves whenever a node is created or
    /// pruned and stays put for value-only updates.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Removes every key and releases every node but the root.
    pub fn clear(&mut self) {
        let released = self.node_count - 1;
        self.root = TrieNode::new();
        self.len = 0;
        self.node_count = 1;
        if released > 0 {
            self.generation += released as u64;
        }
        debug!(released, generation = self.generation, "trie cleared");
    }

    /// Walks `chars` from the root.
    fn find(&self, chars: &[char]) -> Option<&TrieNode<V>> {
        chars.iter().try_fold(&self.root, |node, &c| node.child(c))
    }
}

impl<V> Default for Trie<V> {
    fn default() -> Self {
        Self::new()
    }
}
