//! Data structures for triez.
//!
//! This module contains the succinct trie engine. The engine is a
//! single-owner structure: it performs no internal locking and leaves
//! serialization of shared access to its caller.

pub mod trie;

// Re-export common data structures
pub use trie::{Trie, TrieError, TrieResult};
