//! Error types for the succinct trie.
//!
//! This module defines the error types that can occur during trie operations.

/// Errors that can occur in trie operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrieError {
    /// The argument given as a key is not a valid scalar-value sequence.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// The key has no stored value.
    #[error("Key not found: {0}")]
    NotFound(String),

    /// The trie changed structurally after the cursor was created.
    #[error("Trie changed during iteration (cursor generation {created}, trie generation {current})")]
    StaleIterator {
        /// Generation observed when the cursor was created.
        created: u64,
        /// Generation of the trie at the time of the failed step.
        current: u64,
    },

    /// A cursor was driven against a trie other than the one that created it.
    #[error("Cursor does not belong to this trie")]
    ForeignCursor,

    /// The key is longer than the configured maximum.
    #[error("Key of length {length} exceeds maximum key length of {max_length}")]
    KeyTooLong {
        /// Length of the rejected key in scalar values.
        length: usize,
        /// The configured maximum.
        max_length: usize,
    },
}

/// Result type for trie operations.
pub type TrieResult<T> = Result<T, TrieError>;
