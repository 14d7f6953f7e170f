//! Configuration for the succinct trie.

/// Default upper bound on key length, in scalar values.
pub const DEFAULT_MAX_KEY_LENGTH: usize = 1024;

/// Configuration for a [`Trie`](super::Trie).
///
/// Deletion recurses once per key scalar value and correction search once per
/// trie level. Stored keys are never longer than the maximum key length, so it
/// bounds both depths. Correction rows are as wide as the query, whose length
/// is not limited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrieConfig {
    /// Longest key accepted by `add`, in scalar values.
    max_key_length: usize,
}

impl TrieConfig {
    /// Create a new default configuration.
    ///
    /// Default values:
    /// - max_key_length: 1024
    pub fn new() -> Self {
        Self {
            max_key_length: DEFAULT_MAX_KEY_LENGTH,
        }
    }

    /// Set the longest key accepted by `add`.
    pub fn with_max_key_length(mut self, max_key_length: usize) -> Self {
        if max_key_length == 0 {
            panic!("Maximum key length must be greater than 0");
        }
        self.max_key_length = max_key_length;
        self
    }

    /// Get the longest key accepted by `add`.
    pub fn get_max_key_length(&self) -> usize {
        self.max_key_length
    }
}

impl Default for TrieConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::trie::{Trie, TrieError};

    #[test]
    fn test_default_config() {
        let config = TrieConfig::default();
        assert_eq!(config.get_max_key_length(), DEFAULT_MAX_KEY_LENGTH);
    }

    #[test]
    fn test_config_builder() {
        let config = TrieConfig::new().with_max_key_length(16);
        assert_eq!(config.get_max_key_length(), 16);
    }

    #[test]
    #[should_panic(expected = "Maximum key length must be greater than 0")]
    fn test_invalid_max_key_length() {
        let _config = TrieConfig::new().with_max_key_length(0);
    }

    #[test]
    fn test_limit_applies_to_stored_keys_only() {
        let mut trie: Trie<u8> = Trie::with_config(TrieConfig::new().with_max_key_length(2));
        trie.add("ab", 1).unwrap();

        let long = "abcdefgh";
        assert!(trie.search(long).is_err());
        assert!(matches!(trie.delete(long), Err(TrieError::NotFound(_))));
        assert_eq!(trie.corrections(long, Some(6)).unwrap().len(), 1);
        assert!(trie.corrections(long, Some(5)).unwrap().is_empty());
        assert_eq!(trie.height(), 2);
    }
}
