//! Trie engine configuration module.
//!
//! This module defines the settings applied to every trie the application
//! builds.

use super::{ConfigResult, Validate};
use crate::data_structures::trie::{TrieConfig, DEFAULT_MAX_KEY_LENGTH};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Trie engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrieSettings {
    /// Longest key accepted on insert, in scalar values
    pub max_key_length: usize,
}

impl Default for TrieSettings {
    fn default() -> Self {
        Self {
            max_key_length: DEFAULT_MAX_KEY_LENGTH,
        }
    }
}

impl Validate for TrieSettings {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_key_length == 0 {
            return Err(ConfigError::ValidationError(
                "max_key_length must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl TrieSettings {
    /// Builds the engine configuration from these settings.
    pub fn to_trie_config(&self) -> TrieConfig {
        TrieConfig::new().with_max_key_length(self.max_key_length)
    }
}
