//! Triez Library
//!
//! This library contains a succinct, character-level trie mapping text keys
//! to shared values, together with the configuration and error handling
//! used by the `triez` binary.
//!
//! # Architecture
//!
//! The library is organized around the following components:
//! - `data_structures::trie`: the trie engine (mutation, prefix and suffix
//!   traversal, fuzzy correction search, diagnostics)
//! - `config`: layered configuration from files and environment variables
//! - `error`: crate-level error types and error reporting

use std::path::Path;

// Re-export public modules
pub mod config;
pub mod data_structures;
pub mod error;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

pub use data_structures::trie::{TraversalCursor, Trie, TrieConfig, TrieError, TrieKey, TrieResult};

/// Version information for triez.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library initialization function.
///
/// Loads the configuration from `config_path`, or from the default location
/// when `None`, and installs it as the global configuration. Only the first
/// successful call sets the global value.
pub fn init(config_path: Option<&Path>) -> error::TriezResult<config::TriezConfig> {
    let config = match config_path {
        Some(path) => config::ConfigLoader::new(Some(path), config::ENV_PREFIX).load()?,
        None => config::load_default_config()?,
    };

    config::init_global_config(config.clone());

    Ok(config)
}
