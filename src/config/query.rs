//! Query defaults configuration module.
//!
//! This module defines the defaults used when a query does not specify its
//! own correction distance or result limit.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Largest correction distance accepted from configuration.
const MAX_CONFIGURED_DISTANCE: usize = 16;

/// Query defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuerySettings {
    /// Default maximum edit distance for correction queries
    pub max_distance: usize,

    /// Default cap on results for prefix and suffix queries (None for unlimited)
    pub result_limit: Option<usize>,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            max_distance: 2,
            result_limit: None,
        }
    }
}

impl Validate for QuerySettings {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_distance > MAX_CONFIGURED_DISTANCE {
            return Err(ConfigError::ValueOutOfRange {
                key: "query.max_distance".to_string(),
                message: format!("must be at most {MAX_CONFIGURED_DISTANCE}"),
            });
        }

        if self.result_limit == Some(0) {
            return Err(ConfigError::ValidationError(
                "result_limit must be greater than 0 when set".to_string(),
            ));
        }

        Ok(())
    }
}
