//! Result store configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Result store configuration
///
/// The recorder is an optional extension; disabling it turns the resolved
/// path into pure pass-through with no persistence attempt.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Whether to persist resolved replies at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Redis connection URL; required when enabled
    #[serde(default)]
    pub redis_url: String,

    /// Time-to-live for stored results in seconds
    #[serde(default = "default_result_ttl")]
    pub result_ttl_secs: u64,
}

impl StoreConfig {
    /// Validate store configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.enabled {
            return Ok(());
        }
        if self.redis_url.is_empty() {
            return Err(ValidationError::MissingRequired("STORE_REDIS_URL"));
        }
        if !self.redis_url.starts_with("redis://") && !self.redis_url.starts_with("rediss://") {
            return Err(ValidationError::InvalidRedisUrl);
        }
        if self.result_ttl_secs == 0 {
            return Err(ValidationError::InvalidResultTtl);
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            redis_url: String::new(),
            result_ttl_secs: default_result_ttl(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_result_ttl() -> u64 {
    86_400
}
