//! NLU runtime configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// NLU runtime configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NluConfig {
    /// Which runtime flavor to call
    #[serde(default)]
    pub provider: NluProvider,

    /// API key for the runtime's gateway
    pub api_key: Option<String>,

    /// Base URL (Lex-shaped runtime) or full endpoint URL (LLM endpoint)
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// NLU runtime flavor
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NluProvider {
    /// Lex-V2-shaped recognize-text endpoint
    #[default]
    Lex,
    /// Hosted LLM generation endpoint
    LlmEndpoint,
}

impl NluConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the configured API key, or empty when the gateway does not
    /// require one
    pub fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }

    /// Validate NLU configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("NLU_BASE_URL"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidNluUrl);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_timeout() -> u64 {
    30
}
