//! Configuration types for taskrouter
//!
//! Defines the structure of `.taskrouter.toml` configuration.

use super::{ConfigError, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRouterConfig {
    /// Account credentials
    #[serde(default)]
    pub account: AccountConfig,

    /// API endpoint settings
    #[serde(default)]
    pub api: ApiConfig,
}

/// Account credentials section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Account sid (supports ${ENV_VAR} syntax)
    #[serde(default)]
    pub sid: String,

    /// Auth token (supports ${ENV_VAR} syntax)
    #[serde(default)]
    pub auth_token: String,
}

/// API endpoint section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL for the API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Records requested per list page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            page_size: default_page_size(),
        }
    }
}

impl TaskRouterConfig {
    /// Check that the configuration can authenticate
    ///
    /// Unexpanded `${VAR}` references count as missing. A zero timeout would
    /// fail every request, so it is rejected here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if is_unset(&self.account.sid) {
            return Err(ConfigError::Missing("account.sid".to_string()));
        }
        if is_unset(&self.account.auth_token) {
            return Err(ConfigError::Missing("account.auth_token".to_string()));
        }
        if self.api.base_url.is_empty() {
            return Err(ConfigError::Missing("api.base_url".to_string()));
        }
        if self.api.timeout == 0 {
            return Err(ConfigError::Invalid(
                "api.timeout must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }
}

fn is_unset(value: &str) -> bool {
    value.is_empty() || value.starts_with("${")
}
