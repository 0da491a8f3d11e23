//! Configuration module for taskrouter
//!
//! Handles loading and parsing of `.taskrouter.toml` configuration files
//! with support for environment variable expansion.

mod loader;
mod types;

pub use loader::{load_config, load_from_file, sample_config, ConfigError};
pub use types::{AccountConfig, ApiConfig, TaskRouterConfig};

/// Public TaskRouter API root
pub const DEFAULT_BASE_URL: &str = "https://taskrouter.twilio.com/v1";

/// Request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Records requested per list page
pub const DEFAULT_PAGE_SIZE: u32 = 50;
