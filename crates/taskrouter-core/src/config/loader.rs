//! Configuration loader with environment variable expansion
//!
//! Loads configuration from `.taskrouter.toml` in the working directory or
//! the user config directory.

use super::types::TaskRouterConfig;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `${VAR}` references inside string values
const ENV_VAR_PATTERN: &str = r"\$\{([^}]+)\}";

/// Configuration loading error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("Missing required setting: {0}")]
    Missing(String),
}

/// Load configuration from various sources
///
/// Priority order:
/// 1. Project-level `.taskrouter.toml`
/// 2. User-level `~/.config/taskrouter/config.toml`
/// 3. Default configuration
///
/// Environment overrides apply on top of whichever source wins.
pub fn load_config(project_dir: &Path) -> Result<TaskRouterConfig, ConfigError> {
    let project_config = project_dir.join(".taskrouter.toml");
    if project_config.exists() {
        return load_from_file(&project_config);
    }

    if let Some(user_config) = get_user_config_path() {
        if user_config.exists() {
            return load_from_file(&user_config);
        }
    }

    debug!("No config file found, using defaults");
    Ok(apply_env_overrides(TaskRouterConfig::default()))
}

/// Get user config directory path
fn get_user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("taskrouter").join("config.toml"))
}

/// Load configuration from a specific file
pub fn load_from_file(path: &Path) -> Result<TaskRouterConfig, ConfigError> {
    debug!(path = %path.display(), "Loading config");
    let content = std::fs::read_to_string(path)?;
    let mut config: TaskRouterConfig = toml::from_str(&content)?;

    expand_env_vars(&mut config)?;

    Ok(apply_env_overrides(config))
}

/// Expand ${VAR} patterns in string values
fn expand_env_vars(config: &mut TaskRouterConfig) -> Result<(), ConfigError> {
    let env_regex = Regex::new(ENV_VAR_PATTERN).map_err(|e| ConfigError::Invalid(e.to_string()))?;

    config.account.sid = expand_string(&config.account.sid, &env_regex);
    config.account.auth_token = expand_string(&config.account.auth_token, &env_regex);
    config.api.base_url = expand_string(&config.api.base_url, &env_regex);

    Ok(())
}

/// Expand environment variables in a single string
///
/// Unknown variables are left in place so validation can report them.
fn expand_string(s: &str, regex: &Regex) -> String {
    regex
        .replace_all(s, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
}

/// Apply environment variable overrides
///
/// - TWILIO_ACCOUNT_SID -> account.sid
/// - TWILIO_AUTH_TOKEN -> account.auth_token
/// - TASKROUTER_BASE_URL -> api.base_url
fn apply_env_overrides(mut config: TaskRouterConfig) -> TaskRouterConfig {
    if let Some(sid) = non_empty_env("TWILIO_ACCOUNT_SID") {
        config.account.sid = sid;
    }

    if let Some(token) = non_empty_env("TWILIO_AUTH_TOKEN") {
        config.account.auth_token = token;
    }

    if let Some(url) = non_empty_env("TASKROUTER_BASE_URL") {
        config.api.base_url = url;
    }

    config
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Create a sample configuration file content
pub fn sample_config() -> &'static str {
    r#"# taskrouter configuration
# Place this file in your project root as .taskrouter.toml
# or in ~/.config/taskrouter/config.toml for global settings

[account]
sid = "${TWILIO_ACCOUNT_SID}"
auth_token = "${TWILIO_AUTH_TOKEN}"

[api]
base_url = "https://taskrouter.twilio.com/v1"

# Request timeout in seconds
timeout = 30

# Records requested per list page
page_size = 50
"#
}
