//! Client configuration
//!
//! Loaded from `config.toml` in the working directory when present, then
//! overridden by environment variables. A malformed file falls back to
//! defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const CONFIG_FILE_PATH: &str = "config.toml";

/// Default backend base path
pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the todo REST API
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// HTTP proxy, empty means unset
    #[serde(default)]
    pub http_proxy: String,

    /// HTTPS proxy, empty means unset
    #[serde(default)]
    pub https_proxy: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Where UI session files live; platform data dir when unset
    #[serde(default)]
    pub session_dir: Option<PathBuf>,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn parse_u64_env(value: &str) -> Option<u64> {
    value.trim().parse().ok()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            http_proxy: String::new(),
            https_proxy: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            session_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from `config.toml` and the environment
    pub fn load() -> Self {
        let mut config = Config::default();

        if std::path::Path::new(CONFIG_FILE_PATH).exists() {
            if let Ok(content) = std::fs::read_to_string(CONFIG_FILE_PATH) {
                if let Ok(file_config) = toml::from_str::<Config>(&content) {
                    config = file_config;
                }
            }
        }

        // Override with environment variables if they exist
        if let Ok(api_base) = std::env::var("API_BASE") {
            config.api_base = api_base;
        }
        if let Ok(http_proxy) = std::env::var("HTTP_PROXY") {
            config.http_proxy = http_proxy;
        }
        if let Ok(https_proxy) = std::env::var("HTTPS_PROXY") {
            config.https_proxy = https_proxy;
        }
        if let Ok(timeout) = std::env::var("TODO_TIMEOUT_SECS") {
            if let Some(secs) = parse_u64_env(&timeout) {
                config.timeout_secs = secs;
            }
        }
        if let Ok(dir) = std::env::var("TODO_SESSION_DIR") {
            config.session_dir = Some(PathBuf::from(dir));
        }
        config
    }

    /// Directory for UI session files, falling back to the platform data dir
    pub fn resolved_session_dir(&self) -> PathBuf {
        if let Some(dir) = &self.session_dir {
            return dir.clone();
        }
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("todo-cli")
    }
}
