use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Controller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API configuration
    pub api: ApiConfig,
    /// List view defaults
    #[serde(default)]
    pub list: ListConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the back-office API (default: "http://127.0.0.1:8080")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Defaults applied to every list controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    /// Default page size (default: 10)
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Search debounce delay in milliseconds (default: 500)
    #[serde(default = "default_debounce_ms")]
    pub search_debounce_ms: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_page_size() -> u32 {
    10
}

fn default_debounce_ms() -> u64 {
    500
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            search_debounce_ms: default_debounce_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            list: ListConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, environment, and CLI arguments
    pub fn load(
        config_path: Option<&PathBuf>,
        cli_base_url: Option<&str>,
        cli_page_size: Option<u32>,
    ) -> anyhow::Result<Self> {
        // Start with default config
        let mut config = if let Some(path) = config_path {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)?
        } else {
            // Try default config file
            if let Ok(content) = std::fs::read_to_string("teller.toml") {
                toml::from_str(&content)?
            } else {
                Config::default()
            }
        };

        // Override with environment variables
        if let Ok(url) = std::env::var("TELLER_BASE_URL") {
            config.api.base_url = url;
        }
        if let Ok(timeout) = std::env::var("TELLER_TIMEOUT_SECS") {
            if let Ok(t) = timeout.parse() {
                config.api.timeout_secs = t;
            }
        }
        if let Ok(size) = std::env::var("TELLER_PAGE_SIZE") {
            if let Ok(s) = size.parse() {
                config.list.page_size = s;
            }
        }

        // Override with CLI arguments
        if let Some(url) = cli_base_url {
            config.api.base_url = url.to_string();
        }
        if let Some(size) = cli_page_size {
            config.list.page_size = size;
        }

        Ok(config)
    }

    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Search debounce delay as a [`Duration`].
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.list.search_debounce_ms)
    }
}
