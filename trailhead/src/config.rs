//! Configuration management using Figment
//!
//! Configuration is loaded from multiple sources with the following precedence (highest to lowest):
//! 1. Environment variables (prefix: TRAILHEAD_, nested keys separated by `__`)
//! 2. Current working directory: ./config.toml
//! 3. XDG config directory: ~/.config/trailhead/config.toml
//! 4. System directory: /etc/trailhead/config.toml
//! 5. Default values
//!
//! ```toml
//! [client]
//! base_url = "https://api.example.com/api/v1"
//! timeout_secs = 15
//!
//! [listing]
//! page_size = 10
//! ```

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::Result;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Backend client configuration
    pub client: ClientConfig,

    /// List view configuration
    #[serde(default)]
    pub listing: ListingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Session storage configuration
    #[serde(default)]
    pub session: SessionConfig,
}

/// Backend client configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the REST backend; resource paths are appended to it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds; 0 disables the timeout
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl ClientConfig {
    /// Per-request timeout, or `None` when disabled
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// List view configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ListingConfig {
    /// Rows per page for every management table. When unset each resource
    /// uses its own default.
    #[serde(default)]
    pub page_size: Option<u32>,
}

/// Log output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event
    #[default]
    Json,
    /// Human-readable multi-line output
    Pretty,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log filter directive (trace, debug, info, warn, error, or an EnvFilter expression)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Session storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SessionConfig {
    /// File holding the persisted session. When unset the session lives in memory only.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:8080/api/v1".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("trailhead/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from all sources
    ///
    /// Searches for config files in this order (first found wins):
    /// 1. Current working directory: ./config.toml
    /// 2. XDG config directory: ~/.config/trailhead/config.toml
    /// 3. System directory: /etc/trailhead/config.toml
    ///
    /// Environment variables (TRAILHEAD_ prefix) override all file-based configs.
    pub fn load() -> Result<Self> {
        let config_paths = Self::find_config_paths();

        tracing::debug!("Searching for config files in order:");
        for path in &config_paths {
            tracing::debug!("  - {}", path.display());
        }

        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Lowest priority first so higher priority files override
        for path in config_paths.iter().rev() {
            if path.exists() {
                tracing::info!("Loading configuration from: {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
        }

        figment = figment.merge(Env::prefixed("TRAILHEAD_").split("__"));

        let config = figment.extract()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    ///
    /// Bypasses the XDG and system directories. Environment variables still apply.
    pub fn load_from(path: &str) -> Result<Self> {
        let config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("TRAILHEAD_").split("__"))
            .extract()?;

        Ok(config)
    }

    /// Returns paths in priority order (highest first)
    fn find_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        let xdg_dirs = xdg::BaseDirectories::with_prefix("trailhead");
        if let Ok(path) = xdg_dirs.place_config_file("config.toml") {
            paths.push(path);
        }

        paths.push(PathBuf::from("/etc/trailhead/config.toml"));

        paths
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            listing: ListingConfig::default(),
            logging: LoggingConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.client.base_url, "http://localhost:8080/api/v1");
        assert_eq!(config.client.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.listing.page_size, None);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.session.path.is_none());
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[client]
base_url = "https://booking.example.com/api"
timeout_secs = 5

[listing]
page_size = 25

[logging]
format = "pretty"
"#
        )
        .unwrap();

        let config = Config::load_from(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.client.base_url, "https://booking.example.com/api");
        assert_eq!(config.client.timeout_secs, 5);
        assert_eq!(config.listing.page_size, Some(25));
        assert_eq!(config.logging.format, LogFormat::Pretty);
        // Untouched sections keep their defaults
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_zero_timeout_disables_timeout() {
        let client = ClientConfig {
            timeout_secs: 0,
            ..ClientConfig::default()
        };
        assert_eq!(client.timeout(), None);
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let config = Config::load_from("/nonexistent/trailhead/config.toml").unwrap();
        assert_eq!(config.client, ClientConfig::default());
    }

    #[test]
    fn test_environment_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "trailhead.toml",
                r#"
[client]
timeout_secs = 5
"#,
            )?;
            jail.set_env("TRAILHEAD_CLIENT__TIMEOUT_SECS", "12");
            jail.set_env("TRAILHEAD_LISTING__PAGE_SIZE", "50");

            let config = Config::load_from("trailhead.toml").map_err(|e| e.to_string())?;
            assert_eq!(config.client.timeout_secs, 12);
            assert_eq!(config.listing.page_size, Some(50));
            Ok(())
        });
    }
}
