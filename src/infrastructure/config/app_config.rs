//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::ImageCacheConfig;
use crate::infrastructure::image::HttpFetcherConfig;

pub(crate) const APP_NAME: &str = "teleview";
pub(crate) const APP_QUALIFIER: &str = "com";
pub(crate) const APP_ORGANIZATION: &str = "telemedicine";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, from file and CLI.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path. Logs go to stderr when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Image cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Network configuration.
    #[serde(default)]
    pub network: NetworkConfig,

    /// Bundled asset configuration.
    #[serde(default)]
    pub assets: AssetsConfig,
}

/// Image cache configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of decoded images kept. Unbounded when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_entries: Option<usize>,
}

/// Network configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Maximum simultaneous fetches. Unbounded when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_concurrent_fetches: Option<usize>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: None,
            max_concurrent_fetches: None,
        }
    }
}

/// Bundled asset configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Directory holding `<name>.png` assets such as `placeholder.png`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

fn default_timeout_secs() -> u64 {
    30
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(dir) = &args.assets_dir {
            self.assets.dir = Some(dir.clone());
        }
        if let Some(max_entries) = args.max_entries {
            self.cache.max_entries = Some(max_entries);
        }
        if let Some(timeout_secs) = args.timeout_secs {
            self.network.timeout_secs = timeout_secs;
        }
        if let Some(max_fetches) = args.max_concurrent_fetches {
            self.network.max_concurrent_fetches = Some(max_fetches);
        }
    }

    /// Settings for the HTTP fetcher.
    #[must_use]
    pub fn fetcher_config(&self) -> HttpFetcherConfig {
        let mut config = HttpFetcherConfig {
            timeout_secs: self.network.timeout_secs,
            ..HttpFetcherConfig::default()
        };
        if let Some(user_agent) = &self.network.user_agent {
            config.user_agent.clone_from(user_agent);
        }
        config
    }

    /// Settings for the image cache service.
    #[must_use]
    pub fn image_cache_config(&self) -> ImageCacheConfig {
        ImageCacheConfig {
            max_concurrent_fetches: self.network.max_concurrent_fetches,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            cache: CacheConfig::default(),
            network: NetworkConfig::default(),
            assets: AssetsConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_config_sections() {
        let toml_content = r#"
            log_level = "debug"

            [cache]
            max_entries = 64

            [network]
            timeout_secs = 5
            user_agent = "clinic-app/2.0"

            [assets]
            dir = "/opt/clinic/assets"
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.cache.max_entries, Some(64));
        assert_eq!(config.network.timeout_secs, 5);
        assert_eq!(config.network.max_concurrent_fetches, None);
        assert_eq!(
            config.assets.dir.as_deref(),
            Some(std::path::Path::new("/opt/clinic/assets"))
        );
        assert_eq!(config.fetcher_config().user_agent, "clinic-app/2.0");
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.cache.max_entries.is_none()); // unbounded
        assert_eq!(config.network.timeout_secs, 30);
        assert!(config.image_cache_config().max_concurrent_fetches.is_none());
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config: AppConfig = toml::from_str("[network]\ntimeout_secs = 5\n").unwrap();
        let args = CliArgs::parse_from([
            "teleview",
            "--timeout-secs",
            "12",
            "--max-entries",
            "3",
            "https://x/a.png",
        ]);

        config.merge_with_args(&args);

        assert_eq!(config.network.timeout_secs, 12);
        assert_eq!(config.cache.max_entries, Some(3));
        assert_eq!(config.fetcher_config().timeout_secs, 12);
    }
}
