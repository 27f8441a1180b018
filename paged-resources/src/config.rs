//! Configuration management using Figment
//!
//! Configuration is loaded from multiple sources with the following precedence (highest to lowest):
//! 1. Environment variables (prefix: `PAGED_`, nested keys separated by `__`)
//! 2. A TOML file (`./config.toml` unless a path is given)
//! 3. Default values
//!
//! ```toml
//! [service]
//! name = "users-api"
//! log_level = "debug"
//!
//! [paging]
//! default_page_size = 50
//! max_page_size = 500
//! ```

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::paging::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

const ENV_PREFIX: &str = "PAGED_";
const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Service configuration
    #[serde(default)]
    pub service: ServiceConfig,

    /// Paging defaults and query parameter names
    #[serde(default)]
    pub paging: PagingConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Service name
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Log level or filter directive (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

/// Paging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PagingConfig {
    /// Page size used when a request does not name one
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Largest page size a request may ask for
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,

    /// Query parameter carrying the page index
    #[serde(default = "default_page_param")]
    pub page_param: String,

    /// Query parameter carrying the page size
    #[serde(default = "default_size_param")]
    pub size_param: String,

    /// Query parameter carrying each sort order
    #[serde(default = "default_sort_param")]
    pub sort_param: String,
}

impl PagingConfig {
    /// Clamp a requested size into `1..=max_page_size`
    #[must_use]
    pub fn clamp_size(&self, size: u32) -> u32 {
        size.clamp(1, self.max_page_size.max(1))
    }

    /// Whether `key` is one of the paging parameters
    #[must_use]
    pub fn is_paging_param(&self, key: &str) -> bool {
        key == self.page_param || key == self.size_param || key == self.sort_param
    }
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            page_param: default_page_param(),
            size_param: default_size_param(),
            sort_param: default_sort_param(),
        }
    }
}

fn default_service_name() -> String {
    "paged-resources".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_max_page_size() -> u32 {
    MAX_PAGE_SIZE
}

fn default_page_param() -> String {
    "page".to_string()
}

fn default_size_param() -> String {
    "size".to_string()
}

fn default_sort_param() -> String {
    "sort".to_string()
}

impl Config {
    /// Load configuration from `./config.toml` and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from a specific file
    ///
    /// A missing file is not an error; defaults and environment variables
    /// still apply.
    pub fn load_from(path: &str) -> Result<Self> {
        tracing::debug!("Loading configuration from: {}", path);

        let config = Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Config::default()))
            // Load from config file (if exists)
            .merge(Toml::file(path))
            // Override with environment variables
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.service.name, "paged-resources");
        assert_eq!(config.service.log_level, "info");
        assert_eq!(config.paging.default_page_size, 20);
        assert_eq!(config.paging.max_page_size, 2000);
        assert_eq!(config.paging.page_param, "page");
        assert_eq!(config.paging.size_param, "size");
        assert_eq!(config.paging.sort_param, "sort");
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let config = Config::load_from("/nonexistent/paged-resources/config.toml").unwrap();
        assert_eq!(config.paging, PagingConfig::default());
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[service]\nname = \"users-api\"\n\n[paging]\ndefault_page_size = 50\nsize_param = \"per_page\""
        )
        .unwrap();

        let config = Config::load_from(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.service.name, "users-api");
        assert_eq!(config.service.log_level, "info");
        assert_eq!(config.paging.default_page_size, 50);
        assert_eq!(config.paging.size_param, "per_page");
        assert_eq!(config.paging.page_param, "page");
    }

    #[test]
    fn test_load_from_invalid_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[paging]\ndefault_page_size = \"lots\"").unwrap();

        let result = Config::load_from(file.path().to_str().unwrap());
        assert!(matches!(result, Err(crate::error::Error::Config(_))));
    }

    #[test]
    fn test_clamp_size() {
        let paging = PagingConfig::default();
        assert_eq!(paging.clamp_size(0), 1);
        assert_eq!(paging.clamp_size(50), 50);
        assert_eq!(paging.clamp_size(10_000), 2000);
    }

    #[test]
    fn test_is_paging_param() {
        let paging = PagingConfig::default();
        assert!(paging.is_paging_param("page"));
        assert!(paging.is_paging_param("sort"));
        assert!(!paging.is_paging_param("search"));
    }
}
