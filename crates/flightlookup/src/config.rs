//! Configuration management for flightlookup.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "flightlookup";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "saved.db";

/// Environment variable prefix.
const ENV_PREFIX: &str = "FLIGHTLOOKUP_";

/// Shown in place of a configured access key.
pub const REDACTED: &str = "(set)";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `FLIGHTLOOKUP_`, nested with `__`)
/// 2. TOML config file at `~/.config/flightlookup/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Upstream provider configuration.
    pub upstream: UpstreamConfig,
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Saved-flights configuration.
    pub saved: SavedConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the server binds to.
    pub bind: SocketAddr,
    /// Hard ceiling on the time spent serving a single request.
    pub request_timeout_secs: u64,
}

/// Upstream provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the provider, without the `/flights` suffix.
    pub base_url: String,
    /// Access key sent as the `access_key` query parameter.
    pub access_key: String,
    /// Per-endpoint timeout budgets.
    pub timeouts: TimeoutConfig,
    /// Result limit for free-text searches.
    pub search_limit: u32,
    /// Default result limit for airport exploration.
    pub explore_limit: u32,
}

/// Timeout budget for each kind of upstream call, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Free-text search.
    pub search_secs: u64,
    /// Airport exploration.
    pub explore_secs: u64,
    /// Detail lookup that falls back to mock data.
    pub flight_details_secs: u64,
    /// Strict detail lookup.
    pub flight_secs: u64,
    /// Live telemetry lookup.
    pub live_secs: u64,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/flightlookup/saved.db`
    pub database_path: Option<PathBuf>,
}

/// Saved-flights configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavedConfig {
    /// Profile whose saved flights are used when none is given.
    pub profile: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            request_timeout_secs: 30,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.aviationstack.com/v1".to_string(),
            access_key: String::new(),
            timeouts: TimeoutConfig::default(),
            search_limit: 50,
            explore_limit: 100,
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            search_secs: 10,
            explore_secs: 15,
            flight_details_secs: 8,
            flight_secs: 10,
            live_secs: 10,
        }
    }
}

impl Default for SavedConfig {
    fn default() -> Self {
        Self {
            profile: "default".to_string(),
        }
    }
}

impl TimeoutConfig {
    /// Budget for free-text searches.
    #[must_use]
    pub fn search(&self) -> Duration {
        Duration::from_secs(self.search_secs)
    }

    /// Budget for airport exploration.
    #[must_use]
    pub fn explore(&self) -> Duration {
        Duration::from_secs(self.explore_secs)
    }

    /// Budget for the detail lookup with mock fallback.
    #[must_use]
    pub fn flight_details(&self) -> Duration {
        Duration::from_secs(self.flight_details_secs)
    }

    /// Budget for the strict detail lookup.
    #[must_use]
    pub fn flight(&self) -> Duration {
        Duration::from_secs(self.flight_secs)
    }

    /// Budget for live telemetry lookups.
    #[must_use]
    pub fn live(&self) -> Duration {
        Duration::from_secs(self.live_secs)
    }

    /// Every budget with its setting name.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, u64); 5] {
        [
            ("search_secs", self.search_secs),
            ("explore_secs", self.explore_secs),
            ("flight_details_secs", self.flight_details_secs),
            ("flight_secs", self.flight_secs),
            ("live_secs", self.live_secs),
        ]
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if reqwest::Url::parse(&self.upstream.base_url).is_err() {
            return Err(Error::ConfigValidation {
                message: format!("invalid upstream base_url: {}", self.upstream.base_url),
            });
        }

        for (name, secs) in self.upstream.timeouts.entries() {
            if secs == 0 {
                return Err(Error::ConfigValidation {
                    message: format!("upstream timeout {name} must be greater than 0"),
                });
            }
        }

        if self.upstream.search_limit == 0 || self.upstream.explore_limit == 0 {
            return Err(Error::ConfigValidation {
                message: "search_limit and explore_limit must be greater than 0".to_string(),
            });
        }

        if self.server.request_timeout_secs == 0 {
            return Err(Error::ConfigValidation {
                message: "request_timeout_secs must be greater than 0".to_string(),
            });
        }

        if self.saved.profile.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "saved profile name cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Get the server request timeout as a Duration.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }

    /// A copy safe to display, with the access key masked.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if !config.upstream.access_key.is_empty() {
            config.upstream.access_key = REDACTED.to_string();
        }
        config
    }
}
