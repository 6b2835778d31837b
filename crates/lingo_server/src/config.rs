//! Server configuration.
//!
//! Values come from an optional TOML file, then environment variables, then
//! whatever the caller sets explicitly (CLI flags). Every field has a default.

use crate::error::ConfigError;
use derive_getters::Getters;
use derive_setters::Setters;
use lingo_core::Rules;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Configuration for the HTTP game server.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_", into)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    host: String,

    /// Port to bind.
    port: u16,

    /// Dictionary file, JSON or newline-separated.
    dictionary: PathBuf,

    /// Seconds of inactivity before a session is reaped.
    session_ttl_secs: u64,

    /// Seconds between reaper sweeps.
    reap_interval_secs: u64,

    /// Game timing and prize values.
    rules: Rules,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            dictionary: PathBuf::from("data/words.json"),
            session_ttl_secs: 3600,
            reap_interval_secs: 60,
            rules: Rules::default(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(host = %config.host, port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if given, otherwise starts from defaults, then applies
    /// process environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on an unreadable file or a malformed override.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Applies `LINGO_HOST`, `LINGO_PORT` (or `PORT`) and `LINGO_DICTIONARY`
    /// looked up through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a port variable is not a valid port number.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("LINGO_HOST") {
            debug!(host = %host, "Host overridden from environment");
            self.host = host;
        }

        if let Some((key, raw)) = ["LINGO_PORT", "PORT"]
            .iter()
            .find_map(|key| lookup(key).map(|value| (*key, value)))
        {
            self.port = raw
                .trim()
                .parse()
                .map_err(|e| ConfigError::new(format!("Invalid {} {:?}: {}", key, raw, e)))?;
            debug!(port = self.port, key, "Port overridden from environment");
        }

        if let Some(dictionary) = lookup("LINGO_DICTIONARY") {
            debug!(dictionary = %dictionary, "Dictionary overridden from environment");
            self.dictionary = PathBuf::from(dictionary);
        }

        Ok(self)
    }

    /// Idle time after which a session is reaped.
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    /// Interval between reaper sweeps.
    pub fn reap_interval(&self) -> Duration {
        Duration::from_secs(self.reap_interval_secs.max(1))
    }
}
