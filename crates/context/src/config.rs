//! Runtime configuration.
//!
//! Defaults, then `<config_dir>/kicad-presence/config.json` if present, then
//! environment overrides.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Discord application that owns the KiCad image assets.
pub const DEFAULT_CLIENT_ID: &str = "1312909179219869787";

/// Steady-state poll interval.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 15;

/// Wait before concluding KiCad has closed.
pub const DEFAULT_GRACE_INTERVAL_SECS: u64 = 5;

pub const CLIENT_ID_ENV: &str = "KICAD_PRESENCE_CLIENT_ID";
pub const POLL_SECS_ENV: &str = "KICAD_PRESENCE_POLL_SECS";
pub const GRACE_SECS_ENV: &str = "KICAD_PRESENCE_GRACE_SECS";

/// Configuration for the presence loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenceConfig {
    /// Discord application ID.
    pub client_id: String,

    /// Seconds between polls.
    pub poll_interval_secs: u64,

    /// Seconds to wait before the shutdown re-check.
    pub grace_interval_secs: u64,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            client_id: DEFAULT_CLIENT_ID.to_string(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            grace_interval_secs: DEFAULT_GRACE_INTERVAL_SECS,
        }
    }
}

impl PresenceConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn grace_interval(&self) -> Duration {
        Duration::from_secs(self.grace_interval_secs)
    }

    /// Default location of the config file, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("kicad-presence").join("config.json"))
    }

    /// Load the config file (if any) and apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let config = match Self::default_path() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.with_overrides(|key| std::env::var(key).ok())
    }

    /// Read a JSON config file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError::ReadFile {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };

        let config: Self =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFile {
                path: path.to_path_buf(),
                source: e,
            })?;

        tracing::info!(path = %path.display(), "loaded config file");
        config.validated()
    }

    /// Apply overrides from `lookup` (normally the process environment).
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(client_id) = lookup(CLIENT_ID_ENV) {
            let client_id = client_id.trim();
            if client_id.is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: CLIENT_ID_ENV,
                    value: client_id.to_string(),
                    reason: "must not be empty",
                });
            }
            self.client_id = client_id.to_string();
        }

        if let Some(value) = lookup(POLL_SECS_ENV) {
            self.poll_interval_secs = parse_secs(POLL_SECS_ENV, &value)?;
        }

        if let Some(value) = lookup(GRACE_SECS_ENV) {
            self.grace_interval_secs = parse_secs(GRACE_SECS_ENV, &value)?;
        }

        self.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "poll_interval_secs",
                value: "0".to_string(),
                reason: "must be at least one second",
            });
        }
        if self.grace_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "grace_interval_secs",
                value: "0".to_string(),
                reason: "must be at least one second",
            });
        }
        Ok(self)
    }
}

fn parse_secs(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: "expected a whole number of seconds",
        })
}
