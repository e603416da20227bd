//! Runtime configuration.
//!
//! # Responsibility
//! - Collect connection, storage and logging settings from `COMPETENCY_*`
//!   environment variables.
//!
//! # Invariants
//! - Loading never fails; `validate` reports what is missing for a remote
//!   connection.
//! - The API key never appears in `Debug` output.

use crate::logging::default_log_level;
use crate::remote::rest::DEFAULT_TIMEOUT;
use std::fmt::{Debug, Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_REMOTE_URL: &str = "COMPETENCY_REMOTE_URL";
pub const ENV_API_KEY: &str = "COMPETENCY_API_KEY";
pub const ENV_SNAPSHOT_PATH: &str = "COMPETENCY_SNAPSHOT_PATH";
pub const ENV_LOG_LEVEL: &str = "COMPETENCY_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "COMPETENCY_LOG_DIR";
pub const ENV_TIMEOUT_SECS: &str = "COMPETENCY_TIMEOUT_SECS";

pub const DEFAULT_SNAPSHOT_PATH: &str = "competency.sqlite3";

/// Configuration problems found by [`TrackerConfig::validate`] or while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    InvalidTimeout(String),
    ZeroTimeout,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(var) => write!(f, "`{var}` must be set to reach the remote store"),
            Self::InvalidTimeout(value) => {
                write!(f, "`{ENV_TIMEOUT_SECS}` must be a whole number of seconds, got `{value}`")
            }
            Self::ZeroTimeout => write!(f, "request timeout must be greater than zero"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    pub remote_url: String,
    pub api_key: String,
    pub snapshot_path: PathBuf,
    pub log_level: String,
    /// No file logging when `None`.
    pub log_dir: Option<PathBuf>,
    pub request_timeout: Duration,
}

impl Debug for TrackerConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackerConfig")
            .field("remote_url", &self.remote_url)
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("snapshot_path", &self.snapshot_path)
            .field("log_level", &self.log_level)
            .field("log_dir", &self.log_dir)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            remote_url: String::new(),
            api_key: String::new(),
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            log_level: default_log_level().to_string(),
            log_dir: None,
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl TrackerConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from any variable lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(url) = read(ENV_REMOTE_URL) {
            config.remote_url = url;
        }
        if let Some(key) = read(ENV_API_KEY) {
            config.api_key = key;
        }
        if let Some(path) = read(ENV_SNAPSHOT_PATH) {
            config.snapshot_path = PathBuf::from(path);
        }
        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        config.log_dir = read(ENV_LOG_DIR).map(PathBuf::from);
        if let Some(secs) = read(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(secs.clone()))?;
            config.request_timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    /// Checks the settings needed for the REST remote store.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.remote_url.is_empty() {
            return Err(ConfigError::Missing(ENV_REMOTE_URL));
        }
        if self.api_key.is_empty() {
            return Err(ConfigError::Missing(ENV_API_KEY));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, TrackerConfig, DEFAULT_SNAPSHOT_PATH};
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn reads_all_variables() {
        let config = TrackerConfig::from_lookup(lookup(&[
            ("COMPETENCY_REMOTE_URL", "https://example.supabase.co"),
            ("COMPETENCY_API_KEY", "anon-key"),
            ("COMPETENCY_SNAPSHOT_PATH", "/tmp/tracker.sqlite3"),
            ("COMPETENCY_LOG_LEVEL", "warn"),
            ("COMPETENCY_LOG_DIR", "/tmp/logs"),
            ("COMPETENCY_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.remote_url, "https://example.supabase.co");
        assert_eq!(config.snapshot_path, PathBuf::from("/tmp/tracker.sqlite3"));
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/logs")));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        config.validate().unwrap();
    }

    #[test]
    fn defaults_apply_and_validation_reports_missing_remote() {
        let config = TrackerConfig::from_lookup(lookup(&[("COMPETENCY_API_KEY", "  ")])).unwrap();
        assert_eq!(config.snapshot_path, PathBuf::from(DEFAULT_SNAPSHOT_PATH));
        assert!(config.log_dir.is_none());
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::Missing("COMPETENCY_REMOTE_URL")
        );
    }

    #[test]
    fn bad_and_zero_timeouts_are_rejected() {
        let err = TrackerConfig::from_lookup(lookup(&[("COMPETENCY_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidTimeout("soon".to_string()));

        let config = TrackerConfig::from_lookup(lookup(&[
            ("COMPETENCY_REMOTE_URL", "https://example.supabase.co"),
            ("COMPETENCY_API_KEY", "anon-key"),
            ("COMPETENCY_TIMEOUT_SECS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.validate().unwrap_err(), ConfigError::ZeroTimeout);
    }

    #[test]
    fn debug_output_hides_api_key() {
        let config = TrackerConfig {
            api_key: "secret-key".to_string(),
            ..TrackerConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("<redacted>"));
    }
}
