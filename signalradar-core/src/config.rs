//! Client configuration: API base URL, request timeout, defaults.
//!
//! Resolution order is defaults, then an optional TOML file, then
//! environment variables. Binaries apply their own flags last. The resolved
//! value is passed into every controller at construction; nothing reads a
//! global.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Limit;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const ENV_API_BASE: &str = "SIGNALRADAR_API_BASE";
pub const ENV_TIMEOUT_SECS: &str = "SIGNALRADAR_TIMEOUT_SECS";
pub const ENV_HISTORY_DAYS: &str = "SIGNALRADAR_HISTORY_DAYS";

/// History lookback bounds accepted by the service.
pub const HISTORY_DAYS_MIN: u32 = 30;
pub const HISTORY_DAYS_MAX: u32 = 730;

/// Per-request timeout bounds, in seconds.
pub const TIMEOUT_SECS_MIN: u64 = 1;
pub const TIMEOUT_SECS_MAX: u64 = 3600;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("invalid value for {name}: '{value}'")]
    InvalidEnv { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    /// Scoring service root, e.g. `http://localhost:8000`.
    pub api_base: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Limit used on first activation.
    pub default_limit: Limit,
    /// Lookback for the chart modal.
    pub history_days: u32,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: 20,
            default_limit: Limit::DEFAULT,
            history_days: 120,
        }
    }
}

impl RadarConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: RadarConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.normalized())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    /// `<config_dir>/signalradar/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("signalradar").join("config.toml"))
    }

    /// Defaults, then `explicit` (must exist) or the default path (if it
    /// exists), then environment overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.apply_env(|name| std::env::var(name).ok())?;
        config.base_url()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (`std::env::var` in production).
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        if let Some(base) = var(ENV_API_BASE) {
            self.api_base = base;
        }
        if let Some(raw) = var(ENV_TIMEOUT_SECS) {
            self.timeout_secs = raw.parse().map_err(|_| ConfigError::InvalidEnv {
                name: ENV_TIMEOUT_SECS,
                value: raw.clone(),
            })?;
        }
        if let Some(raw) = var(ENV_HISTORY_DAYS) {
            self.history_days = raw.parse().map_err(|_| ConfigError::InvalidEnv {
                name: ENV_HISTORY_DAYS,
                value: raw.clone(),
            })?;
        }
        *self = self.clone().normalized();
        Ok(())
    }

    /// Trim the trailing slash, clamp numeric fields into their accepted ranges.
    pub fn normalized(mut self) -> Self {
        self.api_base = self.api_base.trim().trim_end_matches('/').to_string();
        self.timeout_secs = self.timeout_secs.clamp(TIMEOUT_SECS_MIN, TIMEOUT_SECS_MAX);
        self.history_days = self.history_days.clamp(HISTORY_DAYS_MIN, HISTORY_DAYS_MAX);
        self
    }

    /// Parsed base URL; must be http or https.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: self.api_base.clone(),
            reason,
        };
        let url = Url::parse(&self.api_base).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(invalid(format!("unsupported scheme '{other}'"))),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let config = RadarConfig::default();
        assert_eq!(config.api_base, "http://localhost:8000");
        assert_eq!(config.default_limit.get(), 15);
        assert_eq!(config.history_days, 120);
        assert_eq!(config.timeout(), Duration::from_secs(20));
        assert!(config.base_url().is_ok());
    }

    #[test]
    fn toml_partial_keeps_defaults() {
        let config = RadarConfig::from_toml(
            "api_base = \"https://radar.example.com/\"\ndefault_limit = 80\n",
            Path::new("test.toml"),
        )
        .unwrap();
        assert_eq!(config.api_base, "https://radar.example.com");
        assert_eq!(config.default_limit.get(), 50);
        assert_eq!(config.history_days, 120);
    }

    #[test]
    fn toml_parse_error_names_file() {
        let err = RadarConfig::from_toml("api_base = ", Path::new("bad.toml")).unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = RadarConfig::default();
        config
            .apply_env(env(&[
                (ENV_API_BASE, " http://10.0.0.5:9000/ "),
                (ENV_TIMEOUT_SECS, "5"),
                (ENV_HISTORY_DAYS, "9999"),
            ]))
            .unwrap();
        assert_eq!(config.api_base, "http://10.0.0.5:9000");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.history_days, HISTORY_DAYS_MAX);
    }

    #[test]
    fn timeout_is_bounded() {
        let mut config = RadarConfig::default();
        config
            .apply_env(env(&[(ENV_TIMEOUT_SECS, &u64::MAX.to_string())]))
            .unwrap();
        assert_eq!(config.timeout_secs, TIMEOUT_SECS_MAX);
        assert_eq!(config.timeout(), Duration::from_secs(3600));

        config.timeout_secs = 0;
        assert_eq!(config.normalized().timeout_secs, TIMEOUT_SECS_MIN);
    }

    #[test]
    fn blank_env_is_ignored() {
        let mut config = RadarConfig::default();
        config.apply_env(env(&[(ENV_API_BASE, "   ")])).unwrap();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn bad_env_number_is_error() {
        let mut config = RadarConfig::default();
        let err = config
            .apply_env(env(&[(ENV_TIMEOUT_SECS, "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { name, .. } if name == ENV_TIMEOUT_SECS));
    }

    #[test]
    fn base_url_scheme_is_checked() {
        let mut config = RadarConfig::default();
        config.api_base = "ftp://example.com".into();
        assert!(matches!(
            config.base_url(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        config.api_base = "not a url".into();
        assert!(config.base_url().is_err());
    }

    #[test]
    fn toml_roundtrip() {
        let config = RadarConfig::default();
        let text = config.to_toml().unwrap();
        let back = RadarConfig::from_toml(&text, Path::new("roundtrip.toml")).unwrap();
        assert_eq!(config, back);
    }
}
