//! Application configuration structures.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::SourceConfig;
use crate::sources;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client behavior
    #[serde(default)]
    pub http: HttpConfig,

    /// Bulletin cache location
    #[serde(default)]
    pub storage: StorageConfig,

    /// Sources in the order they are resolved
    #[serde(default = "sources::all")]
    pub sources: Vec<SourceConfig>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == Some(0) {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.storage.resources_dir.trim().is_empty() {
            return Err(AppError::validation("storage.resources_dir is empty"));
        }
        if self.sources.is_empty() {
            return Err(AppError::validation("No sources defined"));
        }

        let mut seen = HashSet::new();
        for source in &self.sources {
            if !seen.insert(source.name.as_str()) {
                return Err(AppError::validation(format!(
                    "Duplicate source name: {}",
                    source.name
                )));
            }
            source.validate()?;
        }
        Ok(())
    }

    /// Look up a source by name (case-insensitive).
    pub fn source(&self, name: &str) -> Result<&SourceConfig> {
        self.sources
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| AppError::config(format!("Unknown source: {name}")))
    }

    /// Timeout for a source: its own setting, else the global one.
    pub fn timeout_for(&self, source: &SourceConfig) -> Option<Duration> {
        source.timeout().or_else(|| self.http.timeout())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            storage: StorageConfig::default(),
            sources: sources::all(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Retry once without certificate verification after a TLS failure
    #[serde(default = "defaults::insecure_fallback")]
    pub insecure_fallback: bool,

    /// Default request timeout in seconds; none when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl HttpConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            insecure_fallback: defaults::insecure_fallback(),
            timeout_secs: None,
        }
    }
}

/// Local cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding cached bulletin PDFs
    #[serde(default = "defaults::resources_dir")]
    pub resources_dir: String,
}

impl StorageConfig {
    pub fn resources_path(&self) -> PathBuf {
        PathBuf::from(&self.resources_dir)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            resources_dir: defaults::resources_dir(),
        }
    }
}

mod defaults {
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; bulletin-crawler/0.1)".into()
    }
    pub fn insecure_fallback() -> bool {
        true
    }
    pub fn resources_dir() -> String {
        "resources".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.http.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_duplicate_sources() {
        let mut config = Config::default();
        let first = config.sources[0].clone();
        config.sources.push(first);
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_no_sources() {
        let mut config = Config::default();
        config.sources.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [storage]
            resources_dir = "cache"
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.resources_dir, "cache");
        assert!(config.http.insecure_fallback);
        assert_eq!(config.sources.len(), sources::all().len());
    }

    #[test]
    fn source_timeout_overrides_global() {
        let mut config = Config::default();
        config.http.timeout_secs = Some(5);
        let tamil_nadu = config.source("tamilnadu").unwrap().clone();
        let delhi = config.source("Delhi").unwrap().clone();
        assert_eq!(config.timeout_for(&tamil_nadu), Some(Duration::from_secs(60)));
        assert_eq!(config.timeout_for(&delhi), Some(Duration::from_secs(5)));
    }

    #[test]
    fn unknown_source_is_config_error() {
        let config = Config::default();
        assert!(matches!(config.source("Goa"), Err(AppError::Config(_))));
    }
}
