use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the HBnB REST API, including the version prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000/api/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Where the access token is persisted between invocations
    #[serde(default = "default_session_file")]
    pub file: PathBuf,
    /// Lifetime of a stored token in seconds (default: 3600)
    #[serde(default = "default_session_ttl")]
    pub ttl_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            file: default_session_file(),
            ttl_secs: default_session_ttl(),
        }
    }
}

impl SessionConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

fn default_session_file() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".hbnb").join("session.json"),
        None => PathBuf::from(".hbnb").join("session.json"),
    }
}

fn default_session_ttl() -> u64 {
    3600
}

/// Longest accepted session lifetime (ten years)
pub const MAX_SESSION_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            session: SessionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            info!("Loading configuration from {}", path.display());
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            Self::parse(&content)
        } else {
            info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).with_context(|| "Failed to parse configuration file")?;
        if config.api.base_url.trim().is_empty() {
            anyhow::bail!("api.base_url must not be empty");
        }
        if config.session.ttl_secs > MAX_SESSION_TTL_SECS {
            anyhow::bail!(
                "session.ttl_secs must be at most {} (got {})",
                MAX_SESSION_TTL_SECS,
                config.session.ttl_secs
            );
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_sections_missing() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:5000/api/v1");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.session.ttl_secs, 3600);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_partial_override() {
        let config = Config::parse(
            r#"
            [api]
            base_url = "http://127.0.0.1:5003/api/v1"

            [session]
            ttl_secs = 60
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:5003/api/v1");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.session.ttl(), Duration::from_secs(60));
    }

    #[test]
    fn test_rejects_empty_base_url() {
        assert!(Config::parse("[api]\nbase_url = \"  \"").is_err());
    }

    #[test]
    fn test_rejects_oversized_session_ttl() {
        let err = Config::parse("[session]\nttl_secs = 1000000000000000").unwrap_err();
        assert!(err.to_string().contains("session.ttl_secs"));

        let config = Config::parse(&format!("[session]\nttl_secs = {}", MAX_SESSION_TTL_SECS)).unwrap();
        assert_eq!(config.session.ttl_secs, MAX_SESSION_TTL_SECS);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.session.ttl_secs, 3600);
    }
}
