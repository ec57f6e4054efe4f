//! Configuration DTO for the console.
//!
//! This module contains only data. Reading files and applying environment
//! overrides happens in the infrastructure layer.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::query::DEFAULT_PAGE_SIZE;
use crate::resource::MonitoringPanel;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api/v1";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("api_base_url must not be empty")]
    EmptyApiUrl,

    #[error("api_base_url must start with http:// or https://, got {0}")]
    InvalidApiUrl(String),

    #[error("page_size must be at least 1")]
    InvalidPageSize,

    #[error("request_timeout_ms must be at least 1")]
    InvalidTimeout,
}

/// Monitoring refresh overrides, in seconds. Unset panels use their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub system_secs: Option<u64>,
    pub api_metrics_secs: Option<u64>,
    pub endpoints_secs: Option<u64>,
    pub errors_secs: Option<u64>,
    pub queries_secs: Option<u64>,
    pub logs_secs: Option<u64>,
}

impl MonitoringConfig {
    pub fn interval(&self, panel: MonitoringPanel) -> Duration {
        let override_secs = match panel {
            MonitoringPanel::System => self.system_secs,
            MonitoringPanel::ApiMetrics => self.api_metrics_secs,
            MonitoringPanel::Endpoints => self.endpoints_secs,
            MonitoringPanel::Errors => self.errors_secs,
            MonitoringPanel::Queries => self.queries_secs,
            MonitoringPanel::Logs => self.logs_secs,
        };
        override_secs
            .filter(|s| *s > 0)
            .map(Duration::from_secs)
            .unwrap_or_else(|| panel.default_refresh())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub page_size: u32,
    pub request_timeout_ms: u64,
    /// Cached entries older than this are refetched on next access.
    pub stale_after_ms: u64,
    /// Where the credential file lives. `None` uses the platform data dir.
    pub credentials_path: Option<PathBuf>,
    /// Enables a daily rolling log file in this directory.
    pub log_dir: Option<PathBuf>,
    pub monitoring: MonitoringConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_ms: 30_000,
            stale_after_ms: 30_000,
            credentials_path: None,
            log_dir: None,
            monitoring: MonitoringConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api_base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::EmptyApiUrl);
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(url.to_string()));
        }
        if self.page_size == 0 {
            return Err(ConfigError::InvalidPageSize);
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn stale_after(&self) -> Duration {
        Duration::from_millis(self.stale_after_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AppConfig::from_toml(
            r#"
api_base_url = "https://api.example.test/api/v1"

[monitoring]
logs_secs = 5
"#,
        )
        .unwrap();
        assert_eq!(config.api_base_url, "https://api.example.test/api/v1");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.stale_after(), Duration::from_secs(30));
        assert_eq!(config.monitoring.interval(MonitoringPanel::Logs), Duration::from_secs(5));
        assert_eq!(
            config.monitoring.interval(MonitoringPanel::ApiMetrics),
            Duration::from_secs(15)
        );
    }

    #[test]
    fn test_validate() {
        assert!(AppConfig::default().validate().is_ok());

        let mut config = AppConfig::default();
        config.page_size = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidPageSize));

        config = AppConfig::default();
        config.api_base_url = "ftp://x".into();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidApiUrl(_))));

        config.api_base_url = "   ".into();
        assert_eq!(config.validate(), Err(ConfigError::EmptyApiUrl));
    }
}
