// src/config.rs

//! Application configuration structures.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP client settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Per-resource endpoints and poll cadence
    #[serde(default)]
    pub poll: PollConfig,
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
        if Url::parse(&self.api.base_url).is_err() {
            return Err(AppError::validation(format!(
                "api.base_url is not a valid URL: {}",
                self.api.base_url
            )));
        }
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::validation("api.user_agent is empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::validation("api.timeout_secs must be > 0"));
        }
        for (name, resource) in self.poll.entries() {
            if resource.path.trim().is_empty() {
                return Err(AppError::validation(format!("poll.{name}.path is empty")));
            }
            if resource.interval_secs == 0 {
                return Err(AppError::validation(format!(
                    "poll.{name}.interval_secs must be > 0"
                )));
            }
        }
        Ok(())
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the portal REST API
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Endpoint path and poll cadence for one resource collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcePoll {
    /// Endpoint path, joined onto `api.base_url`
    pub path: String,

    /// Delay between the end of one poll cycle and the start of the next
    pub interval_secs: u64,
}

impl ResourcePoll {
    fn new(path: &str, interval_secs: u64) -> Self {
        Self {
            path: path.to_string(),
            interval_secs,
        }
    }

    /// Poll interval as a [`Duration`].
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// Per-resource polling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    #[serde(default = "defaults::announcements")]
    pub announcements: ResourcePoll,

    #[serde(default = "defaults::requests")]
    pub requests: ResourcePoll,

    #[serde(default = "defaults::feedback")]
    pub feedback: ResourcePoll,

    #[serde(default = "defaults::faqs")]
    pub faqs: ResourcePoll,

    #[serde(default = "defaults::officials")]
    pub officials: ResourcePoll,

    #[serde(default = "defaults::hotlines")]
    pub hotlines: ResourcePoll,
}

impl PollConfig {
    /// All resource entries, paired with their config table name.
    pub fn entries(&self) -> [(&'static str, &ResourcePoll); 6] {
        [
            ("announcements", &self.announcements),
            ("requests", &self.requests),
            ("feedback", &self.feedback),
            ("faqs", &self.faqs),
            ("officials", &self.officials),
            ("hotlines", &self.hotlines),
        ]
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            announcements: defaults::announcements(),
            requests: defaults::requests(),
            feedback: defaults::feedback(),
            faqs: defaults::faqs(),
            officials: defaults::officials(),
            hotlines: defaults::hotlines(),
        }
    }
}

mod defaults {
    use super::ResourcePoll;

    pub fn base_url() -> String {
        "http://localhost/api/".to_string()
    }

    pub fn user_agent() -> String {
        "bantay/0.1".to_string()
    }

    pub fn timeout() -> u64 {
        10
    }

    pub fn announcements() -> ResourcePoll {
        ResourcePoll::new("announcements", 10)
    }

    pub fn requests() -> ResourcePoll {
        ResourcePoll::new("requests", 15)
    }

    pub fn feedback() -> ResourcePoll {
        ResourcePoll::new("feedback", 20)
    }

    pub fn faqs() -> ResourcePoll {
        ResourcePoll::new("faqs", 60)
    }

    pub fn officials() -> ResourcePoll {
        ResourcePoll::new("officials", 300)
    }

    pub fn hotlines() -> ResourcePoll {
        ResourcePoll::new("hotlines", 300)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.poll.announcements.interval_secs, 10);
        assert_eq!(config.poll.entries().len(), 6);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [api]
            base_url = "https://portal.example.gov/api/"

            [poll.announcements]
            path = "announcements/list"
            interval_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://portal.example.gov/api/");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.poll.announcements.interval_secs, 5);
        assert_eq!(config.poll.faqs.interval_secs, 60);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\ntimeout_secs = 3").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.api.timeout_secs, 3);
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let config = Config::load_or_default("/nonexistent/bantay.toml");
        assert_eq!(config.api.timeout_secs, 10);
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let mut config = Config::default();
        config.poll.requests.interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut config = Config::default();
        config.api.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }
}
