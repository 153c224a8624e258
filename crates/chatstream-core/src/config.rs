//! Client configuration
//!
//! Read from `<config dir>/chatstream/config.toml` when present. Every key is
//! optional; missing keys fall back to the defaults below.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::error::{ChatError, ChatResult};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const APP_DIR: &str = "chatstream";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Backend base URL; requests go to `{base_url}/chat`
    pub base_url: String,
    /// Give up on a reply when no chunk arrives for this long (0 = never)
    pub idle_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            idle_timeout_secs: 60,
            connect_timeout_secs: 10,
        }
    }
}

impl ChatConfig {
    /// Default config file location, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("No platform config dir, using default config");
                Ok(Self::default())
            }
        }
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("Config file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        info!("Loading config from {:?}", path);
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: ChatConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the base URL is usable
    pub fn validate(&self) -> ChatResult<()> {
        let url = Url::parse(&self.base_url).map_err(|e| ChatError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ChatError::InvalidBaseUrl {
                url: self.base_url.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        Ok(())
    }

    /// Full URL of the chat endpoint
    pub fn chat_endpoint(&self) -> ChatResult<String> {
        self.validate()?;
        Ok(format!("{}/chat", self.base_url.trim_end_matches('/')))
    }

    pub fn idle_timeout(&self) -> Option<Duration> {
        (self.idle_timeout_secs > 0).then(|| Duration::from_secs(self.idle_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ChatConfig::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, ChatConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"https://search.example.com/api/\"").unwrap();

        let config = ChatConfig::load_from(file.path()).unwrap();
        assert_eq!(config.base_url, "https://search.example.com/api/");
        assert_eq!(config.idle_timeout_secs, 60);
        assert_eq!(
            config.chat_endpoint().unwrap(),
            "https://search.example.com/api/chat"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"not a url\"").unwrap();
        assert!(ChatConfig::load_from(file.path()).is_err());

        let config = ChatConfig {
            base_url: "ftp://example.com".to_string(),
            ..ChatConfig::default()
        };
        assert!(matches!(
            config.chat_endpoint(),
            Err(ChatError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "idle_timeout_secs = \"soon\"").unwrap();
        assert!(ChatConfig::load_from(file.path()).is_err());
    }

    #[test]
    fn test_zero_idle_timeout_disables_it() {
        let config = ChatConfig {
            idle_timeout_secs: 0,
            ..ChatConfig::default()
        };
        assert_eq!(config.idle_timeout(), None);
        assert_eq!(
            ChatConfig::default().idle_timeout(),
            Some(Duration::from_secs(60))
        );
    }
}
