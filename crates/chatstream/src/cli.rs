//! Command-line arguments

use std::path::PathBuf;

use anyhow::{Context, Result};
use chatstream_core::ChatConfig;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "chatstream", version, about = "Stream answers from a work-order search backend")]
pub struct Cli {
    /// Backend base URL (requests go to <URL>/chat)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Seconds without data before a reply is abandoned (0 disables)
    #[arg(long, value_name = "SECS")]
    pub idle_timeout: Option<u64>,

    /// Log file (defaults to the platform data dir)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Load the config file and apply command-line overrides
    pub fn resolve_config(&self) -> Result<ChatConfig> {
        let mut config = match &self.config {
            Some(path) => ChatConfig::load_from(path)?,
            None => ChatConfig::load()?,
        };

        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }
        if let Some(secs) = self.idle_timeout {
            config.idle_timeout_secs = secs;
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("chatstream")
                .join("chatstream.log")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"http://file.example\"\nidle_timeout_secs = 5").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let cli = Cli::parse_from([
            "chatstream",
            "--config",
            &path,
            "--base-url",
            "http://flag.example:9000",
        ]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.base_url, "http://flag.example:9000");
        assert_eq!(config.idle_timeout_secs, 5);
    }

    #[test]
    fn test_bad_base_url_flag_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let cli = Cli::parse_from([
            "chatstream",
            "--config",
            path.to_str().unwrap(),
            "--base-url",
            "nonsense",
        ]);
        assert!(cli.resolve_config().is_err());
    }

    #[test]
    fn test_explicit_log_path() {
        let cli = Cli::parse_from(["chatstream", "--log-file", "/tmp/chat.log"]);
        assert_eq!(cli.log_path(), PathBuf::from("/tmp/chat.log"));
    }
}
