//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub paste: PasteConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub nick: String,
    pub channels: Vec<String>,
    pub admins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct StorageConfig {
    /// Directory holding braindump.json
    pub brain_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LoggingConfig {
    /// Root of the per-channel log tree
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PasteConfig {
    pub endpoint: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                nick: "wren".to_string(),
                channels: vec!["#wren".to_string()],
                admins: Vec::new(),
            },
            storage: StorageConfig {
                brain_dir: PathBuf::from("."),
            },
            logging: LoggingConfig {
                dir: PathBuf::from("channel_logs"),
            },
            paste: PasteConfig {
                endpoint: "http://paste.openstack.org".to_string(),
            },
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: impl Into<PathBuf>) -> Result<(), ConfigError> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path.into(), content)?;
        Ok(())
    }

    /// Build a config from environment variables, falling back to
    /// defaults for anything unset. Channel and admin lists are
    /// comma separated.
    pub fn load_env() -> Self {
        let mut config = Config::default();

        if let Ok(nick) = std::env::var("WREN_NICK") {
            config.bot.nick = nick;
        }
        if let Ok(channels) = std::env::var("WREN_CHANNELS") {
            config.bot.channels = split_list(&channels);
        }
        if let Ok(admins) = std::env::var("WREN_ADMINS") {
            config.bot.admins = split_list(&admins);
        }
        if let Ok(dir) = std::env::var("WREN_BRAIN_DIR") {
            config.storage.brain_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = std::env::var("WREN_LOG_DIR") {
            config.logging.dir = PathBuf::from(dir);
        }

        config
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
