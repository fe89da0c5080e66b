//! Application layer errors

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Plugin error: {0}")]
    Plugin(#[from] PluginError),

    #[error("Paste error: {0}")]
    Paste(#[from] PasteError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    MissingSetting(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Plugin lifecycle errors
#[derive(Error, Debug)]
pub enum PluginError {
    /// A feature plugin asked for shared infrastructure that no
    /// foundation plugin has installed yet.
    #[error("'{0}' is not installed; check plugin load order")]
    NotInstalled(&'static str),

    #[error("'{0}' is already installed")]
    AlreadyInstalled(&'static str),

    #[error("Plugin '{0}' failed to load: {1}")]
    Setup(String, String),
}

/// Paste-sharing client errors
#[derive(Error, Debug)]
pub enum PasteError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Got non-2xx status {0}")]
    Status(u16),

    #[error("Paste service error: {0}")]
    Service(String),
}
