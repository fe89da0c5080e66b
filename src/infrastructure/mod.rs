//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: configuration loading
//! - Store: the file-backed brain
//! - Logging: the serialized channel logger
//! - Paste: the paste-sharing HTTP client
//! - Adapters: chat platform integrations

pub mod adapters;
pub mod config;
pub mod logging;
pub mod paste;
pub mod store;
