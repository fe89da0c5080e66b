//! Plugin system for wren-bot
//!
//! Plugins are independent units wired up at startup from a static,
//! ordered registration list. Foundation plugins install shared
//! infrastructure (brain, help, authz); feature plugins build on it.

pub mod plugin;
pub mod registry;

pub mod authz;
pub mod brain;
pub mod choose;
pub mod echo;
pub mod help;
pub mod logging;

pub use plugin::{Phase, Plugin};
pub use registry::PluginRegistry;
