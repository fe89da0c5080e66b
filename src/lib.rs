//! wren-bot - a plugin-based chat bot core
//!
//! Raw protocol callbacks are normalized into canonical events and
//! fanned out to statically registered plugins. Plugins share one bot
//! context carrying the brain (file-backed key-value state), the
//! authorization service, and the help catalog; channel traffic is
//! mirrored to per-day log files through a serialized write queue.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod plugins;
