//! Plugin trait definitions

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::errors::PluginError;
use crate::application::messaging::EventBus;
use crate::application::BotContext;

/// Load phases. Foundation plugins establish shared infrastructure and
/// always load before feature plugins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Foundation,
    Feature,
}

/// Core plugin trait that all plugins implement
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Identifier; also the sort key within a phase, so a numeric
    /// prefix pins a plugin early (e.g. "00-brain")
    fn id(&self) -> &str;

    fn phase(&self) -> Phase {
        Phase::Feature
    }

    /// Wire the plugin up: install services into the context, register
    /// help text, and subscribe event listeners.
    async fn setup(&self, ctx: &Arc<BotContext>, bus: &mut EventBus) -> Result<(), PluginError>;
}
