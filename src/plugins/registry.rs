//! Plugin registry - static, ordered plugin loading

use std::sync::Arc;
use tracing::info;

use crate::application::errors::PluginError;
use crate::application::messaging::EventBus;
use crate::application::BotContext;
use super::plugin::{Phase, Plugin};

/// Holds the registration list and loads it deterministically:
/// foundation plugins first, then feature plugins, each phase sorted by
/// plugin id.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<Box<dyn Plugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock plugin set
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(super::brain::BrainPlugin));
        registry.register(Box::new(super::help::HelpPlugin));
        registry.register(Box::new(super::authz::AuthzPlugin));
        registry.register(Box::new(super::logging::LoggingPlugin::new()));
        registry.register(Box::new(super::choose::ChoosePlugin));
        registry.register(Box::new(super::echo::EchoPlugin));
        registry
    }

    pub fn register(&mut self, plugin: Box<dyn Plugin>) {
        self.plugins.push(plugin);
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Run every plugin's setup in load order. A setup failure is a
    /// startup configuration error and aborts the load.
    pub async fn load_all(
        &mut self,
        ctx: &Arc<BotContext>,
        bus: &mut EventBus,
    ) -> Result<(), PluginError> {
        self.plugins
            .sort_by(|a, b| a.phase().cmp(&b.phase()).then_with(|| a.id().cmp(b.id())));

        for plugin in &self.plugins {
            info!("loading plugin {}", plugin.id());
            plugin.setup(ctx, bus).await?;
        }
        info!("{} plugins loaded", self.plugins.len());
        Ok(())
    }
}
