//! Provides the file-backed brain for other plugins to use.
//!
//! No dependencies on other plugins.

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::errors::PluginError;
use crate::application::messaging::EventBus;
use crate::application::BotContext;
use crate::infrastructure::store::Brain;
use super::plugin::{Phase, Plugin};

pub struct BrainPlugin;

#[async_trait]
impl Plugin for BrainPlugin {
    fn id(&self) -> &str {
        "00-brain"
    }

    fn phase(&self) -> Phase {
        Phase::Foundation
    }

    async fn setup(&self, ctx: &Arc<BotContext>, _bus: &mut EventBus) -> Result<(), PluginError> {
        let brain = Brain::load(&ctx.config().storage.brain_dir);
        ctx.install_brain(Arc::new(brain))
    }
}
