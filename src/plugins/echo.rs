//! Echoes what you tell it to.

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::errors::{BotError, PluginError};
use crate::application::messaging::{EventBus, EventKind, Listener};
use crate::application::BotContext;
use crate::domain::entities::Event;
use super::plugin::{Phase, Plugin};

const ECHO_PREFIX: &str = "echo ";

pub struct EchoPlugin;

#[async_trait]
impl Plugin for EchoPlugin {
    fn id(&self) -> &str {
        "echo"
    }

    fn phase(&self) -> Phase {
        Phase::Feature
    }

    async fn setup(&self, ctx: &Arc<BotContext>, bus: &mut EventBus) -> Result<(), PluginError> {
        ctx.add_top_level_help("echo <string>: just echo <string>; nothing fancy.");
        ctx.add_command_help("echo", "echo <string>: just echo <string>; nothing fancy.");
        bus.subscribe(EventKind::Addressed, self.id(), Arc::new(EchoCommand));
        Ok(())
    }
}

pub struct EchoCommand;

#[async_trait]
impl Listener for EchoCommand {
    async fn handle(&self, event: &Event) -> Result<(), BotError> {
        let text = event.text();
        if let Some(start) = text.find(ECHO_PREFIX) {
            event.reply(&text[start + ECHO_PREFIX.len()..]).await?;
        }
        Ok(())
    }
}
