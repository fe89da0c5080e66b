//! Decide between multiple choices.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use std::sync::Arc;

use crate::application::errors::{BotError, PluginError};
use crate::application::messaging::{EventBus, EventKind, Listener};
use crate::application::BotContext;
use crate::domain::entities::Event;
use super::plugin::{Phase, Plugin};

const CHOOSE_PREFIX: &str = "choose ";

pub struct ChoosePlugin;

#[async_trait]
impl Plugin for ChoosePlugin {
    fn id(&self) -> &str {
        "choose"
    }

    fn phase(&self) -> Phase {
        Phase::Feature
    }

    async fn setup(&self, ctx: &Arc<BotContext>, bus: &mut EventBus) -> Result<(), PluginError> {
        ctx.add_top_level_help("choose A [B] [C]...: randomly choose an option");
        ctx.add_command_help("choose", "choose A [B] [C]...: randomly choose an option");
        bus.subscribe(EventKind::Addressed, self.id(), Arc::new(ChooseCommand));
        Ok(())
    }
}

pub struct ChooseCommand;

#[async_trait]
impl Listener for ChooseCommand {
    async fn handle(&self, event: &Event) -> Result<(), BotError> {
        let text = event.text();
        let Some(start) = text.find(CHOOSE_PREFIX) else {
            return Ok(());
        };
        let choices: Vec<&str> = text[start + CHOOSE_PREFIX.len()..]
            .split_whitespace()
            .collect();
        let chosen = choices.choose(&mut rand::thread_rng()).copied();
        if let Some(chosen) = chosen {
            event.reply(&format!("I choose {}", chosen)).await?;
        }
        Ok(())
    }
}
