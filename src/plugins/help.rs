//! Provides the help system.
//!
//! No dependencies on other plugins.

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::errors::{BotError, PluginError};
use crate::application::messaging::{EventBus, EventKind, Listener};
use crate::application::services::HelpText;
use crate::application::BotContext;
use crate::domain::entities::Event;
use super::plugin::{Phase, Plugin};

pub struct HelpPlugin;

#[async_trait]
impl Plugin for HelpPlugin {
    fn id(&self) -> &str {
        "00-help"
    }

    fn phase(&self) -> Phase {
        Phase::Foundation
    }

    async fn setup(&self, ctx: &Arc<BotContext>, bus: &mut EventBus) -> Result<(), PluginError> {
        bus.subscribe(
            EventKind::Addressed,
            self.id(),
            Arc::new(ChannelHelpPointer { ctx: ctx.clone() }),
        );
        bus.subscribe(
            EventKind::Direct,
            self.id(),
            Arc::new(DirectHelp { ctx: ctx.clone() }),
        );
        Ok(())
    }
}

/// Don't spew help into channels; it's annoying. Just tell people to PM
/// for help.
struct ChannelHelpPointer {
    ctx: Arc<BotContext>,
}

#[async_trait]
impl Listener for ChannelHelpPointer {
    async fn handle(&self, event: &Event) -> Result<(), BotError> {
        let Event::Channel(msg) = event else {
            return Ok(());
        };
        let words: Vec<&str> = msg.text.split_whitespace().collect();
        if words.len() >= 2 && words[1] == "help" {
            msg.reply(&format!(
                "{}: to get help, use \"/msg {} help [command]\"",
                msg.sender,
                self.ctx.nick()
            ))
            .await?;
        }
        Ok(())
    }
}

/// `help` / `help <command>` over private message
struct DirectHelp {
    ctx: Arc<BotContext>,
}

#[async_trait]
impl Listener for DirectHelp {
    async fn handle(&self, event: &Event) -> Result<(), BotError> {
        let Event::Direct(msg) = event else {
            return Ok(());
        };
        let words: Vec<&str> = msg.text.split_whitespace().collect();
        if words.first() != Some(&"help") {
            return Ok(());
        }

        if words.len() == 1 {
            msg.reply("Available commands:").await?;
            for summary in self.ctx.top_level_help() {
                msg.reply(&summary).await?;
            }
        } else {
            let command = words[1];
            match self.ctx.command_help(command) {
                Some(HelpText::Line(line)) => {
                    msg.reply(&format!("Help for {}:", command)).await?;
                    msg.reply(&line).await?;
                }
                Some(HelpText::Lines(lines)) => {
                    msg.reply(&format!("Help for {}:", command)).await?;
                    for line in lines {
                        msg.reply(&line).await?;
                    }
                }
                None => {
                    msg.reply(&format!("No help for \"{}\"", command)).await?;
                }
            }
        }

        msg.reply("End of help.").await?;
        Ok(())
    }
}
