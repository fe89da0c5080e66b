//! Authorization framework. Installs the authz service and the chat
//! commands to inspect and update permissions.
//!
//! Requires plugin '00-brain'.

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::errors::{BotError, PluginError};
use crate::application::messaging::{EventBus, EventKind, Listener};
use crate::application::services::Authz;
use crate::application::BotContext;
use crate::domain::entities::{DirectMessage, Event};
use super::plugin::{Phase, Plugin};

pub struct AuthzPlugin;

#[async_trait]
impl Plugin for AuthzPlugin {
    fn id(&self) -> &str {
        "10-authz"
    }

    fn phase(&self) -> Phase {
        Phase::Foundation
    }

    async fn setup(&self, ctx: &Arc<BotContext>, bus: &mut EventBus) -> Result<(), PluginError> {
        let brain = ctx.brain()?;
        let admins = ctx.config().bot.admins.clone();
        let authz = Arc::new(
            Authz::new(admins, brain)
                .map_err(|e| PluginError::Setup(self.id().to_string(), e.to_string()))?,
        );
        ctx.install_authz(authz.clone())?;

        ctx.add_top_level_help("authz: commands for user authorization");
        ctx.add_command_help(
            "authz",
            vec![
                "authz grant <nick> <channel> <permission>: grant a permission. Issuer must have 'admin' permission for <channel> (or be a bot admin).",
                "authz list: list your permissions",
                "authz list <nick>: list permissions for <nick>. Issuer must be a bot admin.",
                "authz revoke <nick> <channel> <permission>: revoke a permission. Issuer must have 'admin' permission for <channel> (or be a bot admin).",
            ],
        );

        bus.subscribe(
            EventKind::Direct,
            self.id(),
            Arc::new(AuthzCommands { authz }),
        );
        Ok(())
    }
}

pub struct AuthzCommands {
    authz: Arc<Authz>,
}

impl AuthzCommands {
    pub fn new(authz: Arc<Authz>) -> Self {
        Self { authz }
    }

    async fn list_own(&self, msg: &DirectMessage) -> Result<(), BotError> {
        msg.reply("Your permissions:").await?;
        self.say_permissions(msg, &msg.sender).await?;
        if self.authz.is_bot_admin(&msg.sender) {
            msg.reply("You are a bot admin.").await?;
        }
        msg.reply("End of permissions.").await
    }

    async fn list_other(&self, msg: &DirectMessage, target: &str) -> Result<(), BotError> {
        if !self.authz.is_bot_admin(&msg.sender) {
            return msg.reply("Permission denied: you are not a bot admin").await;
        }
        msg.reply(&format!("Permissions for {}:", target)).await?;
        self.say_permissions(msg, target).await?;
        if self.authz.is_bot_admin(target) {
            msg.reply(&format!("{} is a bot admin.", target)).await?;
        }
        msg.reply("End of permissions.").await
    }

    async fn say_permissions(&self, msg: &DirectMessage, nick: &str) -> Result<(), BotError> {
        let perms = self.authz.permissions_for(nick);
        let mut channels: Vec<&String> = perms.keys().collect();
        channels.sort();
        for channel in channels {
            let granted = &perms[channel];
            if !granted.is_empty() {
                msg.reply(&format!("{}: {}", channel, granted.join(", ")))
                    .await?;
            }
        }
        Ok(())
    }

    async fn grant(
        &self,
        msg: &DirectMessage,
        nick: &str,
        channel: &str,
        perm: &str,
    ) -> Result<(), BotError> {
        if self.authz.is_channel_admin(&msg.sender, channel) {
            self.authz.grant(nick, channel, perm)?;
            msg.reply("ok").await
        } else {
            msg.reply(&format!(
                "Permission denied: you are not an admin for channel {}",
                channel
            ))
            .await
        }
    }

    async fn revoke(
        &self,
        msg: &DirectMessage,
        nick: &str,
        channel: &str,
        perm: &str,
    ) -> Result<(), BotError> {
        if self.authz.is_channel_admin(&msg.sender, channel) {
            self.authz.revoke(nick, channel, perm)?;
            msg.reply("ok").await
        } else {
            msg.reply(&format!(
                "Permission denied: you are not an admin for channel {}",
                channel
            ))
            .await
        }
    }
}

#[async_trait]
impl Listener for AuthzCommands {
    async fn handle(&self, event: &Event) -> Result<(), BotError> {
        let Event::Direct(msg) = event else {
            return Ok(());
        };
        let words: Vec<&str> = msg.text.split_whitespace().collect();
        if words.first() != Some(&"authz") || words.len() < 2 {
            return Ok(());
        }

        match (words[1], words.len()) {
            ("list", 2) => self.list_own(msg).await,
            ("list", 3) => self.list_other(msg, words[2]).await,
            ("grant", 5) => self.grant(msg, words[2], words[3], words[4]).await,
            ("revoke", 5) => self.revoke(msg, words[2], words[3], words[4]).await,
            _ => {
                msg.reply("Unknown or malformed command; say 'help authz' for help")
                    .await
            }
        }
    }
}
