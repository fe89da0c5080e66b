//! Logs channels to files on the local filesystem and serves the
//! `history` command by pasting recent logs.
//!
//! Requires plugin '10-authz'.

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::errors::{BotError, PluginError};
use crate::application::messaging::{EventBus, EventKind, Listener};
use crate::application::services::Authz;
use crate::application::BotContext;
use crate::domain::entities::{DirectMessage, Event};
use crate::domain::traits::PasteService;
use crate::infrastructure::logging::ChannelLogger;
use crate::infrastructure::paste::OpenStackPaste;
use super::plugin::{Phase, Plugin};

pub struct LoggingPlugin {
    paste: Option<Arc<dyn PasteService>>,
}

impl LoggingPlugin {
    pub fn new() -> Self {
        Self { paste: None }
    }

    /// Use `paste` instead of the configured paste endpoint
    pub fn with_paste(paste: Arc<dyn PasteService>) -> Self {
        Self { paste: Some(paste) }
    }
}

impl Default for LoggingPlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Plugin for LoggingPlugin {
    fn id(&self) -> &str {
        "00-logging"
    }

    fn phase(&self) -> Phase {
        Phase::Feature
    }

    async fn setup(&self, ctx: &Arc<BotContext>, bus: &mut EventBus) -> Result<(), PluginError> {
        let logger = Arc::new(ChannelLogger::new(&ctx.config().logging.dir));
        let paste = self
            .paste
            .clone()
            .unwrap_or_else(|| Arc::new(OpenStackPaste::new(ctx.config().paste.endpoint.clone())));

        // Channel traffic, not the addressed kind: the log must carry
        // every line said in the channel, and must see the triggering
        // line before any reply a command produces.
        bus.subscribe(
            EventKind::Channel,
            self.id(),
            Arc::new(LogChannelTraffic {
                logger: logger.clone(),
            }),
        );
        // The bot's own lines come back as a separate kind.
        bus.subscribe(
            EventKind::SelfEcho,
            self.id(),
            Arc::new(LogChannelTraffic {
                logger: logger.clone(),
            }),
        );

        ctx.add_top_level_help(
            "history <channel>: get some history from <channel> in a pastie. Only available via PM.",
        );

        bus.subscribe(
            EventKind::Direct,
            self.id(),
            Arc::new(HistoryCommand::new(
                ctx.channels().to_vec(),
                ctx.authz()?,
                logger,
                paste,
            )),
        );
        Ok(())
    }
}

struct LogChannelTraffic {
    logger: Arc<ChannelLogger>,
}

#[async_trait]
impl Listener for LogChannelTraffic {
    async fn handle(&self, event: &Event) -> Result<(), BotError> {
        match event {
            Event::Channel(m) => self.logger.log(&m.sender, &m.channel, &m.text),
            Event::SelfEcho(m) => self.logger.log(&m.sender, &m.channel, &m.text),
            Event::Direct(_) => {}
        }
        Ok(())
    }
}

/// Command: "history <channel>"
///
/// Makes a pastie out of the last two files' worth of the channel's
/// logs and replies with the URL. Each file is typically a day, but
/// there may be gaps if nobody said anything on a given day.
pub struct HistoryCommand {
    channels: Vec<String>,
    authz: Arc<Authz>,
    logger: Arc<ChannelLogger>,
    paste: Arc<dyn PasteService>,
}

impl HistoryCommand {
    pub fn new(
        channels: Vec<String>,
        authz: Arc<Authz>,
        logger: Arc<ChannelLogger>,
        paste: Arc<dyn PasteService>,
    ) -> Self {
        Self {
            channels,
            authz,
            logger,
            paste,
        }
    }

    async fn run(&self, msg: &DirectMessage, channel: &str) -> Result<(), BotError> {
        if !self.channels.iter().any(|c| c == channel) {
            return msg.reply("Unknown channel").await;
        }
        if !self.authz.is_authorized(&msg.sender, channel, "history") {
            return msg
                .reply(&format!(
                    "Permission denied: you lack the 'history' permission for {}",
                    channel
                ))
                .await;
        }

        // Let pending writes land so the paste covers everything said
        // before the request.
        self.logger.flush().await;

        let files = match self.logger.logs_for_channel(channel).await {
            Ok(files) => files,
            Err(e) => {
                return msg.reply(&format!("Error getting channel logs: {}", e)).await;
            }
        };

        let mut contents = String::new();
        for file in files.iter().rev().take(2).rev() {
            match tokio::fs::read_to_string(file).await {
                Ok(text) => contents.push_str(&text),
                Err(e) => {
                    return msg.reply(&format!("Error getting channel logs: {}", e)).await;
                }
            }
        }

        if contents.is_empty() {
            return msg.reply("No history found").await;
        }

        match self.paste.create_paste(&contents).await {
            Ok(url) => msg.reply(&url).await,
            Err(e) => msg.reply(&format!("Error making pastie: {}", e)).await,
        }
    }
}

#[async_trait]
impl Listener for HistoryCommand {
    async fn handle(&self, event: &Event) -> Result<(), BotError> {
        let Event::Direct(msg) = event else {
            return Ok(());
        };
        let words: Vec<&str> = msg.text.split_whitespace().collect();
        if words.len() == 2 && words[0] == "history" {
            self.run(msg, words[1]).await?;
        }
        Ok(())
    }
}
