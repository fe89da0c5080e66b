use std::fmt;
use std::sync::Arc;

use crate::application::errors::BotError;
use crate::domain::traits::ChatClient;

/// A message said in a channel
#[derive(Clone)]
pub struct ChannelMessage {
    pub sender: String,
    pub channel: String,
    pub text: String,
    /// True when the text starts with the bot's name followed by a colon.
    /// The prefix is NOT stripped; consumers strip it themselves.
    pub addressed: bool,
    chat: Arc<dyn ChatClient>,
}

impl ChannelMessage {
    pub fn new(
        sender: impl Into<String>,
        channel: impl Into<String>,
        text: impl Into<String>,
        addressed: bool,
        chat: Arc<dyn ChatClient>,
    ) -> Self {
        Self {
            sender: sender.into(),
            channel: channel.into(),
            text: text.into(),
            addressed,
            chat,
        }
    }

    /// Reply in the channel the message came from
    pub async fn reply(&self, text: &str) -> Result<(), BotError> {
        self.chat.send_channel(&self.channel, text).await
    }
}

/// A private message sent directly to the bot
#[derive(Clone)]
pub struct DirectMessage {
    pub sender: String,
    pub text: String,
    chat: Arc<dyn ChatClient>,
}

impl DirectMessage {
    pub fn new(
        sender: impl Into<String>,
        text: impl Into<String>,
        chat: Arc<dyn ChatClient>,
    ) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
            chat,
        }
    }

    /// Reply privately to the sender
    pub async fn reply(&self, text: &str) -> Result<(), BotError> {
        self.chat.send_direct(&self.sender, text).await
    }
}

/// The bot's own line echoed back by the protocol client, attributed to
/// the bot's identity. Kept distinct from [`ChannelMessage`] so logging
/// listeners can order it correctly relative to other channel activity.
#[derive(Clone)]
pub struct SelfEcho {
    pub sender: String,
    pub channel: String,
    pub text: String,
}

impl SelfEcho {
    pub fn new(
        sender: impl Into<String>,
        channel: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            channel: channel.into(),
            text: text.into(),
        }
    }
}

/// A normalized event, derived from a raw protocol callback
#[derive(Clone)]
pub enum Event {
    Channel(ChannelMessage),
    Direct(DirectMessage),
    SelfEcho(SelfEcho),
}

impl Event {
    pub fn sender(&self) -> &str {
        match self {
            Event::Channel(m) => &m.sender,
            Event::Direct(m) => &m.sender,
            Event::SelfEcho(m) => &m.sender,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Event::Channel(m) => &m.text,
            Event::Direct(m) => &m.text,
            Event::SelfEcho(m) => &m.text,
        }
    }

    /// Route a reply back to where the message came from: the channel
    /// for channel messages, the sender for direct messages. Self
    /// echoes have no reply destination and are dropped.
    pub async fn reply(&self, text: &str) -> Result<(), BotError> {
        match self {
            Event::Channel(m) => m.reply(text).await,
            Event::Direct(m) => m.reply(text).await,
            Event::SelfEcho(_) => Ok(()),
        }
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Channel(m) => f
                .debug_struct("Channel")
                .field("sender", &m.sender)
                .field("channel", &m.channel)
                .field("text", &m.text)
                .field("addressed", &m.addressed)
                .finish(),
            Event::Direct(m) => f
                .debug_struct("Direct")
                .field("sender", &m.sender)
                .field("text", &m.text)
                .finish(),
            Event::SelfEcho(m) => f
                .debug_struct("SelfEcho")
                .field("sender", &m.sender)
                .field("channel", &m.channel)
                .field("text", &m.text)
                .finish(),
        }
    }
}
