//! Event normalizer - Converts raw protocol callbacks into canonical events

use std::sync::Arc;

use crate::domain::entities::{ChannelMessage, DirectMessage, Event, SelfEcho};
use crate::domain::traits::ChatClient;
use super::bus::{EventBus, EventKind};

/// Turns the protocol client's raw callbacks into normalized events and
/// pushes them through the bus. Performs no I/O of its own.
pub struct Normalizer {
    nick: String,
    chat: Arc<dyn ChatClient>,
}

impl Normalizer {
    pub fn new(nick: impl Into<String>, chat: Arc<dyn ChatClient>) -> Self {
        Self {
            nick: nick.into(),
            chat,
        }
    }

    /// A message was said in a channel. Always emits a channel event;
    /// if the text starts with `nick:`, also emits a derived addressed
    /// event carrying the same payload (the prefix is not stripped).
    ///
    /// Channel listeners run before addressed listeners so that a
    /// logger sees the triggering line before any reply it provokes.
    pub async fn channel_text(&self, bus: &EventBus, sender: &str, channel: &str, text: &str) {
        let addressed = self.is_addressed(text);
        let event = Event::Channel(ChannelMessage::new(
            sender,
            channel,
            text,
            addressed,
            self.chat.clone(),
        ));
        bus.dispatch(EventKind::Channel, &event).await;
        if addressed {
            bus.dispatch(EventKind::Addressed, &event).await;
        }
    }

    /// A private message arrived. Direct messages are always addressed
    /// to the bot, so both kinds fire.
    pub async fn private_text(&self, bus: &EventBus, sender: &str, text: &str) {
        let event = Event::Direct(DirectMessage::new(sender, text, self.chat.clone()));
        bus.dispatch(EventKind::Direct, &event).await;
        bus.dispatch(EventKind::Addressed, &event).await;
    }

    /// The protocol client echoed back something the bot itself said.
    /// Emitted as a distinct kind, attributed to the bot's identity.
    pub async fn self_echo(&self, bus: &EventBus, channel: &str, text: &str) {
        let event = Event::SelfEcho(SelfEcho::new(self.nick.clone(), channel, text));
        bus.dispatch(EventKind::SelfEcho, &event).await;
    }

    fn is_addressed(&self, text: &str) -> bool {
        text.strip_prefix(self.nick.as_str())
            .is_some_and(|rest| rest.starts_with(':'))
    }
}
