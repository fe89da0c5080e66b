use async_trait::async_trait;
use crate::application::errors::BotError;

/// ChatClient trait - abstraction for the wire-level chat protocol client.
///
/// The core never speaks the protocol itself; it only needs to deliver
/// text to a channel or a user, and to hang up.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Say something in a channel
    async fn send_channel(&self, channel: &str, text: &str) -> Result<(), BotError>;

    /// Send a private message to a user
    async fn send_direct(&self, nick: &str, text: &str) -> Result<(), BotError>;

    /// Disconnect from the chat network
    async fn disconnect(&self) -> Result<(), BotError>;
}
