//! Console adapter for development/testing

use async_trait::async_trait;
use crate::application::errors::BotError;
use crate::domain::traits::ChatClient;

/// Chat client that prints outbound traffic to stdout, for running the
/// bot locally without a chat network.
pub struct ConsoleAdapter;

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self
    }

    pub async fn read_line(&self, prompt: &str) -> Option<String> {
        use std::io::Write;
        print!("{}", prompt);
        let _ = std::io::stdout().flush();
        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).ok()? == 0 {
            return None;
        }
        Some(input.trim_end().to_string())
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatClient for ConsoleAdapter {
    async fn send_channel(&self, channel: &str, text: &str) -> Result<(), BotError> {
        println!("-> {}: {}", channel, text);
        Ok(())
    }

    async fn send_direct(&self, nick: &str, text: &str) -> Result<(), BotError> {
        println!("-> {}: {}", nick, text);
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), BotError> {
        tracing::info!("console session closed");
        Ok(())
    }
}
