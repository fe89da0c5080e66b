//! Event bus - Fans normalized events out to registered listeners

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

use crate::application::errors::BotError;
use crate::domain::entities::Event;

/// The kinds of normalized events listeners can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Any message said in a channel
    Channel,
    /// A private message to the bot
    Direct,
    /// A message recognized as directed at the bot: a channel message
    /// with the `nick:` prefix, or any direct message
    Addressed,
    /// The bot's own channel line echoed back by the protocol client
    SelfEcho,
}

/// A listener for normalized events
#[async_trait]
pub trait Listener: Send + Sync {
    async fn handle(&self, event: &Event) -> Result<(), BotError>;
}

struct Registration {
    plugin: String,
    listener: Arc<dyn Listener>,
}

/// Fans each event out to every listener registered for its kind, in
/// registration order. One listener's failure is logged and does not
/// stop the others; there is no priority or cancellation.
#[derive(Default)]
pub struct EventBus {
    listeners: HashMap<EventKind, Vec<Registration>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for an event kind. `plugin` names the owner
    /// for failure reports.
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        plugin: impl Into<String>,
        listener: Arc<dyn Listener>,
    ) {
        self.listeners.entry(kind).or_default().push(Registration {
            plugin: plugin.into(),
            listener,
        });
    }

    /// Dispatch an event to every listener for `kind`, sequentially.
    /// Each listener runs to completion before the next starts.
    pub async fn dispatch(&self, kind: EventKind, event: &Event) {
        let Some(registrations) = self.listeners.get(&kind) else {
            return;
        };
        for reg in registrations {
            if let Err(e) = reg.listener.handle(event).await {
                warn!(plugin = %reg.plugin, ?kind, "listener failed: {e}");
            }
        }
    }

    /// Number of listeners registered for a kind
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map(Vec::len).unwrap_or(0)
    }
}
