//! Domain traits - Abstractions for infrastructure implementations

pub mod chat;
pub mod paste;

pub use chat::ChatClient;
pub use paste::PasteService;
