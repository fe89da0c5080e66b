//! Message handling - Event normalization and fan-out

pub mod bus;
pub mod normalizer;

pub use bus::{EventBus, EventKind, Listener};
pub use normalizer::Normalizer;
