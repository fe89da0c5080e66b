//! Application services - Shared facilities plugins build on

pub mod authz;
pub mod help;

pub use authz::Authz;
pub use help::{HelpRegistry, HelpText};
