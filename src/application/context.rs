//! Shared bot context - the one object every plugin gets a handle to
//!
//! Constructed once at startup and passed by reference everywhere; no
//! ambient globals. Foundation plugins install the brain and authz into
//! their slots before any feature plugin that reads them loads.

use once_cell::sync::OnceCell;
use std::sync::{Arc, RwLock};

use crate::application::errors::PluginError;
use crate::application::services::{Authz, HelpRegistry, HelpText};
use crate::domain::traits::ChatClient;
use crate::infrastructure::config::Config;
use crate::infrastructure::store::Brain;

pub struct BotContext {
    config: Config,
    chat: Arc<dyn ChatClient>,
    help: RwLock<HelpRegistry>,
    brain: OnceCell<Arc<Brain>>,
    authz: OnceCell<Arc<Authz>>,
}

impl BotContext {
    pub fn new(config: Config, chat: Arc<dyn ChatClient>) -> Arc<Self> {
        Arc::new(Self {
            config,
            chat,
            help: RwLock::new(HelpRegistry::new()),
            brain: OnceCell::new(),
            authz: OnceCell::new(),
        })
    }

    pub fn nick(&self) -> &str {
        &self.config.bot.nick
    }

    pub fn channels(&self) -> &[String] {
        &self.config.bot.channels
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn chat(&self) -> Arc<dyn ChatClient> {
        self.chat.clone()
    }

    // -- help registry --------------------------------------------------

    pub fn add_top_level_help(&self, summary: impl Into<String>) {
        self.help
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .add_top_level(summary);
    }

    pub fn add_command_help(&self, command: impl Into<String>, help: impl Into<HelpText>) {
        self.help
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .add_command(command, help);
    }

    pub fn top_level_help(&self) -> Vec<String> {
        self.help
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .top_level()
            .to_vec()
    }

    pub fn command_help(&self, name: &str) -> Option<HelpText> {
        self.help
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .command(name)
            .cloned()
    }

    // -- foundation slots ----------------------------------------------

    pub fn install_brain(&self, brain: Arc<Brain>) -> Result<(), PluginError> {
        self.brain
            .set(brain)
            .map_err(|_| PluginError::AlreadyInstalled("brain"))
    }

    pub fn brain(&self) -> Result<Arc<Brain>, PluginError> {
        self.brain
            .get()
            .cloned()
            .ok_or(PluginError::NotInstalled("brain"))
    }

    pub fn install_authz(&self, authz: Arc<Authz>) -> Result<(), PluginError> {
        self.authz
            .set(authz)
            .map_err(|_| PluginError::AlreadyInstalled("authz"))
    }

    pub fn authz(&self) -> Result<Arc<Authz>, PluginError> {
        self.authz
            .get()
            .cloned()
            .ok_or(PluginError::NotInstalled("authz"))
    }
}
