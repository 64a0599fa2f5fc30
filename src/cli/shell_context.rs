use billbook_config::{Config, ConfigManager};
use billbook_core::KeyValueStore;
use billbook_storage_json::JsonFileStore;
use dialoguer::theme::ColorfulTheme;

use crate::{errors::CliError, session::LedgerSession, utils};

use super::{commands, output, registry::CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Everything a command handler can reach: the session, preferences, and
/// the command table.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub session: LedgerSession,
    pub config: Config,
    /// Absent when preferences live only in memory (tests, dry runs).
    pub config_manager: Option<ConfigManager>,
    pub theme: ColorfulTheme,
}

impl ShellContext {
    /// Builds the context from the data directory (`BILLBOOK_HOME` or
    /// `~/.billbook`).
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let base = utils::app_data_dir();
        let manager = ConfigManager::with_base_dir(&base)?;
        let config = manager.load()?;
        let store = JsonFileStore::new(utils::store_dir())?;
        Ok(Self::with_store(mode, config, Box::new(store)).with_config_manager(manager))
    }

    pub fn with_store(mode: CliMode, config: Config, store: Box<dyn KeyValueStore>) -> Self {
        output::apply_config(&config);
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        let session = LedgerSession::open(store, config.storage_key.clone());

        Self {
            mode,
            registry,
            session,
            config,
            config_manager: None,
            theme: ColorfulTheme::default(),
        }
    }

    pub fn with_config_manager(mut self, manager: ConfigManager) -> Self {
        self.config_manager = Some(manager);
        self
    }

    /// Command names plus aliases, for tab completion.
    pub fn completion_words(&self) -> Vec<&'static str> {
        self.registry
            .names()
            .chain(self.registry.aliases())
            .collect()
    }

    /// `billbook (3 people)> `, flagged while an autosave is failing.
    pub fn prompt(&self) -> String {
        let people = self.session.ledger().len();
        let noun = if people == 1 { "person" } else { "people" };
        if self.session.has_unsaved_changes() {
            format!("billbook ({people} {noun}, unsaved)> ")
        } else {
            format!("billbook ({people} {noun})> ")
        }
    }
}
