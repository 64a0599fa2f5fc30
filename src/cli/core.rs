//! Command dispatch and error reporting for the shell.

use billbook_core::CoreError;
use strsim::levenshtein;
use thiserror::Error;

pub use crate::errors::CliError;

use super::io as cli_io;
use super::output;
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] billbook_config::ConfigError),
    #[error("Prompt failed: {0}")]
    Dialoguer(#[from] dialoguer::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl ShellContext {
    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.handler(command) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        let outcome = match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        };
        if let Some(message) = self.session.take_save_error() {
            output::warning(format!("Changes were not saved: {}", message));
        }
        outcome
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, input), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                output::info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    /// Asks before destructive commands. Script mode and the
    /// `confirm_deletions = false` preference answer yes.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script || !self.config.confirm_deletions {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true)
            .map_err(|err| CliError::Input(err.to_string()))
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Core(err @ CoreError::IndexOutOfRange { .. }) => {
                output::error(err);
                output::hint("Run `list` to see current indices.");
                Ok(())
            }
            CommandError::Core(CoreError::Format(message)) => {
                output::error(format!("Invalid file format: {}", message));
                output::hint("Import expects a JSON array exported by `export`.");
                Ok(())
            }
            other => {
                output::error(other);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use billbook_config::Config;
    use billbook_core::{CoreResult, KeyValueStore, MemoryStore};

    use super::*;
    use crate::cli::shell::handle_line;

    fn context() -> ShellContext {
        ShellContext::with_store(
            CliMode::Script,
            Config::default(),
            Box::new(MemoryStore::new()),
        )
    }

    #[test]
    fn scripted_commands_drive_the_session() {
        let mut ctx = context();
        handle_line(&mut ctx, "person add Dana").unwrap();
        handle_line(&mut ctx, "bill add 0 01/06/2024 1000").unwrap();
        handle_line(&mut ctx, "installment add 0 0 15/06/2024 400").unwrap();

        let bill = &ctx.session.ledger().people[0].bills[0];
        assert_eq!(bill.paid, 400.0);
        assert_eq!(bill.remaining(), 600.0);

        handle_line(&mut ctx, "installment delete 0 0 0").unwrap();
        assert_eq!(ctx.session.ledger().people[0].bills[0].paid, 0.0);
    }

    #[test]
    fn quoted_names_keep_spaces() {
        let mut ctx = context();
        handle_line(&mut ctx, "person add \"Mary Ann\"").unwrap();
        handle_line(&mut ctx, "person add Bob Smith").unwrap();
        let names: Vec<&str> = ctx
            .session
            .ledger()
            .iter()
            .map(|person| person.name.as_str())
            .collect();
        assert_eq!(names, ["Bob Smith", "Mary Ann"]);
    }

    #[test]
    fn bad_arguments_surface_as_errors() {
        let mut ctx = context();
        assert!(matches!(
            handle_line(&mut ctx, "bill add 0 01/06/2024 1000"),
            Err(CommandError::Core(CoreError::IndexOutOfRange { .. }))
        ));
        handle_line(&mut ctx, "person add Dana").unwrap();
        assert!(matches!(
            handle_line(&mut ctx, "bill add 0 01/06/2024 lots"),
            Err(CommandError::Core(CoreError::Validation(_)))
        ));
        assert!(matches!(
            handle_line(&mut ctx, "bill add zero 01/06/2024 5"),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(ctx.session.ledger().people[0].bills.is_empty());
    }

    #[test]
    fn exit_and_unknown_commands_control_the_loop() {
        let mut ctx = context();
        assert_eq!(handle_line(&mut ctx, "lsit").unwrap(), LoopControl::Continue);
        assert_eq!(handle_line(&mut ctx, "exit").unwrap(), LoopControl::Exit);
        assert_eq!(handle_line(&mut ctx, "quit").unwrap(), LoopControl::Exit);
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let mut ctx = context();
        assert_eq!(handle_line(&mut ctx, "   ").unwrap(), LoopControl::Continue);
        assert_eq!(
            handle_line(&mut ctx, "# person add Ghost").unwrap(),
            LoopControl::Continue
        );
        assert!(ctx.session.ledger().is_empty());
    }

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn load(&self, _key: &str) -> CoreResult<Option<String>> {
            Ok(None)
        }

        fn save(&self, _key: &str, _value: &str) -> CoreResult<()> {
            Err(CoreError::Storage("read-only".into()))
        }

        fn clear(&self) -> CoreResult<()> {
            Ok(())
        }
    }

    #[test]
    fn prompt_flags_unsaved_changes() {
        let mut ctx = context();
        handle_line(&mut ctx, "person add Dana").unwrap();
        assert_eq!(ctx.prompt(), "billbook (1 person)> ");

        let mut ctx =
            ShellContext::with_store(CliMode::Script, Config::default(), Box::new(ReadOnlyStore));
        handle_line(&mut ctx, "person add Dana").unwrap();
        assert_eq!(ctx.prompt(), "billbook (1 person, unsaved)> ");
        assert!(ctx.completion_words().contains(&"ls"));
    }

    #[test]
    fn deletes_check_indices_before_asking() {
        let mut ctx = ShellContext::with_store(
            CliMode::Interactive,
            Config::default(),
            Box::new(MemoryStore::new()),
        );
        ctx.session.add_person("Dana").unwrap();
        ctx.session
            .add_bill(0, billbook_domain::BillDate::parse("01/06/2024").unwrap(), 50.0)
            .unwrap();

        assert!(matches!(
            handle_line(&mut ctx, "bill delete 0 3"),
            Err(CommandError::Core(CoreError::IndexOutOfRange {
                target: billbook_core::IndexTarget::Bill,
                ..
            }))
        ));
        assert!(matches!(
            handle_line(&mut ctx, "installment delete 0 0 0"),
            Err(CommandError::Core(CoreError::IndexOutOfRange {
                target: billbook_core::IndexTarget::Installment,
                ..
            }))
        ));
        assert_eq!(ctx.session.ledger().people[0].bills.len(), 1);
    }

    #[test]
    fn config_set_updates_preferences_in_memory() {
        let mut ctx = context();
        handle_line(&mut ctx, "config set currency_symbol $").unwrap();
        assert_eq!(ctx.config.currency_symbol, "$");

        assert!(matches!(
            handle_line(&mut ctx, "config set storage_key other"),
            Err(CommandError::InvalidArguments(_))
        ));
        assert_eq!(ctx.config.storage_key, "peopleData");
    }
}
