use billbook_config::ConfigError;
use billbook_core::CoreError;
use rustyline::error::ReadlineError;
use thiserror::Error;

/// Top-level error for the shell binary.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Line editor error: {0}")]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Invalid input: {0}")]
    Input(String),
}
