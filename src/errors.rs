use std::io;

use thiserror::Error;
use tracker_config::ConfigError;
use tracker_core::CoreError;

/// Failures surfaced by CLI commands and start-up.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Usage(String),
    #[error("Unknown command `{0}`")]
    UnknownCommand(String),
    #[error("exit requested")]
    ExitRequested,
}

impl CliError {
    pub(crate) fn usage(message: impl Into<String>) -> Self {
        CliError::Usage(message.into())
    }
}

pub type CommandResult = Result<(), CliError>;
