use std::io;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that end the program before or during the game loop.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("could not install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}
