//! Startup error type

use thiserror::Error;

/// Anything that stops the server from coming up
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("{0}")]
    Address(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("logger setup failed: {0}")]
    Logger(String),
}
