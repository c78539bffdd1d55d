use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MindPaceError>;

#[derive(Debug, Error)]
pub enum MindPaceError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid settings file: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("logging setup failed: {0}")]
    Logging(String),
}
