//! Assembler error types.

use thiserror::Error;

pub type AssemblerResult<T> = Result<T, AssemblerError>;

#[derive(Debug, Error)]
pub enum AssemblerError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Media error: {0}")]
    Media(#[from] slidecast_media::MediaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AssemblerError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
