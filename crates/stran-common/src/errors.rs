use std::path::PathBuf;

use crate::types::WindowId;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    #[error("config watch error: {0}")]
    WatchError(String),

    #[error("cannot {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config cannot be written as TOML: {0}")]
    SerializeError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("unknown window: {0}")]
    UnknownWindow(WindowId),

    #[error("window {0} is disposed")]
    WindowDisposed(WindowId),

    #[error("content surface error: {0}")]
    Surface(String),

    #[error("content engine error: {0}")]
    Engine(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StranError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Browser(#[from] BrowserError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("translation error: {0}")]
    Translate(String),
}
