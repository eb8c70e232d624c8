use std::io;
use thiserror::Error;

/// Error type for redux-io operations.
#[derive(Error, Debug)]
pub enum ReduxIoError {
    /// IO error occurred during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The data directory could not be listed.
    #[error("Can't read data directory {0}")]
    DataDirectory(String),

    /// A required input file could not be opened.
    #[error("Can't open {path}: {reason}")]
    Open { path: String, reason: String },

    /// Invalid configuration file.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for redux-io operations.
pub type Result<T> = std::result::Result<T, ReduxIoError>;
