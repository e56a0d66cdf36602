//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Recorded stream not found
    #[error("Input recording not found: {path}")]
    InputNotFound { path: String },

    /// Recording could not be read
    #[error("Failed to read recording {path}: {source}")]
    InputRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Transport event rejected by the session
    #[error("Replay failed: {0}")]
    Session(#[from] session::SessionError),
}

impl CliError {
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn input_not_found(path: impl Into<String>) -> Self {
        Self::InputNotFound { path: path.into() }
    }

    pub fn input_read(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::InputRead {
            path: path.into(),
            source,
        }
    }
}
