//! Error types for the CLI

use keypad_calc::core::CalcError;
use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A script token the calculator does not understand
    #[error("{0}")]
    Input(#[from] CalcError),

    /// Terminal setup or drawing failed
    #[error("Terminal error: {message}")]
    Terminal {
        /// Error message
        message: String,
    },

    /// JSON output failed
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    /// Create a terminal error
    #[must_use]
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }
}
