//! CLI error types.

use std::fmt;
use std::path::PathBuf;

use beatbox::{BeatBoxError, ConfigError, FetchError};

/// Errors reported by CLI commands.
#[derive(Debug)]
pub enum CliError {
    /// Configuration could not be resolved.
    Config(ConfigError),

    /// A library operation failed.
    BeatBox(BeatBoxError),

    /// A local style file could not be read.
    ReadFile { path: PathBuf, source: std::io::Error },

    /// JSON input or output failed.
    Json(String),

    /// Failed to create the Tokio runtime.
    RuntimeCreation(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::BeatBox(e) => write!(f, "{}", e),
            CliError::ReadFile { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            CliError::Json(msg) => write!(f, "Invalid JSON: {}", msg),
            CliError::RuntimeCreation(msg) => {
                write!(f, "Failed to create Tokio runtime: {}", msg)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            // Display already includes the wrapped error's message.
            CliError::Config(e) => std::error::Error::source(e),
            CliError::BeatBox(e) => std::error::Error::source(e),
            CliError::ReadFile { .. } => None,
            CliError::Json(_) => None,
            CliError::RuntimeCreation(_) => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<BeatBoxError> for CliError {
    fn from(e: BeatBoxError) -> Self {
        CliError::BeatBox(e)
    }
}

impl From<FetchError> for CliError {
    fn from(e: FetchError) -> Self {
        CliError::BeatBox(e.into())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e.to_string())
    }
}
