//! Error types for BeatBox operations.
//!
//! Parsing and translating locators never fail: an unrecognised locator is
//! a normal outcome ([`ParsedLocator::Unknown`](crate::locator::ParsedLocator::Unknown)
//! or the identity fallback). Errors only arise around configuration and the
//! network fetch of a style document.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for BeatBox operations.
pub type BeatBoxResult<T> = Result<T, BeatBoxError>;

/// Configuration problems detected before any network activity.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An operation that fetches a style document was called without a token.
    #[error("Access token is required to fetch style configuration")]
    MissingAccessToken,

    /// The API base URL is empty or not an http(s) URL.
    #[error("Invalid API URL '{0}': must start with http:// or https://")]
    InvalidApiUrl(String),

    /// The config file exists but could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file could not be parsed as INI.
    #[error("Failed to parse config file {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
}

/// Failures while retrieving a style document.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("Failed to fetch style: {status}")]
    Status { url: String, status: String },

    /// The request could not be completed.
    #[error("Request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// The response body is not a style document.
    #[error("Failed to decode style from {url}: {reason}")]
    Decode { url: String, reason: String },
}

/// Top-level error for the public BeatBox operations.
#[derive(Debug, Error)]
pub enum BeatBoxError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_message() {
        let err = BeatBoxError::from(ConfigError::MissingAccessToken);
        assert!(err.to_string().contains("Access token is required"));
        assert!(matches!(
            err,
            BeatBoxError::Config(ConfigError::MissingAccessToken)
        ));
    }

    #[test]
    fn test_status_error_carries_status_text() {
        let err = FetchError::Status {
            url: "https://example.com/style.json".to_string(),
            status: "404 Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to fetch style: 404 Not Found");
    }

    #[test]
    fn test_fetch_error_converts_to_top_level() {
        let err: BeatBoxError = FetchError::Transport {
            url: "https://example.com".to_string(),
            reason: "connection refused".to_string(),
        }
        .into();
        assert!(matches!(err, BeatBoxError::Fetch(_)));
        assert!(err.to_string().contains("connection refused"));
    }
}
