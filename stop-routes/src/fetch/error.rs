//! Fetch error types.

use std::path::PathBuf;

/// Errors fetching or saving pattern documents.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check the API key")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by the patterns API")]
    RateLimited,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Client could not be configured
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Writing the pattern file failed
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
