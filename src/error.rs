use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("GitHub API error: status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Preferences error: {0}")]
    Preferences(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExplorerError {
    /// Errors that end a single fetch attempt. They are all handled the same
    /// way: logged, shown as a generic message, loading flag cleared.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            ExplorerError::Http { .. }
                | ExplorerError::RateLimitExceeded(_)
                | ExplorerError::Network(_)
                | ExplorerError::MalformedResponse(_)
                | ExplorerError::Timeout(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ExplorerError>;
