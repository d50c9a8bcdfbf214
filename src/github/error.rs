//! GitHub API error types

use thiserror::Error;

/// Error types for GitHub API operations
#[derive(Debug, Error)]
pub enum GitHubError {
    /// Octocrab library error (transport, decoding, non-classified API failures)
    #[error("Octocrab error: {0}")]
    Octocrab(#[source] octocrab::Error),

    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded (403/429 carrying a rate-limit message)
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Invalid input parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Payload arrived but could not be turned into usable data
    #[error("Failed to decode {what}: {reason}")]
    Decode { what: String, reason: String },

    /// Client setup/configuration error
    #[error("Client setup failed: {0}")]
    ClientSetup(String),

    /// Background task dropped its result channel
    #[error("Task channel closed: {0}")]
    Task(String),
}

/// Convenience result alias for GitHub operations
pub type GitHubResult<T> = Result<T, GitHubError>;

impl From<octocrab::Error> for GitHubError {
    fn from(err: octocrab::Error) -> Self {
        if let octocrab::Error::GitHub { source, .. } = &err {
            let status = source.status_code.as_u16();
            let message = source.message.clone();
            if status == 404 {
                return GitHubError::NotFound(message);
            }
            if (status == 403 || status == 429) && message.to_lowercase().contains("rate limit") {
                return GitHubError::RateLimitExceeded(message);
            }
        }
        GitHubError::Octocrab(err)
    }
}

impl From<tokio::sync::oneshot::error::RecvError> for GitHubError {
    fn from(err: tokio::sync::oneshot::error::RecvError) -> Self {
        GitHubError::Task(err.to_string())
    }
}
