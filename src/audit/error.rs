//! Audit error types

use crate::github::GitHubError;
use thiserror::Error;

/// Fatal audit failures
///
/// Per-repository failures never surface here; they are recorded in the
/// result's [`AnalysisSummary`](crate::audit::AnalysisSummary).
#[derive(Debug, Error)]
pub enum AuditError {
    /// Profile fetch failed; nothing else was attempted
    #[error("failed to get user info for {username}: {source}")]
    Profile {
        username: String,
        #[source]
        source: GitHubError,
    },

    /// Repository listing failed
    #[error("failed to get repositories for {username}: {source}")]
    RepositoryList {
        username: String,
        #[source]
        source: GitHubError,
    },

    /// Configuration rejected before any request was made
    #[error("invalid audit configuration: {0}")]
    InvalidConfig(#[from] InvalidSetting),

    /// Cancellation signal fired; gathered data was discarded
    #[error("audit cancelled")]
    Cancelled,
}

impl AuditError {
    /// Name of the pipeline stage that failed.
    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Profile { .. } => "profile",
            Self::RepositoryList { .. } => "repository list",
            Self::InvalidConfig(_) => "configuration",
            Self::Cancelled => "cancelled",
        }
    }
}

/// A configuration field holding an unusable value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} {reason}")]
pub struct InvalidSetting {
    pub field: &'static str,
    pub reason: &'static str,
}

impl InvalidSetting {
    #[must_use]
    pub const fn zero(field: &'static str) -> Self {
        Self {
            field,
            reason: "must be greater than zero",
        }
    }
}

pub type AuditOutcome<T> = Result<T, AuditError>;
