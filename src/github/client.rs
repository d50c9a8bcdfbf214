//! GitHub API client wrapper
//!
//! Provides clean API for the read-only GitHub operations an audit needs
//! without exposing Octocrab.
//!
//! # Examples
//!
//! ```rust,no_run
//! use github_audit::GitHubClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gh = GitHubClient::with_token("ghp_...")?;
//!
//!     let profile = gh.get_user("octocat").join().await?;
//!     let repos = gh.list_repositories("octocat").join().await?;
//!     println!("{} owns {} repositories", profile.username, repos.len());
//!
//!     Ok(())
//! }
//! ```

use crate::audit::types::{CommitRecord, RepositoryRecord, TreeEntry, UserProfile};
use crate::github::error::{GitHubError, GitHubResult};
use crate::runtime::AsyncTask;
use octocrab::Octocrab;
use std::sync::Arc;

/// GitHub API client wrapper that encapsulates Octocrab.
///
/// Cloning is cheap (Arc clone).
#[derive(Clone, Debug)]
pub struct GitHubClient {
    inner: Arc<Octocrab>,
}

impl GitHubClient {
    /// Create a new client builder
    #[must_use]
    pub fn builder() -> GitHubClientBuilder {
        GitHubClientBuilder::new()
    }

    /// Convenience: create client with personal access token
    pub fn with_token(token: impl Into<String>) -> GitHubResult<Self> {
        Self::builder().personal_token(token).build()
    }

    /// Unauthenticated client; public data only and a much lower rate limit.
    pub fn anonymous() -> GitHubResult<Self> {
        Self::builder().build()
    }

    /// Get inner Octocrab client
    #[must_use]
    pub fn inner(&self) -> &Arc<Octocrab> {
        &self.inner
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Get a user's public profile
    pub fn get_user(
        &self,
        username: impl Into<String>,
    ) -> AsyncTask<Result<UserProfile, GitHubError>> {
        crate::github::get_user::get_user(self.inner.clone(), username)
    }

    /// List all repositories of a user (every page merged)
    pub fn list_repositories(
        &self,
        username: impl Into<String>,
    ) -> AsyncTask<Result<Vec<RepositoryRecord>, GitHubError>> {
        crate::github::list_repositories::list_repositories(self.inner.clone(), username)
    }

    // ========================================================================
    // Repositories
    // ========================================================================

    /// Languages of a repository, largest byte volume first
    pub fn list_languages(
        &self,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> AsyncTask<Result<Vec<String>, GitHubError>> {
        crate::github::list_languages::list_languages(self.inner.clone(), owner, repo)
    }

    /// List commits
    pub fn list_commits(
        &self,
        owner: impl Into<String>,
        repo: impl Into<String>,
        options: crate::github::ListCommitsOptions,
    ) -> AsyncTask<Result<Vec<CommitRecord>, GitHubError>> {
        crate::github::list_commits::list_commits(self.inner.clone(), owner, repo, options)
    }

    /// Paths changed by a commit
    pub fn get_commit_files(
        &self,
        owner: impl Into<String>,
        repo: impl Into<String>,
        commit_sha: impl Into<String>,
    ) -> AsyncTask<Result<Vec<String>, GitHubError>> {
        crate::github::get_commit::get_commit_files(self.inner.clone(), owner, repo, commit_sha)
    }

    /// Recursive file tree at a reference
    pub fn get_tree(
        &self,
        owner: impl Into<String>,
        repo: impl Into<String>,
        reference: impl Into<String>,
    ) -> AsyncTask<Result<Vec<TreeEntry>, GitHubError>> {
        crate::github::get_tree::get_tree(self.inner.clone(), owner, repo, reference)
    }

    /// Decoded text of a single file
    pub fn get_file_contents(
        &self,
        owner: impl Into<String>,
        repo: impl Into<String>,
        path: impl Into<String>,
        ref_name: Option<String>,
    ) -> AsyncTask<Result<String, GitHubError>> {
        crate::github::get_file_contents::get_file_contents(
            self.inner.clone(),
            owner,
            repo,
            path,
            ref_name,
        )
    }
}

/// Builder for creating `GitHubClient`
pub struct GitHubClientBuilder {
    token: Option<String>,
    base_uri: Option<String>,
}

impl GitHubClientBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            token: None,
            base_uri: None,
        }
    }

    /// Set personal access token for authentication
    ///
    /// Blank tokens are ignored and the client stays anonymous.
    pub fn personal_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = (!token.trim().is_empty()).then_some(token);
        self
    }

    /// Set base URI (for GitHub Enterprise)
    pub fn base_uri(mut self, uri: impl Into<String>) -> Self {
        self.base_uri = Some(uri.into());
        self
    }

    /// Build the `GitHubClient`
    pub fn build(self) -> GitHubResult<GitHubClient> {
        let mut builder = Octocrab::builder();

        if let Some(token) = self.token {
            builder = builder.personal_token(token);
        }

        if let Some(uri) = self.base_uri {
            builder = builder
                .base_uri(&uri)
                .map_err(|e| GitHubError::ClientSetup(e.to_string()))?;
        }

        let octocrab = builder
            .build()
            .map_err(|e| GitHubError::ClientSetup(e.to_string()))?;

        Ok(GitHubClient {
            inner: Arc::new(octocrab),
        })
    }
}

impl Default for GitHubClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
