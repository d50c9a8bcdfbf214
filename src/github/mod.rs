//! GitHub API operations module
//!
//! Provides the read-only GitHub REST operations an audit consumes, using
//! the octocrab library.

pub mod client;
pub mod error;
pub mod util;

// Re-export client types
pub use client::{GitHubClient, GitHubClientBuilder};

// Re-export error types
pub use error::{GitHubError, GitHubResult};
pub use util::spawn_task;

// Re-export options types
pub use list_commits::ListCommitsOptions;

// GitHub API operations - Users (internal)
pub(crate) mod get_user;
pub(crate) mod list_repositories;

// GitHub API operations - Repositories (internal)
pub(crate) mod get_commit;
pub(crate) mod get_file_contents;
pub(crate) mod get_tree;
pub(crate) mod list_commits;
pub(crate) mod list_languages;
