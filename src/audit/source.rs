//! Remote data source seam for the audit pipeline

use std::future::Future;

use crate::audit::types::{CommitRecord, RepositoryRecord, TreeEntry, UserProfile};
use crate::github::{GitHubClient, GitHubResult, ListCommitsOptions};

/// Everything the audit reads from a code host
///
/// [`GitHubClient`] is the production implementation; tests substitute an
/// in-memory fake.
pub trait AuditSource: Send + Sync {
    fn get_profile(&self, username: &str) -> impl Future<Output = GitHubResult<UserProfile>> + Send;

    /// All repositories of `username`, every page merged in encounter order.
    fn list_repositories(
        &self,
        username: &str,
    ) -> impl Future<Output = GitHubResult<Vec<RepositoryRecord>>> + Send;

    /// Language names ordered by byte volume, largest first.
    fn get_languages(
        &self,
        owner: &str,
        repo: &str,
    ) -> impl Future<Output = GitHubResult<Vec<String>>> + Send;

    /// Up to `limit` commits by `author`, most recent first.
    fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        author: &str,
        limit: usize,
    ) -> impl Future<Output = GitHubResult<Vec<CommitRecord>>> + Send;

    fn get_commit_files(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
    ) -> impl Future<Output = GitHubResult<Vec<String>>> + Send;

    fn get_tree(
        &self,
        owner: &str,
        repo: &str,
        reference: &str,
    ) -> impl Future<Output = GitHubResult<Vec<TreeEntry>>> + Send;

    /// Decoded text of one file at the default branch.
    fn get_blob_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> impl Future<Output = GitHubResult<String>> + Send;
}

impl AuditSource for GitHubClient {
    async fn get_profile(&self, username: &str) -> GitHubResult<UserProfile> {
        self.get_user(username).join().await
    }

    async fn list_repositories(&self, username: &str) -> GitHubResult<Vec<RepositoryRecord>> {
        GitHubClient::list_repositories(self, username).join().await
    }

    async fn get_languages(&self, owner: &str, repo: &str) -> GitHubResult<Vec<String>> {
        self.list_languages(owner, repo).join().await
    }

    async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        author: &str,
        limit: usize,
    ) -> GitHubResult<Vec<CommitRecord>> {
        let options = ListCommitsOptions::by_author(author, limit);
        GitHubClient::list_commits(self, owner, repo, options)
            .join()
            .await
    }

    async fn get_commit_files(&self, owner: &str, repo: &str, sha: &str) -> GitHubResult<Vec<String>> {
        GitHubClient::get_commit_files(self, owner, repo, sha).join().await
    }

    async fn get_tree(&self, owner: &str, repo: &str, reference: &str) -> GitHubResult<Vec<TreeEntry>> {
        GitHubClient::get_tree(self, owner, repo, reference).join().await
    }

    async fn get_blob_content(&self, owner: &str, repo: &str, path: &str) -> GitHubResult<String> {
        self.get_file_contents(owner, repo, path, None).join().await
    }
}
