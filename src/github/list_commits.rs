//! GitHub repository commits listing operation.

use crate::audit::types::CommitRecord;
use crate::github::{error::GitHubError, util::spawn_task};
use crate::runtime::AsyncTask;
use chrono::{DateTime, Utc};
use octocrab::{Octocrab, Page};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Query for one page of a repository's commits.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListCommitsOptions {
    /// GitHub login or email address to filter commits by author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Number of results per page (max 100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u8>,
}

impl ListCommitsOptions {
    /// Commits authored by `author`, one page of at most `limit` entries.
    #[must_use]
    pub fn by_author(author: impl Into<String>, limit: usize) -> Self {
        Self {
            author: Some(author.into()),
            per_page: Some(crate::github::util::page_size(limit)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitPayload {
    pub(crate) sha: String,
    pub(crate) commit: CommitBody,
    #[serde(default)]
    pub(crate) files: Option<Vec<FilePayload>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitBody {
    #[serde(default)]
    pub(crate) message: String,
    pub(crate) author: Option<CommitAuthor>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitAuthor {
    pub(crate) name: Option<String>,
    pub(crate) date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FilePayload {
    pub(crate) filename: String,
}

impl CommitPayload {
    pub(crate) fn into_record(self, repo: &str) -> CommitRecord {
        let (author, date) = match self.commit.author {
            Some(a) => (a.name.unwrap_or_default(), a.date.unwrap_or_default()),
            None => (String::new(), DateTime::<Utc>::default()),
        };
        CommitRecord {
            repo: repo.to_string(),
            sha: self.sha,
            message: self.commit.message,
            date,
            author,
            files_changed: self
                .files
                .unwrap_or_default()
                .into_iter()
                .map(|f| f.filename)
                .collect(),
        }
    }
}

/// List commits in a repository, most recent first.
///
/// Only the first page is requested; the result is cut to `per_page` entries.
pub(crate) fn list_commits(
    inner: Arc<Octocrab>,
    owner: impl Into<String>,
    repo: impl Into<String>,
    options: ListCommitsOptions,
) -> AsyncTask<Result<Vec<CommitRecord>, GitHubError>> {
    let owner = owner.into();
    let repo = repo.into();

    spawn_task(async move {
        let mut page: Page<CommitPayload> = inner
            .get(format!("/repos/{owner}/{repo}/commits"), Some(&options))
            .await
            .map_err(GitHubError::from)?;

        let limit = options.per_page.map_or(usize::MAX, usize::from);
        let commits = page
            .take_items()
            .into_iter()
            .take(limit)
            .map(|c| c.into_record(&repo))
            .collect();

        Ok(commits)
    })
}
