//! GitHub commit retrieval operation.

use crate::github::list_commits::CommitPayload;
use crate::github::{error::GitHubError, util::spawn_task};
use crate::runtime::AsyncTask;
use octocrab::Octocrab;
use std::sync::Arc;

/// Get the paths changed by a specific commit.
pub(crate) fn get_commit_files(
    inner: Arc<Octocrab>,
    owner: impl Into<String>,
    repo: impl Into<String>,
    sha: impl Into<String>,
) -> AsyncTask<Result<Vec<String>, GitHubError>> {
    let owner = owner.into();
    let repo = repo.into();
    let sha = sha.into();

    spawn_task(async move {
        // The single-commit endpoint is the only one that carries `files`
        let commit: CommitPayload = inner
            .get(format!("/repos/{owner}/{repo}/commits/{sha}"), None::<&()>)
            .await
            .map_err(GitHubError::from)?;

        Ok(commit.into_record(&repo).files_changed)
    })
}
