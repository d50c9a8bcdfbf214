//! GitHub File contents retrieval operation.

use crate::github::{error::GitHubError, util::spawn_task};
use crate::runtime::AsyncTask;
use octocrab::Octocrab;
use std::sync::Arc;

/// Retrieve and decode the text of a single file.
pub(crate) fn get_file_contents(
    inner: Arc<Octocrab>,
    owner: impl Into<String>,
    repo: impl Into<String>,
    path: impl Into<String>,
    reference: Option<String>,
) -> AsyncTask<Result<String, GitHubError>> {
    let (owner, repo, path) = (owner.into(), repo.into(), path.into());
    spawn_task(async move {
        let handler = inner.repos(&owner, &repo);
        let mut req = handler.get_content().path(&path);

        if let Some(r) = reference {
            req = req.r#ref(r);
        }

        let content_items = req.send().await.map_err(GitHubError::from)?;
        let item = content_items.items.into_iter().next().ok_or_else(|| {
            GitHubError::NotFound(format!("{owner}/{repo}:{path} returned no content"))
        })?;

        // Directories and oversized blobs come back without inline content
        item.decoded_content().ok_or_else(|| GitHubError::Decode {
            what: format!("{owner}/{repo}:{path}"),
            reason: "missing or non-UTF-8 base64 content".to_string(),
        })
    })
}
