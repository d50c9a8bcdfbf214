//! GitHub recursive tree retrieval operation.

use crate::audit::types::TreeEntry;
use crate::github::{error::GitHubError, util::spawn_task};
use crate::runtime::AsyncTask;
use log::warn;
use octocrab::Octocrab;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct TreePayload {
    #[serde(default)]
    tree: Vec<TreeEntryPayload>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Debug, Deserialize)]
struct TreeEntryPayload {
    path: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Fetch the full file tree of `repo` at `reference` (e.g. `HEAD`).
pub(crate) fn get_tree(
    inner: Arc<Octocrab>,
    owner: impl Into<String>,
    repo: impl Into<String>,
    reference: impl Into<String>,
) -> AsyncTask<Result<Vec<TreeEntry>, GitHubError>> {
    let (owner, repo, reference) = (owner.into(), repo.into(), reference.into());
    spawn_task(async move {
        let payload: TreePayload = inner
            .get(
                format!("/repos/{owner}/{repo}/git/trees/{reference}"),
                Some(&[("recursive", "1")]),
            )
            .await
            .map_err(GitHubError::from)?;

        if payload.truncated {
            warn!("Tree for {owner}/{repo} was truncated by GitHub; sampling from a partial listing");
        }

        Ok(payload
            .tree
            .into_iter()
            .map(|e| TreeEntry {
                path: e.path,
                kind: e.kind,
            })
            .collect())
    })
}
