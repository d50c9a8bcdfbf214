//! GitHub repository language histogram operation.

use crate::github::{error::GitHubError, util::spawn_task};
use crate::runtime::AsyncTask;
use octocrab::Octocrab;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Order a language → bytes histogram by volume, largest first.
///
/// Ties fall back to the name so the ordering never depends on map iteration.
pub(crate) fn rank_languages(histogram: BTreeMap<String, u64>) -> Vec<String> {
    let mut entries: Vec<(String, u64)> = histogram.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.into_iter().map(|(name, _)| name).collect()
}

/// List languages of a repository ordered by byte volume descending.
pub(crate) fn list_languages(
    inner: Arc<Octocrab>,
    owner: impl Into<String>,
    repo: impl Into<String>,
) -> AsyncTask<Result<Vec<String>, GitHubError>> {
    let (owner, repo) = (owner.into(), repo.into());
    spawn_task(async move {
        let histogram: BTreeMap<String, u64> = inner
            .get(format!("/repos/{owner}/{repo}/languages"), None::<&()>)
            .await
            .map_err(GitHubError::from)?;
        Ok(rank_languages(histogram))
    })
}
