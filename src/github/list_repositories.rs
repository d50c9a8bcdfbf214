//! GitHub user repository listing operation (all pages).

use crate::audit::types::RepositoryRecord;
use crate::github::{error::GitHubError, util::or_empty, util::spawn_task};
use crate::runtime::AsyncTask;
use chrono::{DateTime, Utc};
use log::debug;
use octocrab::{Octocrab, Page};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize)]
struct ListParams {
    r#type: &'static str,
    sort: &'static str,
    direction: &'static str,
    per_page: u8,
}

#[derive(Debug, Deserialize)]
struct RepositoryPayload {
    name: String,
    description: Option<String>,
    #[serde(default)]
    stargazers_count: u32,
    #[serde(default)]
    fork: bool,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    parent: Option<ParentPayload>,
}

#[derive(Debug, Deserialize)]
struct ParentPayload {
    full_name: String,
}

impl From<RepositoryPayload> for RepositoryRecord {
    fn from(repo: RepositoryPayload) -> Self {
        let fork_source = if repo.fork {
            repo.parent.map(|p| p.full_name)
        } else {
            None
        };
        RepositoryRecord {
            name: repo.name,
            description: or_empty(repo.description),
            created_at: repo.created_at.unwrap_or_default(),
            updated_at: repo.updated_at.unwrap_or_default(),
            stars: repo.stargazers_count,
            fork: repo.fork,
            fork_source,
            ..RepositoryRecord::default()
        }
    }
}

/// List every repository of `username`, most recently updated first.
///
/// Follows the `Link: rel="next"` chain until GitHub reports no further page.
pub(crate) fn list_repositories(
    inner: Arc<Octocrab>,
    username: impl Into<String>,
) -> AsyncTask<Result<Vec<RepositoryRecord>, GitHubError>> {
    let username = username.into();
    spawn_task(async move {
        let params = ListParams {
            r#type: "all",
            sort: "updated",
            direction: "desc",
            per_page: 100,
        };

        let mut page: Page<RepositoryPayload> = inner
            .get(format!("/users/{username}/repos"), Some(&params))
            .await
            .map_err(GitHubError::from)?;

        let mut repos = Vec::new();
        let mut pages = 1usize;
        loop {
            repos.extend(page.take_items().into_iter().map(RepositoryRecord::from));
            match inner
                .get_page::<RepositoryPayload>(&page.next)
                .await
                .map_err(GitHubError::from)?
            {
                Some(next) => {
                    page = next;
                    pages += 1;
                }
                None => break,
            }
        }

        debug!("Listed {} repositories for {username} across {pages} page(s)", repos.len());
        Ok(repos)
    })
}
