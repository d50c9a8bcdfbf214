//! GitHub public user profile retrieval operation.

use crate::audit::types::UserProfile;
use crate::github::{error::GitHubError, util::or_empty, util::spawn_task};
use crate::runtime::AsyncTask;
use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct UserPayload {
    login: String,
    name: Option<String>,
    company: Option<String>,
    location: Option<String>,
    email: Option<String>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    public_repos: u32,
    #[serde(default)]
    public_gists: u32,
    #[serde(default)]
    followers: u32,
    #[serde(default)]
    following: u32,
    plan: Option<PlanPayload>,
}

#[derive(Debug, Deserialize)]
struct PlanPayload {
    name: Option<String>,
}

impl From<UserPayload> for UserProfile {
    fn from(user: UserPayload) -> Self {
        UserProfile {
            username: user.login,
            name: or_empty(user.name),
            company: or_empty(user.company),
            location: or_empty(user.location),
            email: or_empty(user.email),
            created_at: user.created_at.unwrap_or_default(),
            public_repos: user.public_repos,
            public_gists: user.public_gists,
            followers: user.followers,
            following: user.following,
            subscription_plan: user.plan.and_then(|p| p.name).unwrap_or_default(),
            updated_at: user.updated_at.unwrap_or_default(),
        }
    }
}

/// Get the public profile of `username` (`GET /users/{username}`).
pub(crate) fn get_user(
    inner: Arc<Octocrab>,
    username: impl Into<String>,
) -> AsyncTask<Result<UserProfile, GitHubError>> {
    let username = username.into();
    spawn_task(async move {
        if username.trim().is_empty() {
            return Err(GitHubError::InvalidInput("username cannot be empty".into()));
        }
        let user: UserPayload = inner
            .get(format!("/users/{username}"), None::<&()>)
            .await
            .map_err(GitHubError::from)?;
        Ok(user.into())
    })
}
