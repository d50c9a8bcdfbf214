//! In-memory `AuditSource` with scripted failures.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};
use github_audit::audit::{CommitRecord, RepositoryRecord, TreeEntry, UserProfile};
use github_audit::{AuditSource, GitHubError, GitHubResult};
use tokio_util::sync::CancellationToken;

pub const USER: &str = "octocat";

/// Fixed audit clock
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

pub fn repo(name: &str, days_ago: i64) -> RepositoryRecord {
    RepositoryRecord {
        name: name.to_string(),
        description: format!("{name} description"),
        created_at: now() - Duration::days(days_ago + 100),
        updated_at: now() - Duration::days(days_ago),
        ..RepositoryRecord::default()
    }
}

pub fn commit(repo: &str, sha: &str) -> CommitRecord {
    CommitRecord {
        repo: repo.to_string(),
        sha: sha.to_string(),
        message: format!("change {sha}"),
        date: now() - Duration::days(1),
        author: "The Octocat".to_string(),
        files_changed: Vec::new(),
    }
}

pub fn blob(path: &str) -> TreeEntry {
    TreeEntry {
        path: path.to_string(),
        kind: "blob".to_string(),
    }
}

pub fn dir(path: &str) -> TreeEntry {
    TreeEntry {
        path: path.to_string(),
        kind: "tree".to_string(),
    }
}

#[derive(Default)]
pub struct FakeSource {
    pub fail_profile: bool,
    pub fail_listing: bool,
    pub repos: Vec<RepositoryRecord>,
    pub languages: HashMap<String, Vec<String>>,
    /// Missing repos have no commits by the user
    pub commits: HashMap<String, Vec<CommitRecord>>,
    pub failing_commits: HashSet<String>,
    /// Keyed by sha; missing shas fail
    pub commit_files: HashMap<String, Vec<String>>,
    pub trees: HashMap<String, Vec<TreeEntry>>,
    pub failing_trees: HashSet<String>,
    /// Keyed by `repo/path`; missing entries fail
    pub blobs: HashMap<String, String>,
    /// Cancel this token when a call with the given label is made
    pub cancel_on: Option<(String, CancellationToken)>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn with_repos(repos: Vec<RepositoryRecord>) -> Self {
        Self {
            repos,
            ..Self::default()
        }
    }

    /// Give `repo` one commit and the listed code files, all fetchable.
    pub fn populate(&mut self, repo: &str, paths: &[&str]) {
        let sha = format!("{repo}-sha");
        self.commits
            .insert(repo.to_string(), vec![commit(repo, &sha)]);
        self.commit_files
            .insert(sha, paths.iter().map(|p| p.to_string()).collect());
        self.trees
            .insert(repo.to_string(), paths.iter().map(|p| blob(p)).collect());
        for path in paths {
            self.blobs
                .insert(format!("{repo}/{path}"), format!("// {path}\nfn main() {{}}\n"));
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, label: String) {
        if let Some((trigger, token)) = &self.cancel_on {
            if *trigger == label {
                token.cancel();
            }
        }
        self.calls.lock().unwrap().push(label);
    }
}

fn scripted_error(what: &str) -> GitHubError {
    GitHubError::Decode {
        what: what.to_string(),
        reason: "scripted failure".to_string(),
    }
}

impl AuditSource for FakeSource {
    async fn get_profile(&self, username: &str) -> GitHubResult<UserProfile> {
        self.record(format!("profile:{username}"));
        if self.fail_profile {
            return Err(GitHubError::NotFound(username.to_string()));
        }
        Ok(UserProfile {
            username: username.to_string(),
            name: "The Octocat".to_string(),
            public_repos: self.repos.len() as u32,
            created_at: now() - Duration::days(4000),
            updated_at: now(),
            ..UserProfile::default()
        })
    }

    async fn list_repositories(&self, username: &str) -> GitHubResult<Vec<RepositoryRecord>> {
        self.record(format!("repos:{username}"));
        if self.fail_listing {
            return Err(scripted_error("listing"));
        }
        Ok(self.repos.clone())
    }

    async fn get_languages(&self, _owner: &str, repo: &str) -> GitHubResult<Vec<String>> {
        self.record(format!("languages:{repo}"));
        self.languages
            .get(repo)
            .cloned()
            .ok_or_else(|| GitHubError::NotFound(repo.to_string()))
    }

    async fn list_commits(
        &self,
        _owner: &str,
        repo: &str,
        _author: &str,
        limit: usize,
    ) -> GitHubResult<Vec<CommitRecord>> {
        self.record(format!("commits:{repo}"));
        if self.failing_commits.contains(repo) {
            return Err(scripted_error("commits"));
        }
        let mut commits = self.commits.get(repo).cloned().unwrap_or_default();
        commits.truncate(limit);
        Ok(commits)
    }

    async fn get_commit_files(&self, _owner: &str, repo: &str, sha: &str) -> GitHubResult<Vec<String>> {
        self.record(format!("commit:{repo}@{sha}"));
        self.commit_files
            .get(sha)
            .cloned()
            .ok_or_else(|| scripted_error("commit detail"))
    }

    async fn get_tree(&self, _owner: &str, repo: &str, _reference: &str) -> GitHubResult<Vec<TreeEntry>> {
        self.record(format!("tree:{repo}"));
        if self.failing_trees.contains(repo) {
            return Err(scripted_error("tree"));
        }
        Ok(self.trees.get(repo).cloned().unwrap_or_default())
    }

    async fn get_blob_content(&self, _owner: &str, repo: &str, path: &str) -> GitHubResult<String> {
        let key = format!("{repo}/{path}");
        self.record(format!("blob:{key}"));
        self.blobs
            .get(&key)
            .cloned()
            .ok_or_else(|| GitHubError::NotFound(key))
    }
}
