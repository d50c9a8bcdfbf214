//! Data model for a single audit run
//!
//! Field names serialize in snake_case and mirror the persisted JSON report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::audit::config::AuditConfig;

/// Snapshot of a GitHub user's public profile
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct UserProfile {
    pub username: String,
    pub name: String,
    pub company: String,
    pub location: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub public_repos: u32,
    pub public_gists: u32,
    pub followers: u32,
    pub following: u32,
    pub subscription_plan: String,
    pub updated_at: DateTime<Utc>,
}

/// A repository owned by the audited user
///
/// Populated from the repository listing, then enriched in place as the
/// language, commit and file phases complete.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct RepositoryRecord {
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub stars: u32,
    pub fork: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fork_source: Option<String>,
    /// Never written by the fetch pipeline; see `significant_forks`.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub user_commits: u32,
    pub languages_used: Vec<String>,
    pub file_count: usize,
    pub commit_count: usize,
    pub include_in_analysis: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_significant: bool,
}

fn is_zero(n: &u32) -> bool {
    *n == 0
}

/// One commit authored by the audited user
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct CommitRecord {
    pub repo: String,
    pub sha: String,
    pub message: String,
    pub date: DateTime<Utc>,
    pub author: String,
    pub files_changed: Vec<String>,
}

/// One sampled source file with its full text
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct FileSample {
    pub repo: String,
    pub path: String,
    pub language: String,
    pub size: usize,
    pub lines: usize,
    pub has_tests: bool,
    pub content: String,
}

/// Entry of a recursive repository tree
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeEntry {
    pub path: String,
    /// `blob`, `tree` or `commit` (submodule)
    pub kind: String,
}

impl TreeEntry {
    #[must_use]
    pub fn is_blob(&self) -> bool {
        self.kind == "blob"
    }
}

/// Aggregate repository counters
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct RepoStatistics {
    pub total_repos: usize,
    pub original_repos: usize,
    pub forked_repos: usize,
    pub significant_forks: usize,
    pub total_stars: u64,
    pub analysis_repos: usize,
}

/// Counters plus the original/forked partition
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct RepoStats {
    pub statistics: RepoStatistics,
    pub original_repos: Vec<RepositoryRecord>,
    pub forked_repos: Vec<RepositoryRecord>,
}

/// Which candidates were analyzed, which failed
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct AnalysisSummary {
    pub repos_analyzed_for_code: Vec<String>,
    pub repos_with_errors: Vec<String>,
    pub repos_without_user_commits: Vec<String>,
    /// Always `repos_analyzed_for_code.len() + repos_with_errors.len()`.
    pub total_repos_attempted: usize,
    pub successful_analysis_count: usize,
}

/// Complete result of one audit
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct AuditResult {
    pub user_info: UserProfile,
    pub repo_stats: RepoStats,
    pub file_analysis: Vec<FileSample>,
    pub commit_details: Vec<CommitRecord>,
    /// Run parameters with credentials redacted
    pub audit_parameters: AuditConfig,
    pub analysis_summary: AnalysisSummary,
}
