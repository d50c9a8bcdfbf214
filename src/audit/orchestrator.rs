//! Audit pipeline
//!
//! Strictly sequential: profile, repository list, recency selection, then
//! per-repository languages, commits and sampled files. Profile and list
//! failures abort the audit; per-repository failures are recorded and the
//! pipeline moves on.

use chrono::{DateTime, Months, Utc};
use log::{debug, info, warn};
use std::future::Future;
use tokio_util::sync::CancellationToken;

use crate::audit::classifier::{detect_language, is_code_file};
use crate::audit::config::AuditConfig;
use crate::audit::error::{AuditError, AuditOutcome};
use crate::audit::heuristics::has_test_indicators;
use crate::audit::sampler::sample;
use crate::audit::source::AuditSource;
use crate::audit::types::{
    AnalysisSummary, AuditResult, CommitRecord, FileSample, RepoStatistics, RepoStats,
    RepositoryRecord,
};
use crate::github::GitHubError;

/// Forks with more user commits than this count as significant.
pub const SIGNIFICANT_FORK_COMMITS: u32 = 10;

/// Tree reference sampled for source files
const TREE_REF: &str = "HEAD";

/// How one candidate repository fared in the detail phase
#[derive(Debug)]
pub enum RepoOutcome {
    /// Commits and files fetched
    Analyzed,
    /// No commits by the user; excluded without being an error
    Skipped,
    /// Commit or tree fetch failed
    Failed(GitHubError),
}

/// Runs audits against an [`AuditSource`]
pub struct Auditor<S> {
    source: S,
    config: AuditConfig,
}

impl<S: AuditSource> Auditor<S> {
    #[must_use]
    pub fn new(source: S, config: AuditConfig) -> Self {
        Self { source, config }
    }

    #[must_use]
    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Audit `username` as of now.
    pub async fn perform_full_audit(
        &self,
        username: &str,
        cancel: &CancellationToken,
    ) -> AuditOutcome<AuditResult> {
        self.perform_full_audit_at(username, Utc::now(), cancel).await
    }

    /// Audit `username` with the recency window anchored at `now`.
    pub async fn perform_full_audit_at(
        &self,
        username: &str,
        now: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> AuditOutcome<AuditResult> {
        self.config.validate()?;
        info!("Starting audit of {username}");

        let user_info = guard(cancel, self.source.get_profile(username))
            .await?
            .map_err(|source| AuditError::Profile {
                username: username.to_string(),
                source,
            })?;

        let mut repositories = guard(cancel, self.source.list_repositories(username))
            .await?
            .map_err(|source| AuditError::RepositoryList {
                username: username.to_string(),
                source,
            })?;
        info!("{username} has {} repositories", repositories.len());

        let cutoff = cutoff_date(now, self.config.analysis_years);
        let candidates = select_candidates(&repositories, cutoff, self.config.sampled_repo_count);
        info!(
            "{} repositories updated since {} selected for analysis",
            candidates.len(),
            cutoff.format("%Y-%m-%d")
        );

        let mut commit_details = Vec::new();
        let mut file_analysis = Vec::new();
        let mut summary = AnalysisSummary::default();

        for &idx in &candidates {
            let repo = &mut repositories[idx];
            let outcome = self
                .analyze_repository(username, repo, &mut commit_details, &mut file_analysis, cancel)
                .await?;

            match outcome {
                RepoOutcome::Analyzed => {
                    info!(
                        "Analyzed {}: {} commits, {} files",
                        repo.name, repo.commit_count, repo.file_count
                    );
                    summary.repos_analyzed_for_code.push(repo.name.clone());
                }
                RepoOutcome::Skipped => {
                    debug!("Skipping {}: no commits by {username}", repo.name);
                    summary.repos_without_user_commits.push(repo.name.clone());
                }
                RepoOutcome::Failed(err) => {
                    warn!("Analysis of {} failed: {err}", repo.name);
                    summary.repos_with_errors.push(repo.name.clone());
                }
            }
        }

        summary.total_repos_attempted =
            summary.repos_analyzed_for_code.len() + summary.repos_with_errors.len();
        summary.successful_analysis_count = summary.repos_analyzed_for_code.len();

        let mut total_stars = 0u64;
        let mut significant_forks = 0usize;
        for repo in &mut repositories {
            total_stars += u64::from(repo.stars);
            // user_commits is never populated upstream, so this stays zero
            if repo.fork && repo.user_commits > SIGNIFICANT_FORK_COMMITS {
                significant_forks += 1;
                repo.is_significant = true;
            }
        }

        let total_repos = repositories.len();
        let (forked_repos, original_repos): (Vec<_>, Vec<_>) =
            repositories.into_iter().partition(|r| r.fork);

        info!(
            "Audit of {username} complete: {} analyzed, {} with errors",
            summary.repos_analyzed_for_code.len(),
            summary.repos_with_errors.len()
        );

        Ok(AuditResult {
            user_info,
            repo_stats: RepoStats {
                statistics: RepoStatistics {
                    total_repos,
                    original_repos: original_repos.len(),
                    forked_repos: forked_repos.len(),
                    significant_forks,
                    total_stars,
                    analysis_repos: candidates.len(),
                },
                original_repos,
                forked_repos,
            },
            file_analysis,
            commit_details,
            audit_parameters: self.config.redacted(),
            analysis_summary: summary,
        })
    }

    /// Detail phase for one candidate.
    ///
    /// Commits land in `commits` as soon as they are fetched, so a later tree
    /// failure still leaves them in the aggregate.
    async fn analyze_repository(
        &self,
        username: &str,
        repo: &mut RepositoryRecord,
        commits: &mut Vec<CommitRecord>,
        files: &mut Vec<FileSample>,
        cancel: &CancellationToken,
    ) -> AuditOutcome<RepoOutcome> {
        match guard(cancel, self.source.get_languages(username, &repo.name)).await? {
            Ok(languages) => repo.languages_used = languages,
            Err(err) => debug!("No language data for {}: {err}", repo.name),
        }

        let repo_commits = match self.fetch_commits(username, &repo.name, cancel).await? {
            Ok(found) => found,
            Err(err) => return Ok(RepoOutcome::Failed(err)),
        };
        if repo_commits.is_empty() {
            return Ok(RepoOutcome::Skipped);
        }
        repo.commit_count = repo_commits.len();
        commits.extend(repo_commits);

        let samples = match self.fetch_file_samples(username, &repo.name, cancel).await? {
            Ok(found) => found,
            Err(err) => return Ok(RepoOutcome::Failed(err)),
        };
        repo.file_count = samples.len();
        repo.include_in_analysis = true;
        files.extend(samples);

        Ok(RepoOutcome::Analyzed)
    }

    /// Commits by `username`, each with its changed paths.
    ///
    /// A failed per-commit lookup leaves that commit's paths empty.
    async fn fetch_commits(
        &self,
        username: &str,
        repo: &str,
        cancel: &CancellationToken,
    ) -> AuditOutcome<Result<Vec<CommitRecord>, GitHubError>> {
        let listed = guard(
            cancel,
            self.source
                .list_commits(username, repo, username, self.config.commits_per_repo),
        )
        .await?;
        let mut commits = match listed {
            Ok(commits) => commits,
            Err(err) => return Ok(Err(err)),
        };

        for commit in &mut commits {
            match guard(cancel, self.source.get_commit_files(username, repo, &commit.sha)).await? {
                Ok(paths) => commit.files_changed = paths,
                Err(err) => debug!("No file list for {repo}@{}: {err}", commit.sha),
            }
        }

        Ok(Ok(commits))
    }

    /// Sampled code files of `repo` with their content.
    ///
    /// Files whose content cannot be fetched or decoded are dropped.
    async fn fetch_file_samples(
        &self,
        username: &str,
        repo: &str,
        cancel: &CancellationToken,
    ) -> AuditOutcome<Result<Vec<FileSample>, GitHubError>> {
        let tree = match guard(cancel, self.source.get_tree(username, repo, TREE_REF)).await? {
            Ok(tree) => tree,
            Err(err) => return Ok(Err(err)),
        };

        let code_paths: Vec<String> = tree
            .into_iter()
            .filter(|entry| entry.is_blob() && is_code_file(&entry.path))
            .map(|entry| entry.path)
            .collect();
        let selected = sample(
            code_paths,
            self.config.sample_file_count,
            self.config.random_seed,
        );

        let mut samples = Vec::with_capacity(selected.len());
        for path in selected {
            match guard(cancel, self.source.get_blob_content(username, repo, &path)).await? {
                Ok(content) => samples.push(FileSample {
                    repo: repo.to_string(),
                    language: detect_language(&path).to_string(),
                    size: content.len(),
                    lines: content.split('\n').count(),
                    has_tests: has_test_indicators(&content),
                    path,
                    content,
                }),
                Err(err) => debug!("Dropping {repo}:{path}: {err}"),
            }
        }

        Ok(Ok(samples))
    }
}

/// Start of the recency window: `years` calendar years before `now`.
#[must_use]
pub fn cutoff_date(now: DateTime<Utc>, years: u32) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(years.saturating_mul(12)))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Indices of repositories updated after `cutoff`, capped at `limit`.
///
/// When more than `limit` qualify, the most recently updated win; ties keep
/// listing order.
#[must_use]
pub fn select_candidates(
    repos: &[RepositoryRecord],
    cutoff: DateTime<Utc>,
    limit: usize,
) -> Vec<usize> {
    let mut candidates: Vec<usize> = repos
        .iter()
        .enumerate()
        .filter(|(_, repo)| repo.updated_at > cutoff)
        .map(|(idx, _)| idx)
        .collect();

    if candidates.len() > limit {
        candidates.sort_by(|&a, &b| repos[b].updated_at.cmp(&repos[a].updated_at));
        candidates.truncate(limit);
    }
    candidates
}

/// Race `fut` against cancellation.
async fn guard<F: Future>(cancel: &CancellationToken, fut: F) -> AuditOutcome<F::Output> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(AuditError::Cancelled),
        out = fut => Ok(out),
    }
}
