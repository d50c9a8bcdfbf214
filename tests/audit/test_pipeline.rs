//! End-to-end behavior of a successful audit.

use github_audit::audit::sampler::sample;
use github_audit::audit::{AuditResult, REDACTED};
use github_audit::{AuditConfig, Auditor};
use tokio_util::sync::CancellationToken;

use super::fake_source::{FakeSource, USER, dir, now, repo};

async fn run(source: FakeSource, config: AuditConfig) -> (AuditResult, Vec<String>) {
    let auditor = Auditor::new(source, config);
    let result = auditor
        .perform_full_audit_at(USER, now(), &CancellationToken::new())
        .await
        .unwrap();
    (result, auditor.source().calls())
}

#[tokio::test]
async fn stale_repository_is_never_a_candidate() {
    let mut source = FakeSource::with_repos(vec![
        repo("fresh", 10),
        repo("stale", 6 * 365 + 30),
        repo("recent", 20),
    ]);
    source.populate("fresh", &["src/main.rs"]);
    source.populate("recent", &["app.py"]);
    source.populate("stale", &["old.go"]);

    let (result, calls) = run(source, AuditConfig::default()).await;

    let summary = &result.analysis_summary;
    assert_eq!(result.repo_stats.statistics.analysis_repos, 2);
    assert_eq!(summary.repos_analyzed_for_code, vec!["fresh", "recent"]);
    assert!(summary.repos_with_errors.is_empty());
    assert!(!summary.repos_analyzed_for_code.iter().any(|r| r == "stale"));
    assert!(!calls.iter().any(|c| c.contains("stale")));

    // still counted in the overall statistics
    assert_eq!(result.repo_stats.statistics.total_repos, 3);
}

#[tokio::test]
async fn file_sampling_is_reproducible_for_a_seed() {
    let paths: Vec<String> = (0..50).map(|i| format!("src/module_{i:02}.rs")).collect();
    let refs: Vec<&str> = paths.iter().map(String::as_str).collect();

    let build = || {
        let mut source = FakeSource::with_repos(vec![repo("big", 5)]);
        source.populate("big", &refs);
        source
    };
    let config = AuditConfig {
        sample_file_count: 5,
        random_seed: 42,
        ..AuditConfig::default()
    };

    let (first, _) = run(build(), config.clone()).await;
    let (second, _) = run(build(), config).await;

    let picked: Vec<&str> = first.file_analysis.iter().map(|f| f.path.as_str()).collect();
    let again: Vec<&str> = second.file_analysis.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(picked.len(), 5);
    assert!(first.file_analysis.iter().all(|f| f.repo == "big"));
    assert_eq!(picked, again);
    assert_eq!(picked, sample(refs.clone(), 5, 42));
}

#[tokio::test]
async fn most_recently_updated_candidates_win() {
    let mut repos = vec![
        repo("alpha", 40),
        repo("zulu", 3),
        repo("mike", 30),
        repo("bravo", 1),
        repo("echo", 60),
    ];
    repos[0].stars = 500;
    repos[4].stars = 1000;
    let mut source = FakeSource::with_repos(repos);
    for name in ["alpha", "zulu", "mike", "bravo", "echo"] {
        source.populate(name, &["lib.rs"]);
    }
    let config = AuditConfig {
        sampled_repo_count: 2,
        ..AuditConfig::default()
    };

    let (result, calls) = run(source, config).await;

    assert_eq!(
        result.analysis_summary.repos_analyzed_for_code,
        vec!["bravo", "zulu"]
    );
    assert_eq!(result.repo_stats.statistics.analysis_repos, 2);
    assert_eq!(result.repo_stats.statistics.total_stars, 1500);
    assert!(!calls.iter().any(|c| c == "commits:echo" || c == "commits:alpha"));
}

#[tokio::test]
async fn repository_records_are_enriched() {
    let mut source = FakeSource::with_repos(vec![repo("tool", 2)]);
    source.populate("tool", &["src/lib.rs", "tests/cli_test.py"]);
    source.trees.get_mut("tool").unwrap().extend([
        dir("src"),
        super::fake_source::blob("README.md"),
        super::fake_source::blob("Cargo.toml"),
    ]);
    source
        .blobs
        .insert("tool/tests/cli_test.py".into(), "def test_cli():\n    assert run()\n".into());
    source
        .languages
        .insert("tool".into(), vec!["Rust".into(), "Python".into()]);

    let (result, _) = run(source, AuditConfig::default()).await;

    let record = &result.repo_stats.original_repos[0];
    assert_eq!(record.languages_used, vec!["Rust", "Python"]);
    assert_eq!(record.commit_count, 1);
    assert_eq!(record.file_count, 2);
    assert!(record.include_in_analysis);

    let mut files = result.file_analysis.clone();
    files.sort_by(|a, b| a.path.cmp(&b.path));
    assert_eq!(files[0].path, "src/lib.rs");
    assert_eq!(files[0].language, "Rust");
    assert!(!files[0].has_tests);
    assert_eq!(files[1].language, "Python");
    assert!(files[1].has_tests);
    assert_eq!(files[1].size, files[1].content.len());
    assert_eq!(files[1].lines, 3);

    assert_eq!(result.commit_details.len(), 1);
    assert_eq!(
        result.commit_details[0].files_changed,
        vec!["src/lib.rs", "tests/cli_test.py"]
    );
}

#[tokio::test]
async fn missing_language_data_does_not_fail_a_repository() {
    let mut source = FakeSource::with_repos(vec![repo("quiet", 2)]);
    source.populate("quiet", &["main.go"]);

    let (result, _) = run(source, AuditConfig::default()).await;

    assert_eq!(result.analysis_summary.repos_analyzed_for_code, vec!["quiet"]);
    assert!(result.repo_stats.original_repos[0].languages_used.is_empty());
}

#[tokio::test]
async fn repository_without_user_commits_is_skipped_silently() {
    let mut source = FakeSource::with_repos(vec![repo("theirs", 2), repo("mine", 3)]);
    source.populate("mine", &["main.go"]);
    source.trees.insert("theirs".into(), vec![super::fake_source::blob("x.go")]);

    let (result, calls) = run(source, AuditConfig::default()).await;

    let summary = &result.analysis_summary;
    assert_eq!(summary.repos_analyzed_for_code, vec!["mine"]);
    assert!(summary.repos_with_errors.is_empty());
    assert_eq!(summary.repos_without_user_commits, vec!["theirs"]);
    assert_eq!(summary.total_repos_attempted, 1);
    assert!(!calls.iter().any(|c| c == "tree:theirs"));
    assert!(!result.repo_stats.original_repos[0].include_in_analysis);
}

#[tokio::test]
async fn statistics_partition_and_redaction() {
    let mut fork = repo("forked-lib", 4);
    fork.fork = true;
    fork.fork_source = Some("upstream/forked-lib".into());
    fork.stars = 3;
    let mut own = repo("own", 5);
    own.stars = 7;
    let mut source = FakeSource::with_repos(vec![fork, own, repo("ancient", 4000)]);
    source.populate("forked-lib", &["a.rs"]);
    source.populate("own", &["b.rs"]);

    let config = AuditConfig {
        token: "ghp_secret".into(),
        ..AuditConfig::default()
    };
    let (result, _) = run(source, config).await;

    let stats = &result.repo_stats.statistics;
    assert_eq!(stats.total_repos, 3);
    assert_eq!(stats.original_repos, 2);
    assert_eq!(stats.forked_repos, 1);
    assert_eq!(stats.total_repos, stats.original_repos + stats.forked_repos);
    assert_eq!(stats.total_stars, 10);
    assert!(result.repo_stats.forked_repos.iter().all(|r| r.fork));
    assert!(result.repo_stats.original_repos.iter().all(|r| !r.fork));

    assert_eq!(result.audit_parameters.token, REDACTED);
    let json = serde_json::to_string(&result).unwrap();
    assert!(!json.contains("ghp_secret"));
}

#[tokio::test]
async fn significant_forks_stay_zero_because_user_commits_is_never_filled() {
    let mut fork = repo("busy-fork", 1);
    fork.fork = true;
    let mut source = FakeSource::with_repos(vec![fork]);
    source.populate("busy-fork", &["main.rs"]);
    let commits: Vec<_> = (0..30)
        .map(|i| super::fake_source::commit("busy-fork", &format!("sha{i}")))
        .collect();
    for c in &commits {
        source.commit_files.insert(c.sha.clone(), vec!["main.rs".into()]);
    }
    source.commits.insert("busy-fork".into(), commits);

    let (result, _) = run(source, AuditConfig::default()).await;

    let fork = &result.repo_stats.forked_repos[0];
    assert_eq!(fork.commit_count, 30);
    assert_eq!(fork.user_commits, 0);
    assert!(!fork.is_significant);
    assert_eq!(result.repo_stats.statistics.significant_forks, 0);
}

#[tokio::test]
async fn commits_are_capped_per_repository() {
    let mut source = FakeSource::with_repos(vec![repo("chatty", 1)]);
    source.populate("chatty", &["main.rs"]);
    let commits: Vec<_> = (0..20)
        .map(|i| super::fake_source::commit("chatty", &format!("c{i}")))
        .collect();
    source.commits.insert("chatty".into(), commits);
    let config = AuditConfig {
        commits_per_repo: 5,
        ..AuditConfig::default()
    };

    let (result, _) = run(source, config).await;

    assert_eq!(result.commit_details.len(), 5);
    // per-commit lookups for unknown shas fail and leave the paths empty
    assert!(result.commit_details.iter().all(|c| c.files_changed.is_empty()));
    assert_eq!(
        result.analysis_summary.repos_analyzed_for_code,
        vec!["chatty"]
    );
}

#[tokio::test]
async fn persisted_json_uses_snake_case_fields() {
    let mut source = FakeSource::with_repos(vec![repo("one", 1)]);
    source.populate("one", &["main.rs"]);
    let (result, _) = run(source, AuditConfig::default()).await;

    let tmp = tempfile::tempdir().unwrap();
    let path = github_audit::write_audit_json(tmp.path(), &result, now()).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();

    assert_eq!(value["user_info"]["username"], USER);
    assert_eq!(value["repo_stats"]["statistics"]["analysis_repos"], 1);
    assert_eq!(value["analysis_summary"]["total_repos_attempted"], 1);
    assert_eq!(value["audit_parameters"]["token"], REDACTED);
    assert!(value["file_analysis"][0]["has_tests"].is_boolean());
}
