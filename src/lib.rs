//! `github_audit` - sampled audits of a GitHub user's public activity
//!
//! The [`audit`] pipeline reads a profile, its repositories, recent commits
//! and a seeded sample of source files through the [`github`] client, then
//! assembles an [`AuditResult`]. [`report`] persists it and [`narrative`]
//! optionally asks a language model for a written assessment.

// Module declarations
pub mod audit;
pub mod config;
pub mod github;
pub mod narrative;
pub mod report;
pub mod runtime;

// Re-export runtime types
pub use runtime::AsyncTask;

// Re-export GitHub client types
pub use github::{GitHubClient, GitHubClientBuilder, GitHubError, GitHubResult, ListCommitsOptions};

// Re-export audit pipeline types
pub use audit::{AuditConfig, AuditError, AuditResult, AuditSource, Auditor};

pub use config::{AppConfig, ConfigError};
pub use narrative::{NarrativeConfig, NarrativeError, OpenAiSummarizer, Summarizer};
pub use report::{ReportError, write_audit_json, write_debug_json, write_narrative};
