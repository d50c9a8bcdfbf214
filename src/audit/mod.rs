//! GitHub user audit
//!
//! Fetches a profile and its repositories through an [`AuditSource`], picks
//! the most recently updated ones, samples their commits and source files,
//! and assembles an [`AuditResult`].

pub mod classifier;
pub mod config;
pub mod error;
pub mod heuristics;
pub mod orchestrator;
pub mod sampler;
pub mod source;
pub mod types;

pub use config::{AuditConfig, REDACTED};
pub use error::{AuditError, AuditOutcome, InvalidSetting};
pub use heuristics::{ComplexityLabel, QualityLabel};
pub use orchestrator::{Auditor, RepoOutcome, cutoff_date, select_candidates};
pub use source::AuditSource;
pub use types::{
    AnalysisSummary, AuditResult, CommitRecord, FileSample, RepoStatistics, RepoStats,
    RepositoryRecord, TreeEntry, UserProfile,
};
