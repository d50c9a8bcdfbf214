//! Configuration for audit runs

use serde::{Deserialize, Serialize};

use crate::audit::error::InvalidSetting;

/// Placeholder written over credentials before parameters leave the process
pub const REDACTED: &str = "[REDACTED]";

/// Parameters for one audit
///
/// Constructed explicitly and handed to [`Auditor`](crate::audit::Auditor);
/// the redacted copy is embedded in every [`AuditResult`](crate::audit::AuditResult).
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct AuditConfig {
    pub token: String,
    /// Upper bound on repositories fetched in detail (most recently updated win)
    pub sampled_repo_count: usize,
    pub commits_per_repo: usize,
    /// Upper bound on code files sampled per repository
    pub sample_file_count: usize,
    /// Recency window in calendar years
    pub analysis_years: u32,
    #[serde(rename = "include_private_repos")]
    pub include_private_repo: bool,
    pub random_seed: u64,
    pub save_debug_json: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            sampled_repo_count: 10,
            commits_per_repo: 50,
            sample_file_count: 3,
            analysis_years: 5,
            include_private_repo: false,
            random_seed: 42,
            save_debug_json: false,
        }
    }
}

impl AuditConfig {
    /// Copy of this configuration safe to persist or send upstream.
    #[must_use]
    pub fn redacted(&self) -> Self {
        Self {
            token: REDACTED.to_string(),
            ..self.clone()
        }
    }

    /// Reject counts that would make the audit meaningless.
    pub fn validate(&self) -> Result<(), InvalidSetting> {
        let checks = [
            ("sampled_repo_count", self.sampled_repo_count),
            ("commits_per_repo", self.commits_per_repo),
            ("sample_file_count", self.sample_file_count),
            ("analysis_years", self.analysis_years as usize),
        ];
        for (field, value) in checks {
            if value == 0 {
                return Err(InvalidSetting::zero(field));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn has_token(&self) -> bool {
        !self.token.trim().is_empty()
    }
}
