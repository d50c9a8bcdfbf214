//! Persisting audit output
//!
//! Files are named `{username}_github_{kind}_{YYYY-MM-DD_HH-MM-SS}.{ext}` and
//! written into a caller-chosen directory, created on demand.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::info;
use thiserror::Error;

use crate::audit::AuditResult;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize audit result: {0}")]
    Json(#[from] serde_json::Error),
}

/// File name for one report artifact.
#[must_use]
pub fn report_file_name(username: &str, kind: &str, ext: &str, now: DateTime<Utc>) -> String {
    format!(
        "{username}_github_{kind}_{}.{ext}",
        now.format(TIMESTAMP_FORMAT)
    )
}

/// Write the pretty-printed audit as JSON; returns the file path.
pub fn write_audit_json(
    dir: &Path,
    result: &AuditResult,
    now: DateTime<Utc>,
) -> Result<PathBuf, ReportError> {
    let json = serde_json::to_string_pretty(result)?;
    let name = report_file_name(&result.user_info.username, "audit", "json", now);
    let path = write_file(dir, &name, json.as_bytes())?;
    info!("Audit data saved to {}", path.display());
    Ok(path)
}

/// Write the same JSON under the `audit_debug` kind, kept apart from the
/// report proper when `save_debug_json` is set.
pub fn write_debug_json(
    dir: &Path,
    result: &AuditResult,
    now: DateTime<Utc>,
) -> Result<PathBuf, ReportError> {
    let json = serde_json::to_string_pretty(result)?;
    let name = report_file_name(&result.user_info.username, "audit_debug", "json", now);
    let path = write_file(dir, &name, json.as_bytes())?;
    info!("Debug JSON saved to {}", path.display());
    Ok(path)
}

/// Write a Markdown narrative; returns the file path.
pub fn write_narrative(
    dir: &Path,
    username: &str,
    markdown: &str,
    now: DateTime<Utc>,
) -> Result<PathBuf, ReportError> {
    let name = report_file_name(username, "assessment", "md", now);
    let path = write_file(dir, &name, markdown.as_bytes())?;
    info!("Assessment saved to {}", path.display());
    Ok(path)
}

fn write_file(dir: &Path, name: &str, contents: &[u8]) -> Result<PathBuf, ReportError> {
    fs::create_dir_all(dir).map_err(|source| ReportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(name);
    fs::write(&path, contents).map_err(|source| ReportError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
