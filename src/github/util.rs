//! GitHub API utilities

use crate::runtime::AsyncTask;
use std::future::Future;

/// Spawn an async task for GitHub API operations.
#[inline]
pub fn spawn_task<T, F>(work: F) -> AsyncTask<T>
where
    T: Send + 'static,
    F: Future<Output = T> + Send + 'static,
{
    AsyncTask::spawn_async(work)
}

/// Clamp a requested item count to GitHub's per-page maximum.
#[must_use]
pub fn page_size(requested: usize) -> u8 {
    requested.clamp(1, 100) as u8
}

/// Treat a JSON `null`/absent string the way the audit records expect.
#[must_use]
pub fn or_empty(value: Option<String>) -> String {
    value.unwrap_or_default()
}
