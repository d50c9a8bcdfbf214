//! Async task handle for GitHub API operations.
//!
//! Each remote call is spawned onto the tokio runtime and its result is
//! delivered through a oneshot channel. Dropping the handle aborts the
//! spawned task, so an abandoned request does not keep running.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// A handle to an asynchronous task that produces a single result.
///
/// Awaiting the handle yields `Err(RecvError)` only if the spawned task
/// panicked or was aborted before sending.
pub struct AsyncTask<T> {
    rx: oneshot::Receiver<T>,
    handle: Option<JoinHandle<()>>,
}

impl<T> AsyncTask<T>
where
    T: Send + 'static,
{
    /// Create from oneshot receiver (for advanced use).
    #[inline]
    #[must_use]
    pub fn new(rx: oneshot::Receiver<T>) -> Self {
        Self { rx, handle: None }
    }

    /// Spawn an async operation onto the current runtime.
    #[inline]
    pub fn spawn_async<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let handle = tokio::task::spawn(async move {
            let _ = tx.send(future.await);
        });
        Self {
            rx,
            handle: Some(handle),
        }
    }
}

impl<T, E> AsyncTask<Result<T, E>>
where
    T: Send + 'static,
    E: From<oneshot::error::RecvError> + Send + 'static,
{
    /// Await the task and fold a lost channel into the operation's error type.
    pub async fn join(self) -> Result<T, E> {
        match self.await {
            Ok(result) => result,
            Err(recv) => Err(E::from(recv)),
        }
    }
}

impl<T> Future for AsyncTask<T> {
    type Output = Result<T, oneshot::error::RecvError>;

    #[inline]
    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx)
    }
}

impl<T> Drop for AsyncTask<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
