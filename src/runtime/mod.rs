//! Runtime module
//!
//! Provides the spawn-and-await primitive used by every GitHub operation.

pub mod async_task;

pub use async_task::AsyncTask;
