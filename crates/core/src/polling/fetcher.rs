//! Source of live progress snapshots.

use async_trait::async_trait;
use rb_protocol::progress_models::ProgressSnapshot;
use thiserror::Error;
use uuid::Uuid;

/// Errors a refresh can fail with.
///
/// A failed refresh never stops polling: the tick is treated as "no update".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Failed to decode progress snapshot: {0}")]
    Decode(String),
}

/// Reads the current progress snapshot of a run.
///
/// Transport and authentication live behind this trait; the polling
/// controller only needs an idempotent read.
#[async_trait]
pub trait SnapshotFetcher: Send + Sync {
    async fn fetch(&self, run_id: Uuid) -> Result<ProgressSnapshot, FetchError>;
}
