//! Snapshot fetcher backed by a JSON file.

use async_trait::async_trait;
use rb_core::polling::{FetchError, SnapshotFetcher};
use rb_protocol::progress_models::ProgressSnapshot;
use std::path::PathBuf;
use uuid::Uuid;

/// Reads the live snapshot from a file on every refresh.
///
/// Whatever writes the file plays the role of the backend's progress
/// endpoint. The run id is not part of the path: one file serves one run.
pub struct FileSnapshotFetcher {
    path: PathBuf,
}

impl FileSnapshotFetcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SnapshotFetcher for FileSnapshotFetcher {
    async fn fetch(&self, run_id: Uuid) -> Result<ProgressSnapshot, FetchError> {
        tracing::trace!(%run_id, path = %self.path.display(), "reading progress snapshot");

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FetchError::Transport(format!("{}: {e}", self.path.display())))?;

        serde_json::from_str(&content)
            .map_err(|e| FetchError::Decode(format!("{}: {e}", self.path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_snapshot_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snapshot.json");
        tokio::fs::write(&path, r#"{"status": "running", "overall_progress": 42}"#)
            .await
            .unwrap();

        let snapshot = FileSnapshotFetcher::new(&path)
            .fetch(Uuid::new_v4())
            .await
            .unwrap();

        assert_eq!(snapshot.status.as_str(), "running");
        assert_eq!(snapshot.overall_progress, Some(42));
    }

    #[tokio::test]
    async fn test_missing_file_is_transport_error() {
        let dir = TempDir::new().unwrap();
        let fetcher = FileSnapshotFetcher::new(dir.path().join("absent.json"));

        let result = fetcher.fetch(Uuid::new_v4()).await;
        assert!(matches!(result, Err(FetchError::Transport(_))));
    }

    #[tokio::test]
    async fn test_malformed_file_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snapshot.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let result = FileSnapshotFetcher::new(&path).fetch(Uuid::new_v4()).await;
        assert!(matches!(result, Err(FetchError::Decode(_))));
    }
}
