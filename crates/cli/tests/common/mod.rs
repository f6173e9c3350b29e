//! Shared helpers for CLI integration tests.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Two runs: a finished discovery run and a creation run looping into its
/// second iteration.
pub const RUNS_JSON: &str = r#"[
  {
    "id": "00000000-0000-0000-0000-000000000001",
    "status": "completed",
    "created_at": "2024-05-01T10:00:00Z",
    "step_executions": [
      {
        "id": "00000000-0000-0000-0000-0000000000a1",
        "step_number": 1,
        "step_name": "seed_generation",
        "status": "succeeded",
        "progress_percent": 100,
        "started_at": "2024-05-01T10:00:05Z",
        "completed_at": "2024-05-01T10:01:00Z"
      }
    ]
  },
  {
    "id": "00000000-0000-0000-0000-000000000002",
    "status": "running",
    "created_at": "2024-05-02T09:00:00Z",
    "step_executions": [
      {
        "id": "00000000-0000-0000-0000-0000000000b1",
        "step_number": 1,
        "step_name": "outline_builder",
        "status": "succeeded",
        "progress_percent": 100,
        "started_at": "2024-05-02T09:00:10Z",
        "completed_at": "2024-05-02T09:01:00Z"
      },
      {
        "id": "00000000-0000-0000-0000-0000000000b2",
        "step_number": 2,
        "step_name": "brief_writer",
        "status": "succeeded",
        "progress_percent": 100,
        "started_at": "2024-05-02T09:01:00Z",
        "completed_at": "2024-05-02T09:02:00Z"
      },
      {
        "id": "00000000-0000-0000-0000-0000000000b3",
        "step_number": 1,
        "step_name": "outline_builder",
        "status": "running",
        "progress_percent": 40,
        "started_at": "2024-05-02T09:03:00Z"
      }
    ]
  }
]"#;

/// A temporary project root holding input files for one test.
pub struct Workspace {
    dir: TempDir,
}

#[allow(dead_code)]
impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `name` under the root and return its path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(&path, content).expect("Failed to write fixture");
        path
    }

    /// The `runboard` binary, rooted at this workspace with logging off.
    pub fn runboard(&self) -> Command {
        let mut cmd = Command::cargo_bin("runboard").expect("runboard binary not built");
        cmd.env("RUST_LOG", "off").arg("--root").arg(self.root());
        cmd
    }
}
