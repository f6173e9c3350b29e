//! Backend run and step-execution models.
//!
//! These structures mirror the JSON returned by the run collection and
//! single-run endpoints. They are owned by the backend: runboard only ever
//! reads them and never writes derived state back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Coarse classification of an open-ended status string.
///
/// Backends add new status values over time, so statuses are kept as
/// strings and only bucketed when a decision depends on them.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
pub enum StatusBucket {
    /// queued, running, in_progress
    Active,

    /// failed, error
    Failed,

    /// succeeded, completed, done
    Succeeded,

    /// Anything else, e.g. paused or cancelled.
    Other,
}

/// A status string as reported by the backend.
///
/// Matching is case-insensitive and treats `-` and spaces like `_`, so
/// `"In-Progress"` and `"in_progress"` land in the same bucket.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, TS)]
pub struct ExecutionStatus(pub String);

impl ExecutionStatus {
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    /// The raw status string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Map the status onto one of the known buckets.
    pub fn bucket(&self) -> StatusBucket {
        let normalized: String = self
            .0
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                other => other.to_ascii_lowercase(),
            })
            .collect();

        match normalized.as_str() {
            "queued" | "running" | "in_progress" => StatusBucket::Active,
            "failed" | "error" => StatusBucket::Failed,
            "succeeded" | "completed" | "done" => StatusBucket::Succeeded,
            _ => StatusBucket::Other,
        }
    }

    pub fn is_active(&self) -> bool {
        self.bucket() == StatusBucket::Active
    }

    pub fn is_failed(&self) -> bool {
        self.bucket() == StatusBucket::Failed
    }

    pub fn is_succeeded(&self) -> bool {
        self.bucket() == StatusBucket::Succeeded
    }
}

impl From<&str> for ExecutionStatus {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One attempt at running a numbered pipeline step.
///
/// A run may hold several executions with the same `step_number`: looping
/// pipelines re-run earlier steps in later iterations, and failed steps may
/// be retried.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct StepExecution {
    /// Identifier of this attempt. Not stable across retries.
    #[ts(type = "string")]
    pub id: Uuid,

    /// Position of the step in the pipeline definition.
    pub step_number: u32,

    /// Free-text step identifier such as `seed_generation`.
    pub step_name: String,

    pub status: ExecutionStatus,

    /// 0-100, non-decreasing within one attempt.
    #[serde(default)]
    pub progress_percent: i32,

    #[serde(default)]
    pub items_processed: Option<u64>,

    #[serde(default)]
    pub items_total: Option<u64>,

    /// When the attempt was enqueued.
    ///
    /// Queued attempts usually have no `started_at`/`completed_at`, so this
    /// is the last ordering fallback before the epoch.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub error_message: Option<String>,
}

impl StepExecution {
    /// Timestamp used to place this attempt in temporal order.
    ///
    /// Falls back from `completed_at` to `started_at` to `created_at`, and
    /// finally to the Unix epoch for entries with no timestamps at all.
    pub fn order_timestamp(&self) -> DateTime<Utc> {
        self.completed_at
            .or(self.started_at)
            .or(self.created_at)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}

/// One invocation of the backend pipeline.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct PipelineRun {
    #[ts(type = "string")]
    pub id: Uuid,

    /// Project the run belongs to, when the backend reports it.
    #[serde(default)]
    #[ts(type = "string | null")]
    pub project_id: Option<Uuid>,

    pub status: ExecutionStatus,

    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,

    /// Unordered log of step attempts. Treat as a log, never as a map keyed
    /// by step number.
    #[serde(default)]
    pub step_executions: Vec<StepExecution>,
}
