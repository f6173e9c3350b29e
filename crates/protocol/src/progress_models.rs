//! Live progress payloads returned by the progress endpoint.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::run_models::{ExecutionStatus, StepExecution};

/// A freshly polled progress payload for one run.
///
/// When a live snapshot is available it replaces the run's persisted data
/// for display. The two are never merged field by field.
///
/// # Example
///
/// ```json
/// {
///   "status": "running",
///   "current_step_name": "serp_analysis",
///   "overall_progress": 42,
///   "steps": []
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct ProgressSnapshot {
    pub status: ExecutionStatus,

    /// Step attempts as seen by the progress endpoint.
    #[serde(default)]
    pub steps: Option<Vec<StepExecution>>,

    #[serde(default)]
    pub current_step_name: Option<String>,

    /// Backend-computed overall percentage. Used verbatim when present.
    #[serde(default)]
    pub overall_progress: Option<i32>,
}
