//! Display-ready values derived from runs and live snapshots.
//!
//! Everything in this module is recomputed on every render or poll cycle
//! and discarded afterwards.

use serde::Serialize;
use ts_rs::TS;
use uuid::Uuid;

use crate::phase_models::RunPhase;
use crate::run_models::{ExecutionStatus, StatusBucket, StepExecution};

/// One pass through the step sequence of a looping run.
#[derive(Serialize, Debug, Clone, PartialEq, TS)]
pub struct IterationGroup {
    /// 0-based, in temporal order.
    pub iteration_index: usize,

    /// Attempts belonging to this pass, in temporal order.
    pub executions: Vec<StepExecution>,

    /// Any attempt in this pass is queued or running.
    pub is_active: bool,

    /// The latest attempt of some step in this pass failed and was not
    /// retried successfully within the pass.
    pub is_failed: bool,
}

/// Which layer an overall progress value came from.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
pub enum ProgressSource {
    /// `overall_progress` from a live snapshot, used verbatim.
    LiveOverall,

    /// Recomputed from the steps of a live snapshot.
    LiveSteps,

    /// Recomputed from the run's persisted step executions.
    Stored,
}

/// Where the dashboard should route for a requested module.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum RouteDecision {
    /// The currently routed run already belongs to the module.
    Stay {
        #[ts(type = "string")]
        run_id: Uuid,
    },

    /// Navigate to the newest run of the module.
    Redirect {
        #[ts(type = "string")]
        run_id: Uuid,
    },

    /// No run of the module exists yet.
    NotStarted,
}

/// Everything a run view needs to render one run.
#[derive(Serialize, Debug, Clone, PartialEq, TS)]
pub struct RunDisplay {
    #[ts(type = "string")]
    pub run_id: Uuid,

    pub phase: RunPhase,

    /// Effective status: live when a snapshot exists, else stored.
    pub status: ExecutionStatus,

    pub status_bucket: StatusBucket,

    pub iterations: Vec<IterationGroup>,

    pub highlighted: Option<StepExecution>,

    /// Index of the iteration expanded by default.
    pub focused_iteration: Option<usize>,

    /// Index of the last iteration while the run is active.
    pub current_iteration: Option<usize>,

    pub overall_progress: u8,

    pub progress_source: ProgressSource,

    pub current_step_name: Option<String>,
}
