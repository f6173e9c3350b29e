//! Polling events.
//!
//! A polling controller runs in the background and reports what happened on
//! each tick through a channel, so the view owning it can stay responsive:
//! - `PollEvent`: updates sent from a controller to its view
//! - `PollerState`: the controller's lifecycle state

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::progress_models::ProgressSnapshot;

/// Lifecycle state of one polling controller.
///
/// Idle -> Polling -> (Idle | Stopped)
///
/// - Idle: not polling, either never started or torn down by the view
/// - Stopped: the run left the active bucket
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PollerState {
    Idle,
    Polling,
    Stopped,
}

/// Events sent from a polling controller to the view that owns it.
///
/// Uses tagged enum serialization for TypeScript compatibility:
/// ```json
/// {
///   "type": "snapshotUpdated",
///   "payload": {
///     "run_id": "uuid-here",
///     "snapshot": { "status": "running", "overall_progress": 40 }
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum PollEvent {
    /// Polling started for a run.
    PollingStarted {
        #[ts(type = "string")]
        run_id: Uuid,
    },

    /// A refresh returned a new snapshot. It replaces the previous one.
    SnapshotUpdated {
        #[ts(type = "string")]
        run_id: Uuid,
        snapshot: ProgressSnapshot,
    },

    /// A refresh failed. The previous snapshot stays displayed.
    RefreshFailed {
        #[ts(type = "string")]
        run_id: Uuid,
        error: String,
    },

    /// Polling ended and the controller moved to `state`.
    PollingStopped {
        #[ts(type = "string")]
        run_id: Uuid,
        state: PollerState,
    },
}
