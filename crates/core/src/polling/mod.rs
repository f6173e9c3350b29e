//! Live progress polling for active runs.
//!
//! This module provides:
//! - The `SnapshotFetcher` seam through which snapshots are read
//! - `PollingController`, the per-view refresh state machine

pub mod controller;
pub mod fetcher;

pub use controller::{PollingController, TickOutcome};
pub use fetcher::{FetchError, SnapshotFetcher};
