//! # rb-protocol
//!
//! Shared data models for runboard.
//!
//! This crate defines the structures exchanged between the backend, the
//! derivation engine in `rb-core`, and dashboard clients:
//! - Backend run records and step-execution logs
//! - Live progress snapshots
//! - Derived, display-ready values
//! - Configuration and polling events
//!
//! ## Modules
//!
//! - [`run_models`]: Pipeline runs, step executions and status buckets
//! - [`phase_models`]: Phase and module tags
//! - [`progress_models`]: Live progress snapshots
//! - [`view_models`]: Iteration groups, route decisions and run displays
//! - [`config_models`]: Dashboard configuration from config.toml
//! - [`ipc`]: Events emitted by polling controllers
//!
//! ## Design Principles
//!
//! - Read-only: nothing here is ever written back to the backend
//! - TypeScript generation: all types derive `TS` for client compatibility
//! - Independent compilation: no dependencies on other runboard crates

pub mod config_models;
pub mod ipc;
pub mod phase_models;
pub mod progress_models;
pub mod run_models;
pub mod view_models;

// Re-export all public types for convenience
pub use config_models::*;
pub use ipc::*;
pub use phase_models::*;
pub use progress_models::*;
pub use run_models::*;
pub use view_models::*;
