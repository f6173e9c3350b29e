//! # rb-core
//!
//! Derivation engine for runboard.
//!
//! This crate turns backend run records and their flat step-execution logs
//! into display state:
//! - Phase classification and module membership
//! - Selection of the canonical run for a module, with redirect targets
//! - Decomposition of looping runs into iterations
//! - The step and iteration a view should focus on
//! - Overall progress with live-over-stored precedence
//! - Polling of live progress while a run is active
//!
//! ## Modules
//!
//! - [`classify`]: Phase and module tagging from step names
//! - [`select`]: Run selection and route decisions
//! - [`iteration`]: Iteration grouping
//! - [`highlight`]: Focused step and iteration
//! - [`progress`]: Overall progress and live/stored precedence
//! - [`polling`]: Per-view refresh controller
//! - [`view`]: Composition into a `RunDisplay`
//! - [`config`]: Configuration loading

pub mod classify;
pub mod config;
pub mod highlight;
pub mod iteration;
pub mod polling;
pub mod progress;
pub mod select;
pub mod view;
