//! Common test utilities and helpers for integration tests.
//!
//! This module provides shared functionality across all integration tests:
//! - Test fixtures (runs, step executions, snapshots)
//! - Custom assertions on polling events
//! - Scripted snapshot fetchers

pub mod assertions;
pub mod fixtures;
pub mod mock_fetchers;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use mock_fetchers::*;
