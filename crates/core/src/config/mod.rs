//! Configuration loading.
//!
//! This module provides functionality to load and validate the dashboard
//! configuration from the `.runboard/` directory.

pub mod error;
pub mod loader;
