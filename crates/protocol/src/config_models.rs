//! Dashboard configuration models for `.runboard/config.toml`.
//!
//! This module defines the structure of the configuration file that tunes
//! polling and phase classification.

use serde::Deserialize;
use serde::Serialize;
use ts_rs::TS;

/// Default refresh interval for active runs, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5000;

/// Step-name signatures that mark a run as discovery or creation work.
///
/// A step name matches a signature when, after lower-casing and removing
/// separators from both, the name contains the signature.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct SignatureConfig {
    /// Keyword/topic discovery signatures.
    #[serde(default = "default_discovery_signatures")]
    pub discovery: Vec<String>,

    /// Content creation signatures.
    #[serde(default = "default_creation_signatures")]
    pub creation: Vec<String>,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            discovery: default_discovery_signatures(),
            creation: default_creation_signatures(),
        }
    }
}

fn default_discovery_signatures() -> Vec<String> {
    [
        "seed",
        "expansion",
        "expand",
        "metrics",
        "intent",
        "clustering",
        "cluster",
        "prioritization",
        "prioritize",
        "serp",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_creation_signatures() -> Vec<String> {
    ["outline", "brief", "writer_instructions", "article"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Represents the settings in `.runboard/config.toml`.
///
/// # Example
///
/// ```toml
/// # .runboard/config.toml
/// poll-interval-ms = 5000
///
/// [signatures]
/// discovery = ["seed", "serp"]
/// creation = ["outline", "article"]
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "kebab-case")]
pub struct DashboardConfig {
    /// How often an active run is refreshed.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default)]
    pub signatures: SignatureConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            signatures: SignatureConfig::default(),
        }
    }
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}
