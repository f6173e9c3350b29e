//! Configuration file loader for the `.runboard/` directory.
//!
//! Only one file is read: `.runboard/config.toml`. Every key is optional,
//! so a missing directory, a missing file, or a partial file all produce a
//! usable configuration.

use crate::classify::PhaseSignatures;
use crate::config::error::ConfigError;
use crate::config::error::ConfigResult;
use rb_protocol::config_models::DashboardConfig;
use std::path::Path;

/// Name of the configuration directory under a project root.
pub const CONFIG_DIR: &str = ".runboard";

/// Loads the dashboard configuration from `<root>/.runboard/config.toml`.
///
/// # Arguments
///
/// * `root` - Directory containing the `.runboard/` folder
///
/// # Returns
///
/// The parsed configuration, or the defaults (5000 ms polling, built-in
/// signatures) when the directory or file does not exist.
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - The file exists but cannot be read
/// - The file is not valid TOML
/// - The poll interval is zero
/// - A signature set is empty, or the two sets share a signature
///
/// # Example
///
/// ```rust,no_run
/// use rb_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("Polling every {} ms", config.poll_interval_ms);
/// # Ok(())
/// # }
/// ```
pub async fn load_config(root: &Path) -> ConfigResult<DashboardConfig> {
    let config_path = root.join(CONFIG_DIR).join("config.toml");

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(DashboardConfig::default());
    }

    let content = tokio::fs::read_to_string(&config_path)
        .await
        .map_err(|source| ConfigError::FileRead {
            path: config_path.clone(),
            source,
        })?;

    let config: DashboardConfig =
        toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
            path: config_path.clone(),
            source,
        })?;

    validate(&config).map_err(|reason| ConfigError::InvalidConfig {
        path: config_path,
        reason,
    })?;

    Ok(config)
}

fn validate(config: &DashboardConfig) -> Result<(), String> {
    if config.poll_interval_ms == 0 {
        return Err("poll-interval-ms must be greater than zero".to_string());
    }

    if config.signatures.discovery.is_empty() {
        return Err("signatures.discovery must not be empty".to_string());
    }
    if config.signatures.creation.is_empty() {
        return Err("signatures.creation must not be empty".to_string());
    }

    let overlap = PhaseSignatures::from_config(&config.signatures).overlap();
    if !overlap.is_empty() {
        return Err(format!(
            "discovery and creation signatures overlap: {}",
            overlap.join(", ")
        ));
    }

    Ok(())
}
