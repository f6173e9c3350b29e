//! Tracing initialization.

use color_eyre::eyre::eyre;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the tracing subscriber.
///
/// The level comes from `RUST_LOG` and defaults to `info`. Logs go to
/// stderr so that stdout only carries command output.
///
/// ```bash
/// RUST_LOG=rb_core=debug runboard watch run.json --progress snapshot.json
/// ```
pub fn init_tracing() -> color_eyre::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| eyre!("Failed to create env filter: {e}"))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()
        .map_err(|e| eyre!("Failed to initialize tracing: {e}"))
}
