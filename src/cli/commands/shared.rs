//! Shared components for CLI commands

use crate::app::adapters::state_store::{RotationStore, default_state_path};
use crate::cli::args::Args;
use crate::config::AtisConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Set up structured logging on stderr.
///
/// `RUST_LOG` takes precedence over the verbosity flags.
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("atis_fusion={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Configuration from `path`, or the defaults
pub fn load_config(path: Option<&Path>) -> Result<AtisConfig> {
    match path {
        Some(path) => AtisConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Ok(AtisConfig::default()),
    }
}

/// Rotation store at `explicit`, or at the default location
pub fn rotation_store(explicit: Option<&Path>) -> Result<RotationStore> {
    let path: PathBuf = match explicit {
        Some(path) => path.to_path_buf(),
        None => default_state_path().context("Could not determine user data directory")?,
    };
    Ok(RotationStore::new(path))
}
