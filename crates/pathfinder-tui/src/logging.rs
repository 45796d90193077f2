//! Log to a file; the terminal belongs to the UI while it runs.

use anyhow::Result;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `<data_local_dir>/pathfinder/pathfinder.log`, or the temp dir as a last resort
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("pathfinder")
        .join("pathfinder.log")
}

/// `RUST_LOG` wins over the configured level
pub fn init(level: &str, path: &Path) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let file_layer = fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(Arc::new(file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()?;
    Ok(())
}
