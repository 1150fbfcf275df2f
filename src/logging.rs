//! File logging setup.
//!
//! The game owns the terminal, so logs only ever go to a file.

use std::fs::File;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};

use crate::config::Config;

/// Install the global subscriber if a log path is configured.
///
/// Returns whether logging was enabled.
pub fn init(config: &Config) -> Result<bool> {
    let Some(path) = config.log_path.as_ref() else {
        return Ok(false);
    };

    let file = File::create(path)
        .with_context(|| format!("blockfall: cannot create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow!("blockfall: logging setup failed: {}", e))?;
    Ok(true)
}
