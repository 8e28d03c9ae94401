//! Tracing setup. The terminal belongs to the game, so logs go to a file.

use crate::error::{FlapperError, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "flapper.log";
pub const LOG_ENV: &str = "FLAPPER_LOG";

/// Install a global subscriber appending to `flapper.log` in `dir`.
///
/// The filter is read from `FLAPPER_LOG` and defaults to `info`.
pub fn init(dir: &Path) -> Result<()> {
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| FlapperError::io(&path, e))?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    // A second init (tests, re-entry) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}
