//! JSON persistence helpers for the per-user flapper directory.

use crate::error::{FlapperError, Result};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the per-user config directory, creating it if needed.
pub fn app_dir() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "flapper").ok_or(FlapperError::NoConfigDir)?;
    let dir = project_dirs.config_dir().to_path_buf();
    fs::create_dir_all(&dir).map_err(|e| FlapperError::io(&dir, e))?;
    Ok(dir)
}

/// Load a JSON file, returning `T::default()` if it is missing or invalid.
pub fn load_json_or_default<T: Default + DeserializeOwned>(path: &Path) -> T {
    match load_json(path) {
        Ok(value) => value,
        Err(FlapperError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            T::default()
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable file");
            T::default()
        }
    }
}

/// Load and parse a JSON file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = fs::read_to_string(path).map_err(|e| FlapperError::io(path, e))?;
    Ok(serde_json::from_str(&json)?)
}

/// Save a value as pretty-printed JSON, creating parent directories.
pub fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| FlapperError::io(parent, e))?;
    }
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json).map_err(|e| FlapperError::io(path, e))
}
