//! User configuration, loaded from `config.json` in the app directory.
//!
//! Every section is `#[serde(default)]`, so a partial file only overrides
//! the fields it names.

use crate::core::constants::{CELL_HEIGHT_PX, CELL_WIDTH_PX, DEFAULT_FRAMES_PER_SECOND};
use crate::core::game_state::GameRules;
use crate::utils::persistence::load_json_or_default;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub frames_per_second: u32,
    /// World pixels per terminal column.
    pub cell_width_px: f64,
    /// World pixels per terminal row.
    pub cell_height_px: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            frames_per_second: DEFAULT_FRAMES_PER_SECOND,
            cell_width_px: CELL_WIDTH_PX,
            cell_height_px: CELL_HEIGHT_PX,
        }
    }
}

impl DisplayConfig {
    /// Target frame duration. A zero rate falls back to the default.
    pub fn frame_duration(&self) -> Duration {
        let fps = if self.frames_per_second == 0 {
            DEFAULT_FRAMES_PER_SECOND
        } else {
            self.frames_per_second
        };
        Duration::from_micros(1_000_000 / fps as u64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub start_muted: bool,
    pub music_volume: f32,
    pub effects_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            start_muted: false,
            music_volume: 0.6,
            effects_volume: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory the default asset paths (`data/...`) are relative to.
    pub default_dir: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            default_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rules: GameRules,
    pub display: DisplayConfig,
    pub audio: AudioConfig,
    pub assets: AssetConfig,
}

impl Config {
    /// Load `config.json` from `dir`, falling back to defaults.
    pub fn load(dir: &Path) -> Self {
        load_json_or_default(&dir.join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let json = r#"{ "display": { "frames_per_second": 30 }, "audio": { "start_muted": true } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.display.frames_per_second, 30);
        assert_eq!(config.display.cell_width_px, CELL_WIDTH_PX);
        assert!(config.audio.start_muted);
        assert_eq!(config.rules, GameRules::default());
        assert_eq!(config.assets.default_dir, PathBuf::from("."));
    }

    #[test]
    fn test_frame_duration() {
        let display = DisplayConfig::default();
        assert_eq!(display.frame_duration(), Duration::from_micros(16_666));

        let zero = DisplayConfig {
            frames_per_second: 0,
            ..DisplayConfig::default()
        };
        assert_eq!(zero.frame_duration(), Duration::from_micros(16_666));
    }

    #[test]
    fn test_load_from_missing_dir_is_default() {
        let dir = std::env::temp_dir().join("flapper-config-test-missing-dir");
        assert_eq!(Config::load(&dir), Config::default());
    }
}
