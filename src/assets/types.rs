//! Asset slots and where each slot's media currently comes from.

use super::data_uri;
use crate::error::{FlapperError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Media category of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    Audio,
}

/// The five user-replaceable media slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetSlot {
    Background,
    Bird,
    Pipe,
    Music,
    Ouch,
}

impl AssetSlot {
    pub const ALL: [AssetSlot; 5] = [
        AssetSlot::Background,
        AssetSlot::Bird,
        AssetSlot::Pipe,
        AssetSlot::Music,
        AssetSlot::Ouch,
    ];

    pub fn index(self) -> usize {
        match self {
            Self::Background => 0,
            Self::Bird => 1,
            Self::Pipe => 2,
            Self::Music => 3,
            Self::Ouch => 4,
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(Self::Background)
    }

    /// Key in the preference store.
    pub fn storage_key(self) -> &'static str {
        match self {
            Self::Background => "fb_bg",
            Self::Bird => "fb_bird",
            Self::Pipe => "fb_pipe",
            Self::Music => "fb_music",
            Self::Ouch => "fb_ouch",
        }
    }

    /// Built-in resource path, relative to the configured asset directory.
    pub fn default_path(self) -> &'static str {
        match self {
            Self::Background => "data/background.jpg",
            Self::Bird => "data/bird.png",
            Self::Pipe => "data/pipe.jpg",
            Self::Music => "data/music.mp3",
            Self::Ouch => "data/ouch.mp3",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Background => "Background",
            Self::Bird => "Bird",
            Self::Pipe => "Pipe",
            Self::Music => "Music",
            Self::Ouch => "Crash sound",
        }
    }

    pub fn kind(self) -> AssetKind {
        match self {
            Self::Background | Self::Bird | Self::Pipe => AssetKind::Image,
            Self::Music | Self::Ouch => AssetKind::Audio,
        }
    }
}

/// Where a slot's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    /// Built-in resource path. Existence is not checked until load.
    Default(PathBuf),
    /// A user upload stored as a `data:` URI.
    DataUri(String),
}

impl AssetSource {
    pub fn default_for(slot: AssetSlot) -> Self {
        Self::Default(PathBuf::from(slot.default_path()))
    }

    /// Pick the stored value when it is a `data:` URI, the default otherwise.
    pub fn resolve(slot: AssetSlot, stored: Option<&str>) -> Self {
        match stored {
            Some(value) if data_uri::is_data_uri(value) => Self::DataUri(value.to_string()),
            _ => Self::default_for(slot),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::DataUri(_))
    }

    /// Read the media bytes. Default paths are joined onto `default_dir`.
    pub fn load_bytes(&self, default_dir: &Path) -> Result<Vec<u8>> {
        match self {
            Self::Default(rel) => {
                let path = default_dir.join(rel);
                fs::read(&path).map_err(|e| FlapperError::io(path, e))
            }
            Self::DataUri(uri) => Ok(data_uri::decode(uri)?.data),
        }
    }

    /// Short description for the customize panel.
    pub fn describe(&self) -> String {
        match self {
            Self::Default(path) => format!("default ({})", path.display()),
            Self::DataUri(uri) => match data_uri::decode(uri) {
                Ok(d) => format!("custom {}, {}", d.mime, format_size(d.data.len())),
                Err(_) => "custom (unreadable)".to_string(),
            },
        }
    }
}

fn format_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
