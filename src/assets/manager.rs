//! Active asset sources, backed by a preference store.

use super::data_uri;
use super::store::PreferenceStore;
use super::types::{AssetSlot, AssetSource};
use crate::error::{FlapperError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A local file read into memory and encoded, not yet applied to a slot.
#[derive(Debug, Clone)]
pub struct Upload {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
    pub uri: String,
}

impl Upload {
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| FlapperError::io(path, e))?;
        let uri = data_uri::encode(data_uri::mime_for_path(path), &bytes);
        Ok(Self {
            path: path.to_path_buf(),
            bytes,
            uri,
        })
    }
}

/// Tracks which source each slot uses and keeps the store in sync.
///
/// Every mutating call either fully succeeds or leaves the slot's previous
/// source active.
#[derive(Debug)]
pub struct AssetManager<S: PreferenceStore> {
    store: S,
    sources: [AssetSource; 5],
}

impl<S: PreferenceStore> AssetManager<S> {
    /// Build a manager and resolve every slot from `store`.
    pub fn new(store: S) -> Self {
        let sources = AssetSlot::ALL.map(AssetSource::default_for);
        let mut manager = Self { store, sources };
        manager.load_all();
        manager
    }

    /// Re-resolve every slot from the store.
    pub fn load_all(&mut self) {
        for slot in AssetSlot::ALL {
            let stored = self.store.get(slot.storage_key());
            self.sources[slot.index()] = AssetSource::resolve(slot, stored.as_deref());
        }
    }

    pub fn source(&self, slot: AssetSlot) -> &AssetSource {
        &self.sources[slot.index()]
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Make `value` the slot's source. A `data:` URI is persisted first; any
    /// other value reverts the slot to its default for this session without
    /// touching the store.
    pub fn apply_asset(&mut self, slot: AssetSlot, value: &str) -> Result<()> {
        if data_uri::is_data_uri(value) {
            self.store.set(slot.storage_key(), value)?;
        }
        self.sources[slot.index()] = AssetSource::resolve(slot, Some(value));
        Ok(())
    }

    /// Read a local file, convert it to a `data:` URI and apply it.
    /// On a read failure the previous asset stays active.
    pub fn apply_upload(&mut self, slot: AssetSlot, path: &Path) -> Result<()> {
        let upload = Upload::read(path)?;
        self.commit_upload(slot, &upload)
    }

    /// Apply an upload that was already read (and checked by the caller).
    pub fn commit_upload(&mut self, slot: AssetSlot, upload: &Upload) -> Result<()> {
        self.apply_asset(slot, &upload.uri)?;
        tracing::info!(
            slot = slot.label(),
            path = %upload.path.display(),
            bytes = upload.bytes.len(),
            "custom asset applied"
        );
        Ok(())
    }

    /// Forget every stored choice and return to the built-in assets.
    pub fn reset_to_defaults(&mut self) -> Result<()> {
        for slot in AssetSlot::ALL {
            self.store.remove(slot.storage_key())?;
        }
        self.load_all();
        tracing::info!("assets reset to defaults");
        Ok(())
    }

    /// Bytes for a slot's current source.
    pub fn load_bytes(&self, slot: AssetSlot, default_dir: &Path) -> Result<Vec<u8>> {
        self.source(slot).load_bytes(default_dir)
    }
}
