//! User-replaceable art and audio.
//!
//! Resolution only: each slot maps to bytes, either a stored upload or a
//! built-in default. Decoding images and playing sounds happen elsewhere.

pub mod data_uri;
pub mod manager;
pub mod store;
pub mod types;

pub use manager::{AssetManager, Upload};
pub use store::{JsonFileStore, MemoryStore, PreferenceStore};
pub use types::{AssetKind, AssetSlot, AssetSource};
