//! Media asset references.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// An ordered reference to a still image on disk.
///
/// The index determines play order and matches the lexical sort of the
/// source directory listing. Assets are produced by the image-fetch step
/// before assembly begins and are never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAsset {
    /// Position in the slideshow (0-based).
    pub index: usize,
    /// Path to the image file.
    pub path: PathBuf,
}

impl ImageAsset {
    /// Create a new image asset.
    pub fn new(index: usize, path: impl Into<PathBuf>) -> Self {
        Self {
            index,
            path: path.into(),
        }
    }
}

/// A reference to an audio track on disk.
///
/// Duration is intentionally not stored here; it is always measured from
/// the file via the probe, so it cannot drift from the actual media.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioTrack {
    /// Path to the audio file.
    pub path: PathBuf,
}

impl AudioTrack {
    /// Create a new audio track reference.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path to the audio file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
