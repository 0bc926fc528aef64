//! Concat demuxer manifests.
//!
//! The concat-based assembly paths describe the slideshow in a small
//! text manifest. The manifest is a transient artifact: created right
//! before the render and removed on both the success and failure paths.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::warn;

use slidecast_models::ImageAsset;

use crate::error::{MediaError, MediaResult};

/// A transient concat demuxer manifest on disk.
///
/// Backed by a named temp file, so the file is removed even if the
/// owning operation unwinds before calling `remove`.
#[derive(Debug)]
pub struct ConcatManifest {
    file: NamedTempFile,
}

impl ConcatManifest {
    /// Write a manifest for `images` with per-image `durations` into `dir`.
    ///
    /// The final image is repeated once without a duration, which is how
    /// the concat demuxer is told to hold the last frame.
    pub fn write(dir: &Path, images: &[ImageAsset], durations: &[f64]) -> MediaResult<Self> {
        if images.is_empty() {
            return Err(MediaError::NoAssets("empty image sequence".to_string()));
        }
        if images.len() != durations.len() {
            return Err(MediaError::graph(format!(
                "{} durations for {} images",
                durations.len(),
                images.len()
            )));
        }

        let mut file = tempfile::Builder::new()
            .prefix("slideshow-")
            .suffix(".txt")
            .tempfile_in(dir)?;

        for (image, duration) in images.iter().zip(durations) {
            let path = absolute(&image.path);
            writeln!(file, "file '{}'", path.display())?;
            writeln!(file, "duration {:.3}", duration)?;
        }
        let last = absolute(&images[images.len() - 1].path);
        writeln!(file, "file '{}'", last.display())?;
        file.flush()?;

        Ok(Self { file })
    }

    /// Path of the manifest file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Remove the manifest, logging rather than escalating on failure.
    pub fn remove(self) {
        let path = self.file.path().to_path_buf();
        if let Err(e) = self.file.close() {
            warn!("Failed to remove concat manifest {}: {}", path.display(), e);
        }
    }
}

fn absolute(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_fixtures(dir: &Path, count: usize) -> Vec<ImageAsset> {
        (0..count)
            .map(|i| {
                let path = dir.join(format!("img_{i:03}.jpg"));
                std::fs::write(&path, b"jpg").unwrap();
                ImageAsset::new(i, path)
            })
            .collect()
    }

    #[test]
    fn test_manifest_contents() {
        let dir = tempfile::tempdir().unwrap();
        let images = image_fixtures(dir.path(), 3);
        let manifest = ConcatManifest::write(dir.path(), &images, &[9.0, 9.0, 10.0]).unwrap();

        let contents = std::fs::read_to_string(manifest.path()).unwrap();
        assert_eq!(contents.matches("file '").count(), 4); // last image repeated
        assert_eq!(contents.matches("duration 9.000").count(), 2);
        assert!(contents.contains("duration 10.000"));

        manifest.remove();
    }

    #[test]
    fn test_manifest_removed() {
        let dir = tempfile::tempdir().unwrap();
        let images = image_fixtures(dir.path(), 2);
        let manifest = ConcatManifest::write(dir.path(), &images, &[3.0, 3.0]).unwrap();

        let path = manifest.path().to_path_buf();
        assert!(path.exists());
        manifest.remove();
        assert!(!path.exists());
    }

    #[test]
    fn test_manifest_rejects_empty_or_mismatched_input() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ConcatManifest::write(dir.path(), &[], &[]),
            Err(MediaError::NoAssets(_))
        ));

        let images = image_fixtures(dir.path(), 2);
        assert!(matches!(
            ConcatManifest::write(dir.path(), &images, &[3.0]),
            Err(MediaError::GraphConsistency(_))
        ));
    }
}
