//! Tag storage for image files
//!
//! The tagger never touches image bytes itself. It reads and writes the flat
//! tag map through [`TagStore`]; [`SidecarStore`] keeps that map as JSON in
//! `<image>.tags.json` next to each image for an external EXIF writer to
//! apply.

use chub_common::{Result, TagMap};
use std::path::{Path, PathBuf};

/// Read/write access to the tags of an image
pub trait TagStore {
    /// Tags currently stored for `image`; empty if there are none
    fn read_tags(&self, image: &Path) -> Result<TagMap>;

    /// Replace the stored tags of `image`
    fn write_tags(&self, image: &Path, tags: &TagMap) -> Result<()>;
}

const SIDECAR_SUFFIX: &str = ".tags.json";

/// JSON sidecar implementation of [`TagStore`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SidecarStore;

impl SidecarStore {
    pub fn new() -> Self {
        Self
    }

    /// `photo.jpg` → `photo.jpg.tags.json`
    pub fn sidecar_path(image: &Path) -> PathBuf {
        let mut name = image.as_os_str().to_os_string();
        name.push(SIDECAR_SUFFIX);
        PathBuf::from(name)
    }
}

impl TagStore for SidecarStore {
    fn read_tags(&self, image: &Path) -> Result<TagMap> {
        let path = Self::sidecar_path(image);
        if !path.exists() {
            return Ok(TagMap::new());
        }

        let content = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write_tags(&self, image: &Path, tags: &TagMap) -> Result<()> {
        let path = Self::sidecar_path(image);
        let content = serde_json::to_string_pretty(tags)?;

        // Atomic replace: temp file + rename
        let mut temp_name = path.as_os_str().to_os_string();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);

        std::fs::write(&temp_path, content)?;
        if let Err(e) = std::fs::rename(&temp_path, &path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(e.into());
        }

        tracing::debug!(path = %path.display(), tags = tags.len(), "Wrote sidecar");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sidecar_path() {
        assert_eq!(
            SidecarStore::sidecar_path(Path::new("/scans/12-3.jpg")),
            PathBuf::from("/scans/12-3.jpg.tags.json")
        );
    }

    #[test]
    fn test_missing_sidecar_reads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let tags = SidecarStore::new()
            .read_tags(&temp_dir.path().join("12-3.jpg"))
            .unwrap();
        assert!(tags.is_empty());
    }

    #[test]
    fn test_write_then_read_keeps_order() {
        let temp_dir = TempDir::new().unwrap();
        let image = temp_dir.path().join("12-3.jpg");
        let store = SidecarStore::new();

        let mut tags = TagMap::new();
        tags.insert("Exif.Image.Model".to_string(), "F3".to_string());
        tags.insert("Exif.Image.Make".to_string(), "Nikon".to_string());
        store.write_tags(&image, &tags).unwrap();

        let read = store.read_tags(&image).unwrap();
        assert!(read.iter().eq(tags.iter()));
        assert!(!temp_dir.path().join("12-3.jpg.tags.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_sidecar_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let image = temp_dir.path().join("12-3.jpg");
        std::fs::write(SidecarStore::sidecar_path(&image), "{not json").unwrap();

        assert!(matches!(
            SidecarStore::new().read_tags(&image),
            Err(chub_common::Error::Json(_))
        ));
    }
}
