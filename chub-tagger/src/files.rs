//! Scan discovery
//!
//! Finds JPEG scans in a folder, optionally descending into subfolders.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const JPEG_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

/// True if the file has a `.jpg`/`.jpeg` extension (any case)
pub fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| JPEG_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// List JPEG files under `root`, sorted by path.
///
/// Without `recursive` only the files directly in `root` are returned.
/// Unreadable entries are logged and skipped.
pub fn discover_images(root: &Path, recursive: bool) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(root).follow_links(false);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut files: Vec<PathBuf> = walker
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_jpeg(entry.path()))
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}
