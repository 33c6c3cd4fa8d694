//! Media folder listing.
//!
//! The folder is read again on every call so files dropped into it show up on
//! the next page load without restarting the service.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::LibraryError;
use crate::model::{MediaFile, MediaKind};

#[derive(Debug, Clone)]
pub struct MediaLibrary {
    root: PathBuf,
}

impl MediaLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        MediaLibrary { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lists supported files, oldest first. Only an unreadable folder is an
    /// error; entries that fail on their own are logged and skipped.
    pub fn scan(&self) -> Result<Vec<MediaFile>, LibraryError> {
        let entries = fs::read_dir(&self.root).map_err(|e| self.io_error(&self.root, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(root = ?self.root, error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            match self.describe(&entry.path()) {
                Ok(Some(file)) => files.push(file),
                Ok(None) => {}
                Err(e) => tracing::warn!(error = %crate::unpack_error(&e), "skipping media file"),
            }
        }

        files.sort_by(by_creation);
        tracing::debug!(root = ?self.root, count = files.len(), "media folder scanned");
        Ok(files)
    }

    /// Looks up a single file by name. Names that could escape the folder are
    /// treated as unknown.
    pub fn find(&self, name: &str) -> Result<Option<MediaFile>, LibraryError> {
        if !is_plain_file_name(name) {
            return Ok(None);
        }
        let path = self.root.join(name);
        if !path.exists() {
            return Ok(None);
        }
        self.describe(&path)
    }

    fn describe(&self, path: &Path) -> Result<Option<MediaFile>, LibraryError> {
        let Some(kind) = MediaKind::from_path(path) else {
            return Ok(None);
        };
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return Ok(None);
        };
        let meta = fs::metadata(path).map_err(|e| self.io_error(path, e))?;
        if !meta.is_file() {
            return Ok(None);
        }
        let created = meta
            .created()
            .or_else(|_| meta.modified())
            .map_err(|e| self.io_error(path, e))?;

        Ok(Some(MediaFile::new(name, kind, DateTime::<Utc>::from(created))))
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> LibraryError {
        LibraryError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn by_creation(a: &MediaFile, b: &MediaFile) -> Ordering {
    a.created.cmp(&b.created).then_with(|| a.name.cmp(&b.name))
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\', '\0'])
}
