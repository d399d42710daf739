// ============================================================================
// File: fakevisor/src/store/dir.rs
// ----------------------------------------------------------------------------
// Directory-backed record store. Only regular files are records.
// ============================================================================

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::{RecordStore, invalid_key_error, invalid_key_reason};

/// Record store backed by a directory, one regular file per record.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Create a store rooted at `root`. Nothing is touched on disk.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the records.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    /// Whether `key` names a regular file, the same rule `keys` applies.
    /// Symlinks are not followed.
    fn is_record(&self, key: &str) -> io::Result<bool> {
        match fs::symlink_metadata(self.record_path(key)) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl RecordStore for DirStore {
    fn location(&self) -> String {
        self.root.display().to_string()
    }

    fn ensure(&self) -> io::Result<()> {
        if self.root.is_dir() {
            return Ok(());
        }
        debug!("Creating state directory {}", self.root.display());
        fs::create_dir_all(&self.root)
    }

    fn is_present(&self) -> bool {
        self.root.is_dir()
    }

    fn keys(&self) -> io::Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => keys.push(name),
                Err(raw) => warn!(
                    "Skipping non UTF-8 entry {:?} in {}",
                    raw,
                    self.root.display()
                ),
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn contains(&self, key: &str) -> io::Result<bool> {
        if invalid_key_reason(key).is_some() {
            return Ok(false);
        }
        self.is_record(key)
    }

    fn read(&self, key: &str) -> io::Result<Option<String>> {
        if invalid_key_reason(key).is_some() {
            return Ok(None);
        }
        if !self.is_record(key)? {
            return Ok(None);
        }
        match fs::read_to_string(self.record_path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, key: &str, contents: &str) -> io::Result<()> {
        if let Some(err) = invalid_key_error(key) {
            return Err(err);
        }
        fs::write(self.record_path(key), contents)
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        if let Some(err) = invalid_key_error(key) {
            return Err(err);
        }
        if !self.is_record(key)? {
            return Ok(());
        }
        match fs::remove_file(self.record_path(key)) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}
