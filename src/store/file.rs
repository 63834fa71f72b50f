//! File-backed store: one JSON document on disk.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use super::{GameStore, StoreError};

/// Stores the serialized record sequence in a single file.
///
/// The path is the store's identity: injecting different paths gives
/// independent ledgers. Writes land in a sibling temp file and are renamed
/// into place, so a crash mid-write leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store backed by the file at the given path.
    ///
    /// The file is not touched until the first write.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn new(path: impl AsRef<Path>) -> Self {
        debug!("Creating FileStore");
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The backing file's path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "store".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl GameStore for FileStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn read_store(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                debug!(bytes = contents.len(), "Store read");
                Ok(Some(contents))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("No store file yet");
                Ok(None)
            }
            Err(err) => Err(StoreError::from(err)),
        }
    }

    #[instrument(skip(self, serialized), fields(path = %self.path.display(), bytes = serialized.len()))]
    fn write_store(&self, serialized: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let temp = self.temp_path();
        fs::write(&temp, serialized)?;
        fs::rename(&temp, &self.path)?;
        info!("Store written");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn clear_store(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Store cleared");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::from(err)),
        }
    }
}
