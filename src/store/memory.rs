//! In-memory store for tests and embedding-app harnesses.

use std::sync::Mutex;

use super::{GameStore, StoreError};

/// Keeps the serialized document in memory.
///
/// The file-free analogue of pointing the file store at a scratch path:
/// useful for exercising history logic without touching disk. Starts
/// absent, like a file that was never written.
#[derive(Debug, Default)]
pub struct MemoryStore {
    contents: Mutex<Option<String>>,
}

impl MemoryStore {
    /// Creates an empty (absent) store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl GameStore for MemoryStore {
    fn read_store(&self) -> Result<Option<String>, StoreError> {
        let contents = self
            .contents
            .lock()
            .map_err(|_| StoreError::new("memory store mutex poisoned"))?;
        Ok(contents.clone())
    }

    fn write_store(&self, serialized: &str) -> Result<(), StoreError> {
        let mut contents = self
            .contents
            .lock()
            .map_err(|_| StoreError::new("memory store mutex poisoned"))?;
        *contents = Some(serialized.to_string());
        Ok(())
    }

    fn clear_store(&self) -> Result<(), StoreError> {
        let mut contents = self
            .contents
            .lock()
            .map_err(|_| StoreError::new("memory store mutex poisoned"))?;
        *contents = None;
        Ok(())
    }
}
